//! Matrix Grid Component
//!
//! The four quadrants, plus the document-level drag binding that places
//! dropped tasks.

use leptos::prelude::*;

use leptos_dragdrop::{bind_document_dnd, DndSignals, DropRegistry};

use crate::components::QuadrantPanel;
use crate::models::Quadrant;
use crate::store::{store_drop_task, use_app_store};

#[component]
pub fn MatrixGrid() -> impl IntoView {
    let store = use_app_store();
    let dnd = expect_context::<DndSignals<Quadrant>>();

    let registry: DropRegistry<Quadrant> = Quadrant::ALL.iter().map(|q| (q.as_str(), *q)).collect();
    bind_document_dnd(dnd, registry, move |task_id, quadrant| {
        store_drop_task(&store, &task_id, quadrant);
    });

    view! {
        <div class="matrix-grid">
            {Quadrant::ALL
                .into_iter()
                .map(|quadrant| view! { <QuadrantPanel quadrant=quadrant /> })
                .collect_view()}
        </div>
    }
}
