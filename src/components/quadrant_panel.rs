//! Quadrant Panel Component
//!
//! One cell of the matrix. The `data-drop-zone` attribute is what the
//! document drag listeners resolve drops against.

use chrono::Utc;
use leptos::prelude::*;

use leptos_dragdrop::DndSignals;

use crate::components::CardList;
use crate::models::Quadrant;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn QuadrantPanel(quadrant: Quadrant) -> impl IntoView {
    let store = use_app_store();
    let dnd = expect_context::<DndSignals<Quadrant>>();

    let cards = Signal::derive(move || store.board().read().cards(Some(quadrant), Utc::now()));
    let count = move || cards.with(Vec::len);

    let panel_class = move || {
        let mut c = format!("quadrant {}", quadrant.as_str());
        if dnd.hover_target_read.get() == Some(quadrant) {
            c.push_str(" drag-over");
        }
        c
    };

    view! {
        <section class=panel_class data-drop-zone=quadrant.as_str()>
            <header class="quadrant-header">
                <h2>{quadrant.title()}</h2>
                <span class="quadrant-subtitle">{quadrant.subtitle()}</span>
                <span class="quadrant-count">{count}</span>
            </header>
            <CardList cards=cards empty_text="Drop tasks here" />
        </section>
    }
}
