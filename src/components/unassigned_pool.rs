//! Unassigned Pool Component
//!
//! Tasks not placed in any quadrant. Not a drop target.

use chrono::Utc;
use leptos::prelude::*;

use crate::components::CardList;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn UnassignedPool() -> impl IntoView {
    let store = use_app_store();
    let cards = Signal::derive(move || store.board().read().cards(None, Utc::now()));

    view! {
        <aside class="unassigned-pool">
            <header class="pool-header">
                <h2>"Unassigned Tasks"</h2>
                <span class="pool-count">{move || cards.with(Vec::len)}</span>
            </header>
            <CardList cards=cards empty_text="All tasks are in the matrix" />
        </aside>
    }
}
