//! Filter Menu Component
//!
//! Dropdown of task lists; checked lists are the only ones shown.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_clear_filter, store_toggle_filter, use_app_store, AppStateStoreFields};

#[component]
pub fn FilterMenu() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let lists = move || store.board().read().lists().to_vec();

    view! {
        <Show when=move || ctx.filters_open.get()>
            <div class="filter-dropdown" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <h3>"Filter by list"</h3>
                <For
                    each=lists
                    key=|list| (list.id.clone(), list.title.clone())
                    children=move |list| {
                        let id = list.id.clone();
                        let toggle_id = list.id.clone();
                        let checked = move || store.board().read().filter().is_selected(&id);
                        view! {
                            <label class="filter-option">
                                <input
                                    type="checkbox"
                                    prop:checked=checked
                                    on:change=move |_| store_toggle_filter(&store, &toggle_id)
                                />
                                <span>{list.title.clone()}</span>
                            </label>
                        }
                    }
                />
                <button class="btn link" on:click=move |_| store_clear_filter(&store)>
                    "Clear filters"
                </button>
            </div>
        </Show>
    }
}
