//! Toolbar Component
//!
//! Refresh, Clear Completed, Add Task and the filter toggle.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppContext, FormTarget};
use crate::store::{store_clear_completed, use_app_store, AppStateStoreFields, AppStore};

/// Pause before sweeping so the button's loading state is visible
const CLEAR_COMPLETED_DELAY_MS: u32 = 300;

/// Start a full reload unless one is already showing.
pub fn start_refresh(store: AppStore, ctx: AppContext) {
    if !store.refreshing().get_untracked() {
        ctx.reload();
    }
}

/// Dismiss every visible completed task after a short delay. Nothing
/// happens, not even the loading state, when none is shown.
pub fn start_clear_completed(store: AppStore) {
    if store.clearing().get_untracked() {
        return;
    }
    if !store.board().read_untracked().has_visible_completed() {
        web_sys::console::log_1(&"[MATRIX] No completed tasks to clear".into());
        return;
    }
    store.clearing().set(true);
    spawn_local(async move {
        TimeoutFuture::new(CLEAR_COMPLETED_DELAY_MS).await;
        let count = store_clear_completed(&store);
        web_sys::console::log_1(&format!("[MATRIX] Cleared {} completed tasks", count).into());
        store.clearing().set(false);
    });
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let refreshing = move || store.refreshing().get();
    let clearing = move || store.clearing().get();
    let active_filters = move || store.board().read().filter().len();

    view! {
        <div class="toolbar">
            <button
                class=move || if refreshing() { "btn refresh loading" } else { "btn refresh" }
                disabled=refreshing
                on:click=move |_| start_refresh(store, ctx)
            >
                {move || if refreshing() { "Refreshing..." } else { "Refresh Tasks" }}
            </button>
            <button
                class=move || if clearing() { "btn clear-completed loading" } else { "btn clear-completed" }
                disabled=clearing
                on:click=move |_| start_clear_completed(store)
            >
                {move || if clearing() { "Clearing..." } else { "Clear Completed" }}
            </button>
            <button class="btn primary" on:click=move |_| ctx.open_form(FormTarget::New)>
                "Add Task"
            </button>
            <button
                class={move || if active_filters() > 0 { "btn filter active" } else { "btn filter" }}
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    ctx.filters_open.update(|open| *open = !*open);
                }
            >
                {move || match active_filters() {
                    0 => "Filter".to_string(),
                    n => format!("Filter ({})", n),
                }}
            </button>
        </div>
    }
}
