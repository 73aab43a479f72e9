//! Task Matrix Frontend App
//!
//! Board layout: toolbar, the four quadrants and the unassigned pool.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::JsCast;

use leptos_dragdrop::create_dnd_signals;

use crate::components::{
    start_clear_completed, start_refresh, FilterMenu, HelpOverlay, MatrixGrid, TaskForm, Toolbar,
    UnassignedPool,
};
use crate::context::{AppContext, FormTarget};
use crate::loader::refresh_board;
use crate::models::Quadrant;
use crate::shortcuts::{shortcut_for, Shortcut};
use crate::store::AppState;

/// Focus is in a text field, so keys belong to it
fn is_typing(ev: &web_sys::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = AppContext::new((reload_trigger, set_reload_trigger));

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);
    provide_context(create_dnd_signals::<Quadrant>());

    // Load lists, tasks and the stored matrix on mount and on every reload
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading board, trigger={}", trigger).into());
        spawn_local(refresh_board(store));
    });

    // Menus close on any click that was not stopped inside them
    let _ = window_event_listener(ev::click, move |_| {
        ctx.open_menu.set(None);
        ctx.filters_open.set(false);
    });

    let _ = window_event_listener(ev::keydown, move |ev| {
        let Some(shortcut) = shortcut_for(&ev.key(), ev.shift_key(), is_typing(&ev), ctx.form_is_open()) else {
            return;
        };
        ev.prevent_default();
        match shortcut {
            Shortcut::NewTask => ctx.open_form(FormTarget::New),
            Shortcut::Refresh => start_refresh(store, ctx),
            Shortcut::ToggleFilters => ctx.filters_open.update(|open| *open = !*open),
            Shortcut::ClearCompleted => start_clear_completed(store),
            Shortcut::ToggleHelp => ctx.help_open.update(|open| *open = !*open),
            Shortcut::Escape => {
                ctx.close_form();
                ctx.close_menus();
            }
        }
    });

    view! {
        <div class="dashboard">
            <header class="app-header">
                <h1>"Task Matrix"</h1>
                <form method="post" action="/auth/logout">
                    <button type="submit" class="btn link">"Log out"</button>
                </form>
            </header>

            <div class="toolbar-row">
                <Toolbar />
                <FilterMenu />
            </div>

            <main class="board">
                <MatrixGrid />
                <UnassignedPool />
            </main>

            <TaskForm />
            <HelpOverlay />
        </div>
    }
}
