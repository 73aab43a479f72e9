//! Task Card Component
//!
//! One draggable task with its completion checkbox and overflow menu.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::DndSignals;

use crate::card::{CardAction, CardView};
use crate::context::{use_app_context, FormTarget};
use crate::dispatcher::{confirmed, run_mutation, Mutation};
use crate::models::Quadrant;
use crate::store::{store_remove_from_matrix, use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(card: CardView) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = expect_context::<DndSignals<Quadrant>>();

    let id = card.id.clone();
    let base_class = card.css_class();

    let card_class = {
        let id = id.clone();
        move || {
            let mut c = base_class.clone();
            if dnd.dragging_id_read.get().as_deref() == Some(id.as_str()) {
                c.push_str(" dragging");
            }
            c
        }
    };

    let menu_open = {
        let id = id.clone();
        move || ctx.open_menu.get().as_deref() == Some(id.as_str())
    };

    // Hovering another card closes a menu left open elsewhere
    let on_mouseenter = {
        let id = id.clone();
        move |_: web_sys::MouseEvent| {
            let other_open = ctx
                .open_menu
                .with_untracked(|open| open.as_ref().is_some_and(|open| *open != id));
            if other_open {
                ctx.open_menu.set(None);
            }
        }
    };

    // Driven by the board so a failed toggle leaves the box as it was
    let checked = {
        let id = id.clone();
        move || store.board().read().is_completed(&id)
    };

    let on_toggle = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            let Some(task) = store.board().read_untracked().task(&id).cloned() else {
                return;
            };
            spawn_local(run_mutation(Mutation::toggle_completion(&task), store, ctx));
        }
    };

    let on_menu_click = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let next = if ctx.open_menu.get_untracked().as_deref() == Some(id.as_str()) {
                None
            } else {
                Some(id.clone())
            };
            ctx.open_menu.set(next);
        }
    };

    let actions = card.actions.clone();
    let menu_id = id.clone();

    view! {
        <div
            class=card_class
            draggable="true"
            data-drag-id=id.clone()
            on:mouseenter=on_mouseenter
        >
            <input
                type="checkbox"
                class="task-checkbox"
                prop:checked=checked
                on:click=on_toggle
            />
            <div class="task-content">
                <div class="task-title">{card.title.clone()}</div>
                <div class="task-meta">
                    {card.list_title.clone().map(|t| view! { <span class="task-list">{t}</span> })}
                    {card.due_label.clone().map(|d| view! { <span class="task-due">{d}</span> })}
                </div>
                {card.notes_preview.clone().map(|n| view! { <div class="task-notes">{n}</div> })}
            </div>
            <div class="task-menu">
                <button class="menu-toggle" on:click=on_menu_click>"⋮"</button>
                {move || menu_open().then(|| view! {
                    <div class="menu-dropdown" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                        {menu_items(actions.clone(), menu_id.clone())}
                    </div>
                })}
            </div>
        </div>
    }
}

/// Overflow menu entries for one card
fn menu_items(actions: Vec<CardAction>, id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    actions
        .into_iter()
        .map(|action| {
            let id = id.clone();
            let on_click = move |ev: web_sys::MouseEvent| {
                ev.stop_propagation();
                ctx.open_menu.set(None);
                let Some(task) = store.board().read_untracked().task(&id).cloned() else {
                    return;
                };
                match action {
                    CardAction::Edit => ctx.open_form(FormTarget::Edit(task)),
                    CardAction::RemoveFromMatrix => store_remove_from_matrix(&store, &task.id),
                    CardAction::Delete => {
                        let mutation = Mutation::delete(&task);
                        if confirmed(&mutation) {
                            spawn_local(run_mutation(mutation, store, ctx));
                        }
                    }
                }
            };
            let class = match action {
                CardAction::Delete => "menu-item danger",
                _ => "menu-item",
            };
            view! { <button class=class on:click=on_click>{action.label()}</button> }
        })
        .collect_view()
}
