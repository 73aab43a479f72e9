//! Card List Component
//!
//! Renders a derived card view; shared by the quadrants and the pool.

use leptos::prelude::*;

use crate::card::CardView;
use crate::components::TaskCard;

#[component]
pub fn CardList(
    /// Cards to show, recomputed whenever the board changes
    cards: Signal<Vec<CardView>>,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    view! {
        <div class="task-list">
            <For
                each=move || cards.get()
                key=|card| {
                    // Every field a card shows, so edits re-render the card
                    (
                        card.id.clone(),
                        card.title.clone(),
                        card.due_label.clone(),
                        card.notes_preview.clone(),
                        card.list_title.clone(),
                        card.completed,
                        card.overdue,
                        card.quadrant,
                    )
                }
                children=move |card| view! { <TaskCard card=card /> }
            />
            <Show when=move || cards.with(Vec::is_empty)>
                <p class="empty-state">{empty_text.clone()}</p>
            </Show>
        </div>
    }
}
