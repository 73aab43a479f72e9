//! Task Form Component
//!
//! Modal for adding and editing a task.

use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::dispatcher::{run_mutation, Mutation};
use crate::form::FormFields;
use crate::store::{use_app_store, AppStateStoreFields};

/// Browser UTC offset in effect on `day`
fn local_offset_on(day: NaiveDate) -> FixedOffset {
    let date = js_sys::Date::new_with_year_month_day(day.year() as u32, day.month0() as i32, day.day() as i32);
    // getTimezoneOffset is UTC minus local, in minutes
    let minutes = date.get_timezone_offset() as i32;
    FixedOffset::west_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let fields = RwSignal::new(FormFields::default());

    // Reset the fields each time the modal opens
    Effect::new(move |_| {
        if let Some(target) = ctx.form.get() {
            let lists = store.board().read_untracked().lists().to_vec();
            fields.set(FormFields::for_target(&target, &lists));
        }
    });

    let lists = move || store.board().read().lists().to_vec();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = fields.get_untracked();
        let Some(draft) = current.to_draft() else {
            return;
        };
        let offset = draft.due.map(local_offset_on).unwrap_or_else(|| Utc.fix());
        let mutation = Mutation::save(&current.list_id, current.task_id.as_deref(), &draft, offset);
        spawn_local(run_mutation(mutation, store, ctx));
    };

    view! {
        <Show when=move || ctx.form.with(Option::is_some)>
            <div class="modal" on:click=move |_| ctx.close_form()>
                <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                    <header class="modal-header">
                        <h2>{move || fields.with(FormFields::heading)}</h2>
                        <button class="close" on:click=move |_| ctx.close_form()>"×"</button>
                    </header>
                    <form on:submit=on_submit>
                        <label for="task-list-id">"List"</label>
                        <select
                            id="task-list-id"
                            prop:value=move || fields.with(|f| f.list_id.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                fields.update(|f| f.list_id = value);
                            }
                        >
                            <option value="">"Select a list..."</option>
                            <For
                                each=lists
                                key=|list| (list.id.clone(), list.title.clone())
                                children=move |list| view! {
                                    <option value=list.id.clone()>{list.title.clone()}</option>
                                }
                            />
                        </select>

                        <label for="task-title">"Title"</label>
                        <input
                            id="task-title"
                            type="text"
                            required=true
                            prop:value=move || fields.with(|f| f.title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                fields.update(|f| f.title = value);
                            }
                        />

                        <label for="task-notes">"Notes"</label>
                        <textarea
                            id="task-notes"
                            prop:value=move || fields.with(|f| f.notes.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                fields.update(|f| f.notes = value);
                            }
                        />

                        <label for="task-due">"Due date"</label>
                        <input
                            id="task-due"
                            type="date"
                            prop:value=move || fields.with(|f| f.due.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                fields.update(|f| f.due = value);
                            }
                        />

                        <div class="form-actions">
                            <button type="button" class="btn" on:click=move |_| ctx.close_form()>"Cancel"</button>
                            <button type="submit" class="btn primary">"Save"</button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
