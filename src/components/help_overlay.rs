//! Keyboard shortcut help

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::shortcuts::HELP;

#[component]
pub fn HelpOverlay() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.help_open.get()>
            <div class="help-overlay" on:click=move |_| ctx.help_open.set(false)>
                <div class="help-panel" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                    <h3>"Keyboard Shortcuts"</h3>
                    <dl>
                        {HELP
                            .iter()
                            .map(|(key, what)| view! {
                                <dt><kbd>{*key}</kbd></dt>
                                <dd>{*what}</dd>
                            })
                            .collect_view()}
                    </dl>
                </div>
            </div>
        </Show>
    }
}
