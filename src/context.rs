//! Application Context
//!
//! Shared UI signals provided via Leptos Context API.

use leptos::prelude::*;

use crate::models::Task;

/// What the task form is editing
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget {
    New,
    Edit(Task),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload tasks from the proxy - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks from the proxy - write
    set_reload_trigger: WriteSignal<u32>,
    /// Card whose overflow menu is open; at most one
    pub open_menu: RwSignal<Option<String>>,
    /// Task form modal, `None` when closed
    pub form: RwSignal<Option<FormTarget>>,
    pub filters_open: RwSignal<bool>,
    pub help_open: RwSignal<bool>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            open_menu: RwSignal::new(None),
            form: RwSignal::new(None),
            filters_open: RwSignal::new(false),
            help_open: RwSignal::new(false),
        }
    }

    /// Trigger a reload of lists and tasks
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn open_form(&self, target: FormTarget) {
        self.open_menu.set(None);
        self.form.set(Some(target));
    }

    pub fn close_form(&self) {
        self.form.set(None);
    }

    pub fn form_is_open(&self) -> bool {
        self.form.with_untracked(Option::is_some)
    }

    /// Close every floating panel (Escape)
    pub fn close_menus(&self) {
        self.open_menu.set(None);
        self.filters_open.set(false);
        self.help_open.set(false);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
