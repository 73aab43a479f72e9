//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::Board;
use crate::models::Quadrant;
use crate::persistence::MatrixStore;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Lists, tasks, matrix, cleared set and filter
    pub board: Board,
    /// A refresh is in flight (refresh button shows a spinner)
    pub refreshing: bool,
    /// Clear Completed is running
    pub clearing: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Write the current assignment to localStorage
pub fn persist_matrix(store: &AppStore) {
    let board = store.board().read_untracked();
    if let Err(e) = MatrixStore::local().write_assignment(board.matrix()) {
        web_sys::console::error_1(&format!("[MATRIX] Failed to save matrix: {}", e).into());
    }
}

/// Place a dropped task and persist when the assignment changed
pub fn store_drop_task(store: &AppStore, task_id: &str, quadrant: Quadrant) {
    let changed = store.board().write().drop_task(task_id, quadrant);
    web_sys::console::log_1(
        &format!("[DND] {} -> {} (changed={})", task_id, quadrant.as_str(), changed).into(),
    );
    if changed {
        persist_matrix(store);
    }
}

pub fn store_remove_from_matrix(store: &AppStore, task_id: &str) {
    if store.board().write().remove_from_matrix(task_id) {
        persist_matrix(store);
    }
}

/// Dismiss visible completed tasks and persist both the matrix and the
/// cleared set. Returns how many were dismissed.
pub fn store_clear_completed(store: &AppStore) -> usize {
    let cleared = store.board().write().clear_completed();
    if cleared.is_empty() {
        return 0;
    }
    let count = cleared.len();
    if let Err(e) = MatrixStore::local().add_cleared_completed(cleared) {
        web_sys::console::error_1(&format!("[MATRIX] Failed to save cleared tasks: {}", e).into());
    }
    persist_matrix(store);
    count
}

pub fn store_toggle_filter(store: &AppStore, list_id: &str) {
    store.board().write().toggle_filter(list_id);
}

pub fn store_clear_filter(store: &AppStore) {
    store.board().write().clear_filter();
}
