//! Task Store Client
//!
//! Fetches every list's tasks through the proxy and merges them into one
//! due-sorted collection. A list that fails to load is logged and left out;
//! it never aborts the whole refresh.

use crate::api::{self, ApiError};
use crate::matrix::MatrixAssignment;
use crate::models::{sort_by_due, Task, TaskList};
use crate::persistence::{ClearedCompleted, MatrixStore};
use crate::store::{AppStateStoreFields, AppStore};
use leptos::prelude::{ReadUntracked, Set, Write};

/// Result of merging per-list responses
#[derive(Debug, Default)]
pub struct MergedTasks {
    pub tasks: Vec<Task>,
    /// (list title, error) for every list that could not be fetched
    pub failed: Vec<(String, ApiError)>,
}

/// Tag every task with its list, flatten, and sort by due date.
pub fn merge_list_results(results: Vec<(TaskList, Result<Vec<Task>, ApiError>)>) -> MergedTasks {
    let mut merged = MergedTasks::default();
    for (list, result) in results {
        match result {
            Ok(tasks) => merged.tasks.extend(tasks.into_iter().map(|mut task| {
                task.list_id = list.id.clone();
                task.list_title = list.title.clone();
                task
            })),
            Err(err) => merged.failed.push((list.title, err)),
        }
    }
    sort_by_due(&mut merged.tasks);
    merged
}

pub async fn load_task_lists() -> Vec<TaskList> {
    match api::list_task_lists().await {
        Ok(lists) => lists,
        Err(e) => {
            web_sys::console::error_1(&format!("[LOAD] Error loading task lists: {}", e).into());
            Vec::new()
        }
    }
}

/// Fetch each list in turn and merge.
pub async fn load_tasks(lists: &[TaskList]) -> Vec<Task> {
    let mut results = Vec::with_capacity(lists.len());
    for list in lists {
        let result = api::list_tasks(&list.id).await;
        results.push((list.clone(), result));
    }

    let merged = merge_list_results(results);
    for (title, err) in &merged.failed {
        web_sys::console::error_1(&format!("[LOAD] Error loading tasks from list {}: {}", title, err).into());
    }
    merged.tasks
}

/// Full board refresh: lists (first time only), tasks, stored matrix.
///
/// Not debounced; overlapping refreshes finish in any order and the last
/// one to land wins.
pub async fn refresh_board(store: AppStore) {
    store.refreshing().set(true);

    let mut lists = store.board().read_untracked().lists().to_vec();
    if lists.is_empty() {
        lists = load_task_lists().await;
    }
    let tasks = load_tasks(&lists).await;

    let persisted = MatrixStore::local();
    let matrix = persisted.read_assignment().unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("[LOAD] Ignoring stored matrix: {}", e).into());
        MatrixAssignment::default()
    });
    let cleared = persisted.read_cleared_completed().unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("[LOAD] Ignoring cleared tasks: {}", e).into());
        ClearedCompleted::new()
    });

    {
        let board_field = store.board();
        let mut board = board_field.write();
        board.set_lists(lists);
        let dropped = board.load(tasks, matrix, cleared);
        web_sys::console::log_1(
            &format!("[LOAD] {} tasks loaded, {} stale matrix ids dropped", board.tasks().len(), dropped).into(),
        );
    }

    store.refreshing().set(false);
}
