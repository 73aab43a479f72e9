//! Task Endpoints
//!
//! Path builders for the `/tasks` proxy and the two read calls.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::{fetch_json, ApiError, ApiRequest};
use crate::models::{Items, Task, TaskList};

/// Characters escaped inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

// ========================
// Paths
// ========================

pub fn lists_path() -> String {
    "/tasks/lists".to_string()
}

pub fn list_tasks_path(list_id: &str) -> String {
    format!("/tasks/{}", segment(list_id))
}

pub fn task_path(list_id: &str, task_id: &str) -> String {
    format!("/tasks/{}/{}", segment(list_id), segment(task_id))
}

pub fn complete_path(list_id: &str, task_id: &str) -> String {
    format!("{}/complete", task_path(list_id, task_id))
}

// ========================
// Reads
// ========================

pub async fn list_task_lists() -> Result<Vec<TaskList>, ApiError> {
    let envelope: Items<TaskList> = fetch_json(&ApiRequest::get(lists_path())).await?;
    Ok(envelope.items)
}

/// Tasks of one list, completed ones included
pub async fn list_tasks(list_id: &str) -> Result<Vec<Task>, ApiError> {
    let envelope: Items<Task> = fetch_json(&ApiRequest::get(list_tasks_path(list_id))).await?;
    Ok(envelope.items)
}
