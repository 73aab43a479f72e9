//! Mutation Dispatcher
//!
//! Task writes against the proxy. Each [`Mutation`] knows the request it
//! sends and what the board should do once the server answers; the UI
//! applies the returned [`Followup`].

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::api::{self, ApiError, ApiRequest, Method};
use crate::board::Board;
use crate::context::AppContext;
use crate::models::{Task, TaskStatus};
use crate::store::{AppStateStoreFields, AppStore};
use leptos::prelude::Write;

pub const SAVE_FAILED: &str = "Error saving task";
pub const DELETE_FAILED: &str = "Error deleting task";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this task?";

/// What the task form produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub notes: String,
    /// Day picked in the date input
    pub due: Option<NaiveDate>,
}

/// JSON body for create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub notes: String,
    pub due: Option<String>,
}

/// Local midnight of `day`, expressed in UTC.
pub fn normalize_due(day: NaiveDate, local_offset: FixedOffset) -> DateTime<Utc> {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    match local_offset.from_local_datetime(&midnight).single() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&midnight),
    }
}

impl TaskPayload {
    pub fn from_draft(draft: &TaskDraft, local_offset: FixedOffset) -> Self {
        Self {
            title: draft.title.trim().to_string(),
            notes: draft.notes.clone(),
            due: draft
                .due
                .map(|day| normalize_due(day, local_offset).to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { list_id: String, payload: TaskPayload },
    Update { list_id: String, task_id: String, payload: TaskPayload },
    Complete { list_id: String, task_id: String },
    Uncomplete { list_id: String, task_id: String },
    Delete { list_id: String, task_id: String },
}

/// What the board does after a mutation settles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Followup {
    pub reload: bool,
    pub close_form: bool,
    pub alert: Option<&'static str>,
    pub local_status: Option<(String, TaskStatus)>,
    pub log: Option<String>,
}

impl Followup {
    /// Apply a confirmed status change. A failed toggle carries none, so
    /// the board (and the checkbox bound to it) keeps the old status.
    pub fn apply_status(&self, board: &mut Board) -> bool {
        match &self.local_status {
            Some((task_id, status)) => board.set_status(task_id, *status),
            None => false,
        }
    }
}

impl Mutation {
    /// Create when `task_id` is `None`, otherwise update.
    pub fn save(list_id: &str, task_id: Option<&str>, draft: &TaskDraft, local_offset: FixedOffset) -> Self {
        let payload = TaskPayload::from_draft(draft, local_offset);
        match task_id {
            Some(task_id) => Mutation::Update {
                list_id: list_id.to_string(),
                task_id: task_id.to_string(),
                payload,
            },
            None => Mutation::Create { list_id: list_id.to_string(), payload },
        }
    }

    /// Complete an open task, reopen a completed one.
    pub fn toggle_completion(task: &Task) -> Self {
        let list_id = task.list_id.clone();
        let task_id = task.id.clone();
        if task.is_completed() {
            Mutation::Uncomplete { list_id, task_id }
        } else {
            Mutation::Complete { list_id, task_id }
        }
    }

    pub fn delete(task: &Task) -> Self {
        Mutation::Delete { list_id: task.list_id.clone(), task_id: task.id.clone() }
    }

    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            Mutation::Delete { .. } => Some(DELETE_CONFIRM),
            _ => None,
        }
    }

    pub fn request(&self) -> ApiRequest {
        match self {
            Mutation::Create { list_id, payload } => ApiRequest {
                method: Method::Post,
                path: api::list_tasks_path(list_id),
                body: serde_json::to_string(payload).ok(),
            },
            Mutation::Update { list_id, task_id, payload } => ApiRequest {
                method: Method::Patch,
                path: api::task_path(list_id, task_id),
                body: serde_json::to_string(payload).ok(),
            },
            Mutation::Complete { list_id, task_id } => ApiRequest {
                method: Method::Post,
                path: api::complete_path(list_id, task_id),
                body: None,
            },
            Mutation::Uncomplete { list_id, task_id } => ApiRequest {
                method: Method::Patch,
                path: api::task_path(list_id, task_id),
                body: Some(format!(r#"{{"status":"{}"}}"#, TaskStatus::NeedsAction.as_str())),
            },
            Mutation::Delete { list_id, task_id } => ApiRequest {
                method: Method::Delete,
                path: api::task_path(list_id, task_id),
                body: None,
            },
        }
    }

    /// Decide the followup from the response status (or transport error).
    pub fn settle(&self, outcome: &Result<u16, ApiError>) -> Followup {
        let ok = matches!(outcome, Ok(status) if (200..300).contains(status));
        let failure = match outcome {
            Ok(status) => format!("status {}", status),
            Err(e) => e.to_string(),
        };

        match self {
            Mutation::Create { .. } | Mutation::Update { .. } => {
                if ok {
                    Followup { reload: true, close_form: true, ..Default::default() }
                } else {
                    Followup {
                        alert: Some(SAVE_FAILED),
                        log: Some(format!("Error saving task: {}", failure)),
                        ..Default::default()
                    }
                }
            }
            Mutation::Delete { .. } => {
                if ok {
                    Followup { reload: true, ..Default::default() }
                } else {
                    Followup {
                        alert: Some(DELETE_FAILED),
                        log: Some(format!("Error deleting task: {}", failure)),
                        ..Default::default()
                    }
                }
            }
            Mutation::Complete { task_id, .. } | Mutation::Uncomplete { task_id, .. } => {
                let (status, verb) = match self {
                    Mutation::Complete { .. } => (TaskStatus::Completed, "completing"),
                    _ => (TaskStatus::NeedsAction, "uncompleting"),
                };
                if ok {
                    Followup { local_status: Some((task_id.clone(), status)), ..Default::default() }
                } else {
                    Followup {
                        log: Some(format!("Error {} task: {}", verb, failure)),
                        ..Default::default()
                    }
                }
            }
        }
    }
}

/// Send the mutation and settle it.
pub async fn dispatch(mutation: &Mutation) -> Followup {
    let outcome = api::send_for_status(&mutation.request()).await;
    mutation.settle(&outcome)
}

/// Ask before a destructive mutation; true when it may go ahead.
pub fn confirmed(mutation: &Mutation) -> bool {
    let Some(question) = mutation.confirmation() else {
        return true;
    };
    web_sys::window()
        .and_then(|w| w.confirm_with_message(question).ok())
        .unwrap_or(false)
}

/// Dispatch and apply the followup to the board.
pub async fn run_mutation(mutation: Mutation, store: AppStore, ctx: AppContext) {
    let request = mutation.request();
    web_sys::console::log_1(&format!("[MUTATION] {} {}", request.method.as_str(), request.path).into());
    let followup = dispatch(&mutation).await;

    if let Some(message) = &followup.log {
        web_sys::console::error_1(&format!("[MUTATION] {}", message).into());
    }
    if let Some(alert) = followup.alert {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(alert);
        }
    }
    if followup.local_status.is_some() {
        followup.apply_status(&mut store.board().write());
    }
    if followup.close_form {
        ctx.close_form();
    }
    if followup.reload {
        ctx.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{completed, task};
    use pretty_assertions::assert_eq;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_normalize_due_local_midnight() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let berlin = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(normalize_due(day, berlin).to_rfc3339(), "2024-03-09T23:00:00+00:00");
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(normalize_due(day, new_york).to_rfc3339(), "2024-03-10T05:00:00+00:00");
    }

    #[test]
    fn test_create_request() {
        let draft = TaskDraft {
            title: " Plan sprint ".to_string(),
            notes: "agenda".to_string(),
            due: NaiveDate::from_ymd_opt(2024, 1, 5),
        };
        let mutation = Mutation::save("l1", None, &draft, utc());
        let req = mutation.request();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/tasks/l1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "title": "Plan sprint",
                "notes": "agenda",
                "due": "2024-01-05T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_update_without_due_sends_null() {
        let draft = TaskDraft { title: "t".to_string(), ..Default::default() };
        let req = Mutation::save("l1", Some("t1"), &draft, utc()).request();
        assert_eq!(req.method, Method::Patch);
        assert_eq!(req.path, "/tasks/l1/t1");
        assert!(req.body.unwrap().contains(r#""due":null"#));
    }

    #[test]
    fn test_save_followups() {
        let mutation = Mutation::save("l1", None, &TaskDraft::default(), utc());
        assert_eq!(
            mutation.settle(&Ok(201)),
            Followup { reload: true, close_form: true, ..Default::default() }
        );
        let failed = mutation.settle(&Err(ApiError::Network("offline".to_string())));
        assert_eq!(failed.alert, Some(SAVE_FAILED));
        assert!(!failed.reload);
        assert!(!failed.close_form);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mutation = Mutation::delete(&task("t9", "l3", None));
        assert_eq!(mutation.confirmation(), Some(DELETE_CONFIRM));
        let req = mutation.request();
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "/tasks/l3/t9");
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_delete_204_reloads_500_alerts() {
        let mutation = Mutation::delete(&task("t9", "l3", None));
        let ok = mutation.settle(&Ok(204));
        assert!(ok.reload);
        assert_eq!(ok.alert, None);

        let failed = mutation.settle(&Ok(500));
        assert!(!failed.reload);
        assert_eq!(failed.alert, Some(DELETE_FAILED));
    }

    #[test]
    fn test_complete_is_local_only() {
        let mutation = Mutation::toggle_completion(&task("t1", "l1", None));
        let req = mutation.request();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/tasks/l1/t1/complete");

        let ok = mutation.settle(&Ok(200));
        assert_eq!(ok.local_status, Some(("t1".to_string(), TaskStatus::Completed)));
        assert!(!ok.reload);

        let failed = mutation.settle(&Ok(500));
        assert_eq!(failed.local_status, None);
        assert_eq!(failed.alert, None);
        assert!(failed.log.is_some());
    }

    #[test]
    fn test_failed_toggle_leaves_board_status() {
        let mut board = Board::default();
        board.load(
            vec![task("t1", "l1", None)],
            crate::matrix::MatrixAssignment::default(),
            crate::persistence::ClearedCompleted::new(),
        );
        let mutation = Mutation::toggle_completion(board.task("t1").unwrap());

        assert!(!mutation.settle(&Ok(500)).apply_status(&mut board));
        assert!(!mutation.settle(&Err(ApiError::Network("offline".to_string()))).apply_status(&mut board));
        assert!(!board.is_completed("t1"));

        assert!(mutation.settle(&Ok(200)).apply_status(&mut board));
        assert!(board.is_completed("t1"));
    }

    #[test]
    fn test_uncomplete_patches_status() {
        let mutation = Mutation::toggle_completion(&completed(task("t1", "l1", None)));
        let req = mutation.request();
        assert_eq!(req.method, Method::Patch);
        assert_eq!(req.body.as_deref(), Some(r#"{"status":"needsAction"}"#));
        assert_eq!(
            mutation.settle(&Ok(200)).local_status,
            Some(("t1".to_string(), TaskStatus::NeedsAction))
        );
        assert!(mutation.confirmation().is_none());
    }
}
