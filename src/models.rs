//! Frontend Models
//!
//! Data structures matching the task proxy's JSON, plus the four matrix
//! quadrants.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remote task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "needsAction")]
    NeedsAction,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NeedsAction => "needsAction",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

/// Task data structure (matches the proxy response)
///
/// `list_id` and `list_title` are not sent by the server; the task store
/// client fills them in after fetching each list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub list_title: String,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Due before `now` and still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due.is_some_and(|due| due < now)
    }
}

/// Task list data structure (matches the proxy response)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// `{ "items": [...] }` envelope; Google omits `items` for empty lists.
#[derive(Debug, Clone, Deserialize)]
pub struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Eisenhower matrix quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    UrgentImportant,
    UrgentNotImportant,
    NotUrgentImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    /// Display order: top-left, top-right, bottom-left, bottom-right
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::NotUrgentImportant => "not-urgent-important",
            Quadrant::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Quadrant::ALL.into_iter().find(|q| q.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Do First",
            Quadrant::NotUrgentImportant => "Schedule",
            Quadrant::UrgentNotImportant => "Delegate",
            Quadrant::NotUrgentNotImportant => "Eliminate",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & Important",
            Quadrant::NotUrgentImportant => "Not Urgent & Important",
            Quadrant::UrgentNotImportant => "Urgent & Not Important",
            Quadrant::NotUrgentNotImportant => "Not Urgent & Not Important",
        }
    }
}

/// Earliest due first; undated tasks after every dated one.
pub fn due_order(a: &Task, b: &Task) -> Ordering {
    match (a.due, b.due) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by [`due_order`]
pub fn sort_by_due(tasks: &mut [Task]) {
    tasks.sort_by(due_order);
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn task(id: &str, list_id: &str, due: Option<(i32, u32, u32)>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            notes: None,
            due: due.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            status: TaskStatus::NeedsAction,
            completed: None,
            list_id: list_id.to_string(),
            list_title: format!("List {}", list_id),
        }
    }

    pub fn completed(mut task: Task) -> Task {
        task.status = TaskStatus::Completed;
        task
    }

    pub fn list(id: &str) -> TaskList {
        TaskList { id: id.to_string(), title: format!("List {}", id) }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::task;
    use super::*;
    use chrono::TimeZone;

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_undated_last() {
        let mut tasks = vec![
            task("a", "l1", Some((2024, 1, 5))),
            task("b", "l1", Some((2024, 1, 1))),
            task("c", "l1", None),
        ];
        sort_by_due(&mut tasks);
        assert_eq!(ids(&tasks), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_any_input_order() {
        let mut tasks = vec![
            task("u1", "l1", None),
            task("d3", "l1", Some((2024, 3, 1))),
            task("u2", "l1", None),
            task("d1", "l1", Some((2023, 12, 31))),
            task("d2", "l1", Some((2024, 2, 29))),
        ];
        sort_by_due(&mut tasks);
        assert_eq!(ids(&tasks), vec!["d1", "d2", "d3", "u1", "u2"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut tasks = vec![
            task("x", "l1", Some((2024, 1, 1))),
            task("y", "l2", Some((2024, 1, 1))),
            task("z", "l1", Some((2024, 1, 1))),
        ];
        sort_by_due(&mut tasks);
        assert_eq!(ids(&tasks), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_overdue() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        assert!(task("a", "l", Some((2024, 1, 1))).is_overdue(now));
        assert!(!task("a", "l", Some((2024, 1, 4))).is_overdue(now));
        assert!(!task("a", "l", None).is_overdue(now));
        assert!(!super::fixtures::completed(task("a", "l", Some((2024, 1, 1)))).is_overdue(now));
    }

    #[test]
    fn test_task_deserialization() {
        let json = r#"{
            "kind": "tasks#task",
            "id": "t1",
            "title": "Write report",
            "status": "completed",
            "due": "2024-01-05T00:00:00.000Z",
            "completed": "2024-01-04T10:30:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.due, Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()));
        assert!(task.list_id.is_empty());
    }

    #[test]
    fn test_items_envelope_without_items() {
        let parsed: Items<TaskList> = serde_json::from_str(r#"{"kind":"tasks#taskLists"}"#).unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_quadrant_names() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::parse(q.as_str()), Some(q));
            assert_eq!(serde_json::to_string(&q).unwrap(), format!("\"{}\"", q.as_str()));
        }
        assert_eq!(Quadrant::parse("backlog"), None);
    }
}
