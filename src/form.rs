//! Task form fields
//!
//! Values behind the add/edit modal and their conversion to a draft.

use chrono::{DateTime, NaiveDate, Utc};

use crate::context::FormTarget;
use crate::dispatcher::TaskDraft;
use crate::models::TaskList;

/// `<input type="date">` value format
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    /// Set when editing
    pub task_id: Option<String>,
    pub list_id: String,
    pub title: String,
    pub notes: String,
    /// Raw date input value, empty when unset
    pub due: String,
}

impl FormFields {
    /// Fields for a freshly opened form: the task's values on edit, the
    /// first list on create.
    pub fn for_target(target: &FormTarget, lists: &[TaskList]) -> Self {
        match target {
            FormTarget::New => Self {
                list_id: lists.first().map(|l| l.id.clone()).unwrap_or_default(),
                ..Default::default()
            },
            FormTarget::Edit(task) => Self {
                task_id: Some(task.id.clone()),
                list_id: task.list_id.clone(),
                title: task.title.clone(),
                notes: task.notes.clone().unwrap_or_default(),
                due: due_input_value(task.due),
            },
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.task_id.is_some() {
            "Edit Task"
        } else {
            "Add Task"
        }
    }

    /// The draft to submit; `None` while the title or list is missing.
    pub fn to_draft(&self) -> Option<TaskDraft> {
        if self.title.trim().is_empty() || self.list_id.is_empty() {
            return None;
        }
        Some(TaskDraft {
            title: self.title.clone(),
            notes: self.notes.clone(),
            due: parse_due_input(&self.due),
        })
    }
}

/// Stored due dates are UTC midnight; the input shows that calendar day.
pub fn due_input_value(due: Option<DateTime<Utc>>) -> String {
    due.map(|d| d.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn parse_due_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{list, task};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_form_defaults_to_first_list() {
        let fields = FormFields::for_target(&FormTarget::New, &[list("l1"), list("l2")]);
        assert_eq!(fields.list_id, "l1");
        assert_eq!(fields.task_id, None);
        assert_eq!(fields.heading(), "Add Task");

        let empty = FormFields::for_target(&FormTarget::New, &[]);
        assert_eq!(empty.list_id, "");
    }

    #[test]
    fn test_edit_form_uses_task_values() {
        let mut t = task("t1", "l2", Some((2024, 2, 29)));
        t.notes = Some("bring slides".to_string());
        let fields = FormFields::for_target(&FormTarget::Edit(t), &[list("l1"), list("l2")]);
        assert_eq!(fields.task_id.as_deref(), Some("t1"));
        assert_eq!(fields.list_id, "l2");
        assert_eq!(fields.notes, "bring slides");
        assert_eq!(fields.due, "2024-02-29");
        assert_eq!(fields.heading(), "Edit Task");
    }

    #[test]
    fn test_draft_requires_title_and_list() {
        let mut fields = FormFields { list_id: "l1".to_string(), ..Default::default() };
        assert_eq!(fields.to_draft(), None);

        fields.title = "Write report".to_string();
        fields.due = "2024-05-01".to_string();
        let draft = fields.to_draft().unwrap();
        assert_eq!(draft.due, NaiveDate::from_ymd_opt(2024, 5, 1));

        fields.list_id.clear();
        assert_eq!(fields.to_draft(), None);
    }

    #[test]
    fn test_bad_date_input_is_no_due() {
        assert_eq!(parse_due_input(""), None);
        assert_eq!(parse_due_input("05/01/2024"), None);
    }
}
