//! Task card view model
//!
//! Everything a rendered card needs, computed from a task and where it sits.

use chrono::{DateTime, Utc};

use crate::models::{Quadrant, Task};

const NOTES_PREVIEW_CHARS: usize = 50;

/// Overflow menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    RemoveFromMatrix,
    Delete,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Edit => "Edit",
            CardAction::RemoveFromMatrix => "Remove from Matrix",
            CardAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub list_id: String,
    pub title: String,
    pub list_title: Option<String>,
    pub due_label: Option<String>,
    pub notes_preview: Option<String>,
    pub completed: bool,
    pub overdue: bool,
    pub quadrant: Option<Quadrant>,
    pub actions: Vec<CardAction>,
}

impl CardView {
    pub fn new(task: &Task, quadrant: Option<Quadrant>, now: DateTime<Utc>) -> Self {
        let mut actions = vec![CardAction::Edit];
        if quadrant.is_some() {
            actions.push(CardAction::RemoveFromMatrix);
        }
        actions.push(CardAction::Delete);

        Self {
            id: task.id.clone(),
            list_id: task.list_id.clone(),
            title: task.title.clone(),
            list_title: Some(task.list_title.clone()).filter(|t| !t.is_empty()),
            // Google stores due dates as UTC midnight; show that calendar day
            due_label: task.due.map(|d| format!("Due: {}", d.format("%b %-d, %Y"))),
            notes_preview: task.notes.as_deref().and_then(notes_preview),
            completed: task.is_completed(),
            overdue: task.is_overdue(now),
            quadrant,
            actions,
        }
    }

    pub fn css_class(&self) -> String {
        let mut class = String::from("task-item");
        if self.completed {
            class.push_str(" completed");
        }
        if self.overdue {
            class.push_str(" overdue");
        }
        class
    }
}

fn notes_preview(notes: &str) -> Option<String> {
    let notes = notes.trim();
    if notes.is_empty() {
        return None;
    }
    let mut preview: String = notes.chars().take(NOTES_PREVIEW_CHARS).collect();
    if notes.chars().count() > NOTES_PREVIEW_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}
