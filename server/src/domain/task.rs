//! Task write bodies

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fields accepted when creating a task; anything else in the body is
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
}

/// Patch marking a task completed at `now`
pub fn completion_patch(now: DateTime<Utc>) -> Value {
    json!({
        "status": "completed",
        "completed": now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_task_picks_known_fields() {
        let body = r#"{"title":"Call","notes":"re: invoice","due":null,"status":"completed","id":"x"}"#;
        let task: NewTask = serde_json::from_str(body).unwrap();
        assert_eq!(
            task,
            NewTask {
                title: "Call".to_string(),
                notes: Some("re: invoice".to_string()),
                due: None,
                starred: None,
            }
        );
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({"title": "Call", "notes": "re: invoice"})
        );
    }

    #[test]
    fn test_completion_patch() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            completion_patch(now),
            json!({"status": "completed", "completed": "2024-01-02T03:04:05.000Z"})
        );
    }
}
