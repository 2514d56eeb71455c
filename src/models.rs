//! Core data models for the gateway.
//!
//! Upstream entity types ([`Task`], [`Project`]) are deserialized straight
//! from the Todoist REST v2 payloads. The wire shapes returned to clients
//! ([`SearchResultItem`], [`FetchRecord`]) are built from them by the
//! matcher and normalizer.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// REST v2 serializes entity ids as JSON strings; older payloads and test
/// fixtures use numbers. Accept both and normalize to `u64`.
fn numeric_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric entity id '{}'", s))),
    }
}

/// A task's due date: a calendar date, optionally with a specific time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Due {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
}

/// An active task as returned by `GET /tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "numeric_id")]
    pub id: u64,
    /// Todoist calls the task title `content`.
    #[serde(rename = "content")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due: Option<Due>,
    /// 1–4, where 4 is the highest.
    pub priority: u8,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "numeric_id")]
    pub project_id: u64,
}

impl Task {
    /// Human-readable display text: the title, annotated with scheduling
    /// info when the task has a due date. Undated tasks render as the bare
    /// title — no dangling punctuation.
    pub fn display_text(&self) -> String {
        match &self.due {
            Some(due) => format!(
                "{}  (due: {}, priority: {})",
                self.title, due.date, self.priority
            ),
            None => self.title.clone(),
        }
    }
}

/// A project as returned by `GET /projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "numeric_id")]
    pub id: u64,
    pub name: String,
}

impl Project {
    /// Display text for a project is the name alone.
    pub fn display_text(&self) -> String {
        self.name.clone()
    }
}

/// A resolved entity. Task and project ids are unique only within their
/// kind, so the kind travels with the record everywhere.
#[derive(Debug, Clone)]
pub enum Entity {
    Task(Task),
    Project(Project),
}

/// One search hit, matching the `search` response contract.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Structured metadata attached to fetched task records.
///
/// `labels` is always emitted (empty, not absent); `due` only when the task
/// has a due date.
#[derive(Debug, Clone, Serialize)]
pub struct TaskMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
    pub priority: u8,
    pub labels: Vec<String>,
    pub project_id: u64,
}

/// A full record returned by `fetch`.
///
/// Serialized untagged, so the variant fields are the payload. Only the
/// task variant carries `metadata` — a project record structurally cannot.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FetchRecord {
    Task {
        id: String,
        title: String,
        text: String,
        url: String,
        metadata: TaskMetadata,
    },
    Project {
        id: String,
        title: String,
        text: String,
        url: String,
    },
}

impl FetchRecord {
    pub fn id(&self) -> &str {
        match self {
            FetchRecord::Task { id, .. } | FetchRecord::Project { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FetchRecord::Task { title, .. } | FetchRecord::Project { title, .. } => title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchRecord::Task { url, .. } | FetchRecord::Project { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_accepts_string_and_numeric_ids() {
        let from_strings: Task = serde_json::from_str(
            r#"{"id": "2995104339", "content": "Buy milk", "priority": 1, "project_id": "2203309130"}"#,
        )
        .unwrap();
        assert_eq!(from_strings.id, 2995104339);
        assert_eq!(from_strings.project_id, 2203309130);

        let from_numbers: Task = serde_json::from_str(
            r#"{"id": 111, "content": "Buy milk", "priority": 1, "project_id": 42}"#,
        )
        .unwrap();
        assert_eq!(from_numbers.id, 111);
    }

    #[test]
    fn task_rejects_non_numeric_id() {
        let result: Result<Task, _> = serde_json::from_str(
            r#"{"id": "abc", "content": "Buy milk", "priority": 1, "project_id": 1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn due_parses_date_only_payload() {
        let due: Due = serde_json::from_str(r#"{"date": "2027-01-15", "string": "Jan 15"}"#).unwrap();
        assert_eq!(due.date.to_string(), "2027-01-15");
        assert!(due.datetime.is_none());
    }

    #[test]
    fn project_record_serializes_without_metadata_key() {
        let record = FetchRecord::Project {
            id: "project:7".to_string(),
            title: "Inbox".to_string(),
            text: "Inbox".to_string(),
            url: "https://todoist.com/showProject?id=7".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("metadata").is_none());
        assert_eq!(value["id"], "project:7");
    }
}
