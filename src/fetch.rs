//! Full-record retrieval by identifier.
//!
//! Resolves an opaque `"<kind>:<id>"` identifier against a fresh upstream
//! listing and normalizes the entity into the two-shape response contract:
//! tasks carry structured metadata, projects never do. Used by the CLI, the
//! JSON tool API, and the MCP bridge.

use anyhow::Result;

use crate::config::Config;
use crate::error::GatewayError;
use crate::ident::{decode, encode, EntityKind};
use crate::models::{Entity, FetchRecord, TaskMetadata};
use crate::upstream::UpstreamClient;

/// Normalize one resolved entity into the full-detail record shape.
pub fn normalize(entity: &Entity) -> FetchRecord {
    match entity {
        Entity::Task(task) => FetchRecord::Task {
            id: encode(EntityKind::Task, task.id),
            title: task.title.clone(),
            text: task.display_text(),
            url: EntityKind::Task.deep_link(task.id),
            metadata: TaskMetadata {
                due: task.due.clone(),
                priority: task.priority,
                labels: task.labels.clone(),
                project_id: task.project_id,
            },
        },
        Entity::Project(project) => FetchRecord::Project {
            id: encode(EntityKind::Project, project.id),
            title: project.name.clone(),
            text: project.display_text(),
            url: EntityKind::Project.deep_link(project.id),
        },
    }
}

/// Resolve an identifier against the current upstream state and return the
/// normalized record.
///
/// Both listings are read concurrently; the entity is located in the one
/// the decoded kind names. A well-formed identifier that matches nothing
/// (e.g. the task was completed or deleted since it was searched) fails
/// with [`GatewayError::NotFound`].
pub async fn fetch_gateway(config: &Config, identifier: &str) -> Result<FetchRecord, GatewayError> {
    let (kind, id) = decode(identifier)?;

    let client = UpstreamClient::new(config)?;
    let (tasks, projects) = tokio::try_join!(client.list_tasks(), client.list_projects())?;

    let entity = match kind {
        EntityKind::Task => tasks
            .into_iter()
            .find(|t| t.id == id)
            .map(Entity::Task),
        EntityKind::Project => projects
            .into_iter()
            .find(|p| p.id == id)
            .map(Entity::Project),
    };

    match entity {
        Some(entity) => Ok(normalize(&entity)),
        None => Err(GatewayError::NotFound(format!(
            "no {} with id {} upstream",
            kind.tag(),
            id
        ))),
    }
}

/// CLI entry point for `taskgate fetch <id>`.
pub async fn run_fetch(config: &Config, identifier: &str) -> Result<()> {
    let record = fetch_gateway(config, identifier).await?;

    println!("id:    {}", record.id());
    println!("title: {}", record.title());
    println!("url:   {}", record.url());
    println!();
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Due, Project, Task};

    fn draft_report() -> Task {
        Task {
            id: 111,
            title: "Draft report".to_string(),
            description: None,
            due: None,
            priority: 2,
            labels: Vec::new(),
            project_id: 42,
        }
    }

    #[test]
    fn undated_task_metadata_has_no_due_key_and_empty_labels() {
        let record = normalize(&Entity::Task(draft_report()));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], "task:111");
        assert_eq!(value["title"], "Draft report");
        assert_eq!(value["text"], "Draft report");
        assert_eq!(value["url"], "https://todoist.com/showTask?id=111");
        assert_eq!(value["metadata"]["priority"], 2);
        assert_eq!(value["metadata"]["project_id"], 42);
        assert_eq!(value["metadata"]["labels"], serde_json::json!([]));
        assert!(value["metadata"].get("due").is_none());
    }

    #[test]
    fn dated_task_metadata_carries_the_due_object() {
        let mut task = draft_report();
        task.due = Some(Due {
            date: "2027-03-01".parse().unwrap(),
            datetime: None,
        });
        task.labels = vec!["work".to_string(), "urgent".to_string()];

        let value = serde_json::to_value(normalize(&Entity::Task(task))).unwrap();
        assert_eq!(value["metadata"]["due"]["date"], "2027-03-01");
        assert_eq!(
            value["metadata"]["labels"],
            serde_json::json!(["work", "urgent"])
        );
    }

    #[test]
    fn project_record_never_carries_metadata() {
        let project = Project {
            id: 2203309130,
            name: "Shopping List".to_string(),
        };
        let value = serde_json::to_value(normalize(&Entity::Project(project))).unwrap();

        assert_eq!(value["id"], "project:2203309130");
        assert_eq!(value["title"], "Shopping List");
        assert_eq!(value["text"], "Shopping List");
        assert!(value.get("metadata").is_none());
    }
}
