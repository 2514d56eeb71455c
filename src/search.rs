//! Free-text search over upstream tasks and projects.
//!
//! The matcher itself ([`match_entities`]) is a pure function over the
//! entity sets fetched for this one query — there is no index and no cache.
//! [`search_gateway`] is the shared entry point used by the CLI, the JSON
//! tool API, and the MCP bridge.
//!
//! # Matching Rules
//!
//! - Case-insensitive substring containment: a task matches on its title or
//!   description, a project on its name.
//! - An empty (or whitespace-only) query matches everything — the client's
//!   "list all" mode.
//! - Ordering: matching tasks first, then matching projects, each in the
//!   order the upstream returned them. No secondary scoring.

use anyhow::Result;

use crate::config::Config;
use crate::error::GatewayError;
use crate::ident::{encode, EntityKind};
use crate::models::{Project, SearchResultItem, Task};
use crate::upstream::UpstreamClient;

/// Result cap applied when the caller does not specify one.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Snippets are clipped to this many bytes (on a char boundary).
const SNIPPET_MAX: usize = 200;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

fn clip(text: String) -> String {
    if text.len() <= SNIPPET_MAX {
        return text;
    }
    let mut end = SNIPPET_MAX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Match a free-text query against the given entity sets.
///
/// Pure: ordering and content depend only on the arguments. At most
/// `limit` results are returned, tasks before projects.
pub fn match_entities(
    query: &str,
    tasks: &[Task],
    projects: &[Project],
    limit: usize,
) -> Vec<SearchResultItem> {
    let needle = query.trim().to_lowercase();
    let mut results = Vec::new();

    for task in tasks {
        if results.len() >= limit {
            return results;
        }
        let in_title = contains_ci(&task.title, &needle);
        let in_description = task
            .description
            .as_deref()
            .map(|d| contains_ci(d, &needle))
            .unwrap_or(false);
        if in_title || in_description {
            results.push(SearchResultItem {
                id: encode(EntityKind::Task, task.id),
                title: task.title.clone(),
                text: clip(task.display_text()),
                url: EntityKind::Task.deep_link(task.id),
            });
        }
    }

    for project in projects {
        if results.len() >= limit {
            break;
        }
        if contains_ci(&project.name, &needle) {
            results.push(SearchResultItem {
                id: encode(EntityKind::Project, project.id),
                title: project.name.clone(),
                text: clip(project.display_text()),
                url: EntityKind::Project.deep_link(project.id),
            });
        }
    }

    results
}

/// Fetch the current entity sets and match the query against them.
///
/// The two upstream listings are independent reads and run concurrently.
pub async fn search_gateway(
    config: &Config,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchResultItem>, GatewayError> {
    let client = UpstreamClient::new(config)?;
    let (tasks, projects) = tokio::try_join!(client.list_tasks(), client.list_projects())?;
    Ok(match_entities(query, &tasks, &projects, limit))
}

/// CLI entry point — calls [`search_gateway`] and prints results to stdout.
pub async fn run_search(config: &Config, query: &str, limit: Option<usize>) -> Result<()> {
    let results = search_gateway(config, query, limit.unwrap_or(DEFAULT_RESULT_LIMIT)).await?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("{}. {}", i + 1, result.text);
        println!("    id: {}", result.id);
        println!("    url: {}", result.url);
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Due;

    fn task(id: u64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            due: None,
            priority: 1,
            labels: Vec::new(),
            project_id: 1,
        }
    }

    fn project(id: u64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let tasks = vec![task(1, "Pay Electric Bill")];
        let results = match_entities("bill", &tasks, &[], DEFAULT_RESULT_LIMIT);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "task:1");
    }

    #[test]
    fn tasks_precede_projects_for_the_same_query() {
        let tasks = vec![task(1, "Groceries list")];
        let projects = vec![project(9, "Groceries")];
        let results = match_entities("groceries", &tasks, &projects, DEFAULT_RESULT_LIMIT);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "task:1");
        assert_eq!(results[1].id, "project:9");
    }

    #[test]
    fn description_matches_count() {
        let mut t = task(1, "Weekly review");
        t.description = Some("Summarize the quarterly billing report".to_string());
        let results = match_entities("billing", &[t], &[], DEFAULT_RESULT_LIMIT);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn empty_query_lists_everything() {
        let tasks = vec![task(1, "One"), task(2, "Two")];
        let projects = vec![project(3, "Three")];
        let results = match_entities("", &tasks, &projects, DEFAULT_RESULT_LIMIT);
        assert_eq!(results.len(), 3);

        let whitespace = match_entities("   ", &tasks, &projects, DEFAULT_RESULT_LIMIT);
        assert_eq!(whitespace.len(), 3);
    }

    #[test]
    fn limit_caps_results_tasks_first() {
        let tasks: Vec<Task> = (1..=8).map(|i| task(i, "match me")).collect();
        let projects = vec![project(1, "match me too")];
        let results = match_entities("match", &tasks, &projects, 5);
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.id.starts_with("task:")));
    }

    #[test]
    fn upstream_order_is_preserved_within_a_kind() {
        let tasks = vec![task(30, "draft a"), task(10, "draft b"), task(20, "draft c")];
        let results = match_entities("draft", &tasks, &[], DEFAULT_RESULT_LIMIT);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["task:30", "task:10", "task:20"]);
    }

    #[test]
    fn dated_task_gets_due_and_priority_annotation() {
        let mut t = task(1, "File taxes");
        t.priority = 4;
        t.due = Some(Due {
            date: "2027-04-15".parse().unwrap(),
            datetime: None,
        });
        let results = match_entities("taxes", &[t], &[], DEFAULT_RESULT_LIMIT);
        assert_eq!(results[0].text, "File taxes  (due: 2027-04-15, priority: 4)");
    }

    #[test]
    fn undated_task_renders_as_bare_title() {
        let mut t = task(111, "Draft report");
        t.priority = 2;
        let results = match_entities("draft", &[t], &[], DEFAULT_RESULT_LIMIT);
        assert_eq!(results[0].id, "task:111");
        assert_eq!(results[0].title, "Draft report");
        assert_eq!(results[0].text, "Draft report");
        assert_eq!(results[0].url, "https://todoist.com/showTask?id=111");
    }

    #[test]
    fn long_snippets_are_clipped_on_a_char_boundary() {
        let t = task(1, &"é".repeat(300));
        let results = match_entities("", &[t], &[], DEFAULT_RESULT_LIMIT);
        assert!(results[0].text.len() <= 200);
        assert!(results[0].text.chars().all(|c| c == 'é'));
    }

    #[test]
    fn project_text_is_the_name_alone() {
        let projects = vec![project(7, "Renovation")];
        let results = match_entities("renov", &[], &projects, DEFAULT_RESULT_LIMIT);
        assert_eq!(results[0].text, "Renovation");
        assert_eq!(results[0].url, "https://todoist.com/showProject?id=7");
    }
}
