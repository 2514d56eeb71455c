//! Identifier codec.
//!
//! Clients never see raw upstream ids. Search results carry an opaque
//! `"<kind>:<numeric-id>"` identifier (e.g. `task:2995104339`), and fetch
//! accepts only that form. The kind tag keeps task and project id spaces
//! apart — upstream ids are unique only within a kind.

use crate::error::GatewayError;

/// The two entity kinds the gateway serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Project,
}

impl EntityKind {
    /// The identifier tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Task => "task",
            EntityKind::Project => "project",
        }
    }

    /// Canonical web deep link for an entity of this kind.
    pub fn deep_link(&self, id: u64) -> String {
        match self {
            EntityKind::Task => format!("https://todoist.com/showTask?id={}", id),
            EntityKind::Project => format!("https://todoist.com/showProject?id={}", id),
        }
    }
}

/// Encode a kind and upstream id into an opaque identifier.
pub fn encode(kind: EntityKind, id: u64) -> String {
    format!("{}:{}", kind.tag(), id)
}

/// Decode an identifier back into its kind and upstream id.
///
/// Fails with [`GatewayError::InvalidIdentifier`] when the separator is
/// missing, the tag is unknown, or the suffix is not a non-negative integer.
pub fn decode(identifier: &str) -> Result<(EntityKind, u64), GatewayError> {
    let (tag, raw_id) = identifier.split_once(':').ok_or_else(|| {
        GatewayError::InvalidIdentifier(format!(
            "'{}' is missing the '<kind>:<id>' separator",
            identifier
        ))
    })?;

    let kind = match tag {
        "task" => EntityKind::Task,
        "project" => EntityKind::Project,
        other => {
            return Err(GatewayError::InvalidIdentifier(format!(
                "unknown entity kind '{}' (expected 'task' or 'project')",
                other
            )))
        }
    };

    let id: u64 = raw_id.parse().map_err(|_| {
        GatewayError::InvalidIdentifier(format!("'{}' is not a numeric id", raw_id))
    })?;

    Ok((kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_both_kinds() {
        for (kind, id) in [
            (EntityKind::Task, 2995104339u64),
            (EntityKind::Project, 2203309130),
            (EntityKind::Task, 0),
        ] {
            let encoded = encode(kind, id);
            assert_eq!(decode(&encoded).unwrap(), (kind, id));
        }
    }

    #[test]
    fn encode_is_self_describing() {
        assert_eq!(encode(EntityKind::Task, 42), "task:42");
        assert_eq!(encode(EntityKind::Project, 42), "project:42");
    }

    #[test]
    fn decode_rejects_missing_separator() {
        assert!(matches!(
            decode("task42"),
            Err(GatewayError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn decode_rejects_unknown_kind() {
        assert!(matches!(
            decode("label:42"),
            Err(GatewayError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn decode_rejects_non_numeric_suffix() {
        for bad in ["task:", "task:abc", "task:-3", "task:1.5"] {
            assert!(
                matches!(decode(bad), Err(GatewayError::InvalidIdentifier(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn deep_links_differ_per_kind() {
        assert_eq!(
            EntityKind::Task.deep_link(111),
            "https://todoist.com/showTask?id=111"
        );
        assert_eq!(
            EntityKind::Project.deep_link(111),
            "https://todoist.com/showProject?id=111"
        );
    }
}
