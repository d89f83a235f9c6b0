//! Mutation outcome protocol.
//!
//! Every mutating service operation answers with exactly one
//! [`MutationOutcome`]: a status, a list of diagnostic messages, and - for
//! creations addressed by a single key - the new row's id. Callers branch on
//! the status; the messages are for humans and logs, never parsed.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Status of a completed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationStatus {
    /// A new row (or association edge) exists.
    Created,
    /// The targeted row was modified.
    Updated,
    /// The targeted row (and its dependents) no longer exists.
    Deleted,
    /// The target or one of its references does not exist.
    NotFound,
    /// Storage failure, malformed input, or any unexpected condition.
    Error,
}

/// Uniform result of a mutating operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub status: MutationStatus,
    /// Diagnostic messages enumerating every discovered problem.
    pub messages: Vec<String>,
    /// Identifier of the created row; only ever set when status is Created,
    /// and absent for edges addressed by a composite key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<String>,
}

impl MutationOutcome {
    /// Bare outcome with the given status, no messages and no id.
    pub fn new(status: MutationStatus) -> Self {
        Self {
            status,
            messages: Vec::new(),
            created_id: None,
        }
    }

    /// Successful creation of a row with the given id.
    pub fn created(created_id: impl Into<String>) -> Self {
        Self {
            status: MutationStatus::Created,
            messages: Vec::new(),
            created_id: Some(created_id.into()),
        }
    }

    /// Successful in-place modification.
    pub fn updated() -> Self {
        Self::new(MutationStatus::Updated)
    }

    /// Successful removal.
    pub fn deleted() -> Self {
        Self::new(MutationStatus::Deleted)
    }

    /// The target or one of its references is missing.
    pub fn not_found(messages: Vec<String>) -> Self {
        Self {
            status: MutationStatus::NotFound,
            messages,
            created_id: None,
        }
    }

    /// The mutation failed.
    pub fn error(messages: Vec<String>) -> Self {
        Self {
            status: MutationStatus::Error,
            messages,
            created_id: None,
        }
    }

    /// Error outcome carrying a core error's rendering.
    pub fn from_error(err: Error) -> Self {
        Self::error(vec![err.to_string()])
    }

    /// Append one more diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// True for Created, Updated, and Deleted.
    pub fn is_success(&self) -> bool {
        matches!(
            self.status,
            MutationStatus::Created | MutationStatus::Updated | MutationStatus::Deleted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DatabaseError;

    #[test]
    fn test_created_carries_id() {
        let outcome = MutationOutcome::created("abc-123");
        assert_eq!(outcome.status, MutationStatus::Created);
        assert_eq!(outcome.created_id.as_deref(), Some("abc-123"));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_non_created_statuses_carry_no_id() {
        for outcome in [
            MutationOutcome::updated(),
            MutationOutcome::deleted(),
            MutationOutcome::not_found(vec!["x".to_string()]),
            MutationOutcome::error(vec!["y".to_string()]),
        ] {
            assert!(outcome.created_id.is_none());
        }
    }

    #[test]
    fn test_not_found_and_error_are_failures() {
        assert!(!MutationOutcome::not_found(vec![]).is_success());
        assert!(!MutationOutcome::error(vec![]).is_success());
    }

    #[test]
    fn test_from_error_renders_the_error() {
        let err = Error::Database(DatabaseError::QueryFailed("disk I/O".to_string()));
        let outcome = MutationOutcome::from_error(err);
        assert_eq!(outcome.status, MutationStatus::Error);
        assert_eq!(outcome.messages.len(), 1);
        assert!(outcome.messages[0].contains("disk I/O"));
    }

    #[test]
    fn test_serializes_status_in_screaming_case() {
        let outcome = MutationOutcome::not_found(vec!["Product was not found.".to_string()]);
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "NOT_FOUND");
        assert_eq!(value["messages"][0], "Product was not found.");
        assert!(value.get("createdId").is_none());
    }
}
