//! Reference resolution for writes that carry foreign ids.
//!
//! Writes that reference other rows (order items, association edges) resolve
//! every referenced id before touching storage. When at least one reference
//! is missing, the write is answered with a NotFound outcome that enumerates
//! all of them - not just the first - and nothing is written.

use crate::outcome::MutationOutcome;

/// Accumulates missing-reference diagnostics for one write.
#[derive(Debug, Default)]
pub struct ReferenceChecks {
    missing: Vec<String>,
}

impl ReferenceChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of resolving one reference; `message` is kept when
    /// the reference was not found.
    pub fn require(&mut self, found: bool, message: &str) {
        if !found {
            self.missing.push(message.to_string());
        }
    }

    /// True when every checked reference resolved.
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// The NotFound outcome for this write, if any reference was missing.
    pub fn into_outcome(self) -> Option<MutationOutcome> {
        if self.missing.is_empty() {
            None
        } else {
            Some(MutationOutcome::not_found(self.missing))
        }
    }
}
