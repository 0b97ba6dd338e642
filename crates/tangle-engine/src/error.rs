//! Error types for query execution.
//!
//! Errors are terminal for a single query invocation. An empty result (no
//! path between two nodes, a leaf with no dependencies) is a successful
//! answer, never an error.

use crate::deadline::AbortReason;
use crate::query::QueryKind;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for query parsing and execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A query parameter does not name a node of the graph.
    ///
    /// `suggestions` holds the known names closest to `name` by edit
    /// distance, and is empty when nothing was close enough.
    #[error("{}", unknown_node_message(.name, .suggestions))]
    UnknownNode {
        /// The name exactly as it was requested.
        name: String,
        /// Closest known names, all at the same minimal distance.
        suggestions: Vec<String>,
    },

    /// Traversal was stopped by a deadline or a cancellation request.
    #[error("Query aborted: {reason}")]
    Aborted {
        /// Why the traversal stopped.
        reason: AbortReason,
    },

    /// The query name is not one of the supported kinds.
    #[error("Query with name '{0}' isn't implemented.")]
    UnknownQueryKind(String),

    /// The number of parameters does not match the query kind.
    #[error(
        "The number of passed parameters is incorrect for '{kind}'. Expected: {expected}, got: {actual}."
    )]
    ArityMismatch {
        /// The query kind being built.
        kind: QueryKind,
        /// Parameters the kind takes.
        expected: usize,
        /// Parameters actually supplied.
        actual: usize,
    },
}

impl Error {
    /// Returns `true` for an unknown node that has at least one suggestion,
    /// i.e. the name most likely contains a typo.
    #[must_use]
    pub fn is_misspelling(&self) -> bool {
        matches!(self, Self::UnknownNode { suggestions, .. } if !suggestions.is_empty())
    }

    /// Returns `true` if the query was aborted by its deadline or a cancel request.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

fn unknown_node_message(name: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("Binding with name {name} not found in the graph.")
    } else {
        format!(
            "Binding with name {name} contains a typo and not found in the graph. Maybe you meant {}?",
            suggestions.join(", ")
        )
    }
}
