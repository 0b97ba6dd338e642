//! Resolution of query parameters against a graph.

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::graph::GraphModel;
use crate::matcher::closest_names;

/// Checks that requested names exist, suggesting corrections when they don't.
#[derive(Debug)]
pub struct NodeValidator<'g, G: GraphModel + ?Sized> {
    graph: &'g G,
    max_distance: usize,
    max_suggestions: Option<usize>,
}

impl<'g, G: GraphModel + ?Sized> NodeValidator<'g, G> {
    /// Create a validator for `graph` using the distance limits in `config`.
    pub fn new(graph: &'g G, config: &EngineConfig) -> Self {
        Self {
            graph,
            max_distance: config.max_edit_distance,
            max_suggestions: config.max_suggestions,
        }
    }

    /// Return `name` unchanged if it is a node of the graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownNode` with the closest node names when `name`
    /// is not in the graph.
    pub fn resolve<'n>(&self, name: &'n str) -> Result<&'n str> {
        if self.graph.contains(name) {
            return Ok(name);
        }

        let suggestions: Vec<String> = closest_names(
            name,
            self.graph.all_nodes(),
            self.max_distance,
            self.max_suggestions,
        )
        .into_iter()
        .map(str::to_string)
        .collect();

        tracing::debug!(
            node = name,
            suggestions = suggestions.len(),
            "Unknown node in query"
        );

        Err(Error::UnknownNode {
            name: name.to_string(),
            suggestions,
        })
    }

    /// Resolve every name in order, stopping at the first unknown one.
    ///
    /// # Errors
    ///
    /// Returns the `Error::UnknownNode` of the first name not in the graph.
    pub fn resolve_all<'n, S: AsRef<str>>(&self, names: &'n [S]) -> Result<Vec<&'n str>> {
        names
            .iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect()
    }
}
