//! Running queries across every loaded component graph.
//!
//! A project usually compiles several components, each with its own binding
//! graph. A query is answered by running it against each graph in order and
//! concatenating the results. A graph where a parameter is unknown does not
//! fail the query as long as some other graph answers it.

use serde::Serialize;
use std::sync::Arc;
use tangle_engine::{DependencyGraph, EngineConfig, Error, Query, QueryExecutor};

/// A component graph and the name it was loaded under.
#[derive(Debug, Clone)]
pub struct NamedGraph {
    /// Graph name, usually the file stem of its source.
    pub name: String,
    /// The graph itself, shared read-only between queries.
    pub graph: Arc<DependencyGraph>,
}

impl NamedGraph {
    /// Wrap `graph` under `name`.
    pub fn new(name: impl Into<String>, graph: DependencyGraph) -> Self {
        Self {
            name: name.into(),
            graph: Arc::new(graph),
        }
    }
}

/// Size summary of a loaded graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Graph name.
    pub name: String,
    /// Number of bindings.
    pub nodes: usize,
    /// Number of dependency edges.
    pub edges: usize,
}

/// Result of a query against one graph.
#[derive(Debug)]
pub struct GraphOutcome {
    /// Name of the graph the query ran against.
    pub graph: String,
    /// What that graph answered.
    pub outcome: Result<Vec<String>, Error>,
}

/// Every loaded graph plus the engine settings queries run with.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    graphs: Vec<NamedGraph>,
    config: EngineConfig,
}

impl Catalog {
    /// Create a catalog over `graphs`, queried in the given order.
    #[must_use]
    pub fn new(graphs: Vec<NamedGraph>) -> Self {
        Self {
            graphs,
            config: EngineConfig::default(),
        }
    }

    /// Use `config` for every query.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The graphs in query order.
    #[must_use]
    pub fn graphs(&self) -> &[NamedGraph] {
        &self.graphs
    }

    /// Engine settings in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether no graph is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Node and edge counts per graph.
    #[must_use]
    pub fn summaries(&self) -> Vec<GraphSummary> {
        self.graphs
            .iter()
            .map(|named| GraphSummary {
                name: named.name.clone(),
                nodes: named.graph.node_count(),
                edges: named.graph.edge_count(),
            })
            .collect()
    }

    /// Run `query` against every graph and concatenate the results.
    ///
    /// The query succeeds when some graph produced a result or no graph
    /// failed. Otherwise the most relevant failure is returned: an unknown
    /// name with suggestions, then an unknown name without, then anything
    /// else. Among equally relevant failures the first graph's wins. One
    /// deadline covers the whole run, and an abort is returned at once.
    ///
    /// # Errors
    ///
    /// Returns the selected engine error as described above.
    pub fn execute(&self, query: &Query) -> Result<Vec<String>, Error> {
        let deadline = self.config.deadline();
        let mut results = Vec::new();
        let mut failure: Option<(u8, Error)> = None;

        for named in &self.graphs {
            let executor = QueryExecutor::new(named.graph.as_ref())
                .with_config(self.config.clone())
                .with_deadline(deadline.clone());

            match executor.execute(query) {
                Ok(found) => results.extend(found),
                Err(err) if err.is_aborted() => return Err(err),
                Err(err) => {
                    tracing::debug!(graph = %named.name, error = %err, "Query failed for graph");
                    let rank = relevance(&err);
                    if failure.as_ref().is_none_or(|(best, _)| rank < *best) {
                        failure = Some((rank, err));
                    }
                }
            }
        }

        match failure {
            Some((_, err)) if results.is_empty() => Err(err),
            _ => Ok(results),
        }
    }

    /// Run `query` against every graph, keeping each graph's answer apart.
    #[must_use]
    pub fn execute_per_graph(&self, query: &Query) -> Vec<GraphOutcome> {
        let deadline = self.config.deadline();
        self.graphs
            .iter()
            .map(|named| GraphOutcome {
                graph: named.name.clone(),
                outcome: QueryExecutor::new(named.graph.as_ref())
                    .with_config(self.config.clone())
                    .with_deadline(deadline.clone())
                    .execute(query),
            })
            .collect()
    }
}

/// Lower is more relevant to the user.
fn relevance(err: &Error) -> u8 {
    match err {
        _ if err.is_misspelling() => 0,
        Error::UnknownNode { .. } => 1,
        _ => 2,
    }
}
