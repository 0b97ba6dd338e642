//! Query execution.
//!
//! Every query runs in two phases. First each node parameter is resolved
//! through a [`NodeValidator`]; the first unknown name fails the whole query
//! before any traversal. Then the query is dispatched on its kind:
//!
//! - `deps` / `rdeps` are single adjacency lookups.
//! - `exists` performs no traversal: validation is the answer.
//! - `allpaths` / `somepath` run a backtracking depth-first search that
//!   never revisits a node already on the current walk, so it terminates on
//!   cyclic graphs and yields only simple paths.
//!
//! Path searches check the [`Deadline`] before stepping onto each node. The
//! search is iterative, so a long dependency chain cannot overflow the stack.

use crate::config::EngineConfig;
use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::graph::GraphModel;
use crate::path::{Path, PathTracker};
use crate::query::{Query, QueryKind};
use crate::validator::NodeValidator;
use std::ops::ControlFlow;
use std::vec;

/// Runs queries against one graph.
///
/// The executor holds no per-query state; each path search gets its own
/// [`PathTracker`], so one executor can serve queries from several threads.
#[derive(Debug)]
pub struct QueryExecutor<'g, G: GraphModel + ?Sized> {
    graph: &'g G,
    config: EngineConfig,
    deadline: Option<Deadline>,
}

impl<'g, G: GraphModel + ?Sized> QueryExecutor<'g, G> {
    /// Create an executor with the default configuration.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            config: EngineConfig::default(),
            deadline: None,
        }
    }

    /// Use `config` for suggestion limits and the per-query timeout.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a fixed deadline instead of the per-query timeout from the
    /// configuration.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Run `query`, returning one string per result.
    ///
    /// `deps`, `rdeps` and `exists` yield node names. `allpaths` and
    /// `somepath` yield one `" -> "`-joined string per path.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownNode` if a parameter is not in the graph
    /// - `Error::Aborted` if a path search hits the deadline
    pub fn execute(&self, query: &Query) -> Result<Vec<String>> {
        tracing::debug!(kind = %query.kind(), params = ?query.parameters(), "Executing query");

        let nodes = self.validator().resolve_all(query.parameters())?;

        let results: Vec<String> = match (query.kind(), nodes.as_slice()) {
            (QueryKind::Deps, [node]) => to_strings(self.graph.dependencies_of(node)),
            (QueryKind::RDeps, [node]) => to_strings(self.graph.dependents_of(node)),
            (QueryKind::Exists, [node]) => vec![(*node).to_string()],
            (QueryKind::AllPaths, [source, target]) => self
                .search_all(source, target)?
                .iter()
                .map(ToString::to_string)
                .collect(),
            (QueryKind::SomePath, [source, target]) => self
                .search_one(source, target)?
                .iter()
                .map(ToString::to_string)
                .collect(),
            (kind, params) => {
                return Err(Error::ArityMismatch {
                    kind,
                    expected: kind.arity(),
                    actual: params.len(),
                });
            }
        };

        tracing::debug!(kind = %query.kind(), results = results.len(), "Query finished");
        Ok(results)
    }

    /// Direct dependencies of `node`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownNode` if `node` is not in the graph.
    pub fn deps(&self, node: &str) -> Result<Vec<&'g str>> {
        let node = self.validator().resolve(node)?;
        Ok(self.graph.dependencies_of(node))
    }

    /// Nodes that directly depend on `node`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownNode` if `node` is not in the graph.
    pub fn rdeps(&self, node: &str) -> Result<Vec<&'g str>> {
        let node = self.validator().resolve(node)?;
        Ok(self.graph.dependents_of(node))
    }

    /// Confirm that `node` is in the graph, returning its name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownNode` if `node` is not in the graph.
    pub fn exists(&self, node: &str) -> Result<String> {
        self.validator().resolve(node).map(str::to_string)
    }

    /// Every simple path from `source` to `target`, in discovery order.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownNode` if either endpoint is not in the graph
    /// - `Error::Aborted` if the deadline passes mid-search
    pub fn all_paths(&self, source: &str, target: &str) -> Result<Vec<Path>> {
        let validator = self.validator();
        let source = validator.resolve(source)?;
        let target = validator.resolve(target)?;
        self.search_all(source, target)
    }

    /// The first simple path from `source` to `target`, if one exists.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownNode` if either endpoint is not in the graph
    /// - `Error::Aborted` if the deadline passes mid-search
    pub fn some_path(&self, source: &str, target: &str) -> Result<Option<Path>> {
        let validator = self.validator();
        let source = validator.resolve(source)?;
        let target = validator.resolve(target)?;
        self.search_one(source, target)
    }

    fn validator(&self) -> NodeValidator<'g, G> {
        NodeValidator::new(self.graph, &self.config)
    }

    fn deadline(&self) -> Deadline {
        self.deadline
            .clone()
            .unwrap_or_else(|| self.config.deadline())
    }

    fn search_all(&self, source: &str, target: &str) -> Result<Vec<Path>> {
        let deadline = self.deadline();
        Search::new(self.graph, target, &deadline).collect_all(source)
    }

    fn search_one(&self, source: &str, target: &str) -> Result<Option<Path>> {
        let deadline = self.deadline();
        Search::new(self.graph, target, &deadline).find_first(source)
    }
}

/// Run a query described by `kind` and `params` with the default
/// configuration.
///
/// ```
/// use tangle_engine::{DependencyGraph, QueryKind, execute};
///
/// let graph = DependencyGraph::from_adjacency([
///     ("com.google.Component", vec!["com.google.CatsFactory", "com.google.Helper"]),
///     ("com.google.CatsFactory", vec!["com.google.Cat"]),
/// ]);
///
/// let deps = execute(&graph, QueryKind::Deps, &["com.google.Component"])?;
/// assert_eq!(deps, vec!["com.google.CatsFactory", "com.google.Helper"]);
/// # Ok::<(), tangle_engine::Error>(())
/// ```
///
/// # Errors
///
/// Returns `Error::ArityMismatch` if `params` does not fit `kind`, and any
/// error of [`QueryExecutor::execute`].
pub fn execute<G, S>(graph: &G, kind: QueryKind, params: &[S]) -> Result<Vec<String>>
where
    G: GraphModel + ?Sized,
    S: AsRef<str>,
{
    let query = Query::new(kind, params.iter().map(|param| param.as_ref()))?;
    QueryExecutor::new(graph).execute(&query)
}

fn to_strings(nodes: Vec<&str>) -> Vec<String> {
    nodes.into_iter().map(str::to_string).collect()
}

/// State of one backtracking search towards `target`.
///
/// The walk keeps its own stack of pending dependencies per node, one frame
/// per node on the tracker.
struct Search<'a, G: GraphModel + ?Sized> {
    graph: &'a G,
    target: &'a str,
    deadline: &'a Deadline,
    tracker: PathTracker<'a>,
}

impl<'a, G: GraphModel + ?Sized> Search<'a, G> {
    fn new(graph: &'a G, target: &'a str, deadline: &'a Deadline) -> Self {
        Self {
            graph,
            target,
            deadline,
            tracker: PathTracker::new(),
        }
    }

    /// Every simple path from `source` to the target.
    fn collect_all(&mut self, source: &'a str) -> Result<Vec<Path>> {
        let mut found = Vec::new();
        self.walk(source, &mut |path| {
            found.push(path);
            ControlFlow::Continue(())
        })?;
        Ok(found)
    }

    /// Like `collect_all`, but stops at the first path found.
    fn find_first(&mut self, source: &'a str) -> Result<Option<Path>> {
        let mut first = None;
        self.walk(source, &mut |path| {
            first = Some(path);
            ControlFlow::Break(())
        })?;
        Ok(first)
    }

    /// Run the walk, then unwind whatever is left on the tracker.
    fn walk<F>(&mut self, source: &'a str, on_path: &mut F) -> Result<()>
    where
        F: FnMut(Path) -> ControlFlow<()>,
    {
        let outcome = self.walk_from(source, on_path);
        while self.tracker.pop().is_some() {}
        outcome
    }

    fn walk_from<F>(&mut self, source: &'a str, on_path: &mut F) -> Result<()>
    where
        F: FnMut(Path) -> ControlFlow<()>,
    {
        let mut frames: Vec<vec::IntoIter<&'a str>> = Vec::new();
        if self.step_onto(source, &mut frames, on_path)?.is_break() {
            return Ok(());
        }

        while let Some(pending) = frames.last_mut() {
            match pending.find(|dependency| !self.tracker.contains(dependency)) {
                Some(next) => {
                    if self.step_onto(next, &mut frames, on_path)?.is_break() {
                        return Ok(());
                    }
                }
                None => {
                    frames.pop();
                    self.tracker.pop();
                }
            }
        }
        Ok(())
    }

    /// Push `node`. A target is reported and popped at once; any other node
    /// gets a frame of dependencies to explore.
    fn step_onto<F>(
        &mut self,
        node: &'a str,
        frames: &mut Vec<vec::IntoIter<&'a str>>,
        on_path: &mut F,
    ) -> Result<ControlFlow<()>>
    where
        F: FnMut(Path) -> ControlFlow<()>,
    {
        self.deadline.check()?;
        self.tracker.push(node);

        if node == self.target {
            tracing::trace!(depth = self.tracker.depth(), "Path found");
            let flow = on_path(self.tracker.current());
            self.tracker.pop();
            return Ok(flow);
        }

        frames.push(self.graph.dependencies_of(node).into_iter());
        Ok(ControlFlow::Continue(()))
    }
}
