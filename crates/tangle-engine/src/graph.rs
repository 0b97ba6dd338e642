//! Read-only access to binding graphs.
//!
//! [`GraphModel`] is the capability every query runs against: look up a
//! node's direct dependencies, test membership, and list all nodes. Two
//! implementations ship with the crate:
//!
//! - [`DependencyGraph`]: petgraph-backed, assembled once with
//!   [`GraphBuilder`] and immutable afterwards.
//! - `BTreeMap<String, Vec<String>>`: plain adjacency map, handy for tests
//!   and small inline graphs.
//!
//! ## Edge Direction
//!
//! Edges point from **dependent -> dependency**: `A -> B` means binding `A`
//! needs `B` to be constructed.
//!
//! ## Iteration Order
//!
//! Query results must be reproducible, so every implementation iterates in a
//! fixed order. For `DependencyGraph`:
//!
//! - `all_nodes`: node declaration order
//! - `dependencies_of`: edge insertion order
//! - `dependents_of`: declaration order of the dependents

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashMap};

/// Read operations over a dependency graph.
///
/// Implementations are never mutated while queries run against them, so a
/// single graph can serve concurrent queries without locking.
pub trait GraphModel: Send + Sync {
    /// Direct dependencies of `node`, in the graph's fixed order.
    ///
    /// Returns an empty list for leaves and for unknown nodes; existence is
    /// checked separately with [`contains`](GraphModel::contains).
    fn dependencies_of(&self, node: &str) -> Vec<&str>;

    /// Whether `node` is part of the graph.
    fn contains(&self, node: &str) -> bool;

    /// Every node, in the graph's fixed order.
    fn all_nodes(&self) -> Vec<&str>;

    /// Nodes that directly depend on `node` (one hop).
    ///
    /// The provided implementation scans every node's dependency set and
    /// returns matches in [`all_nodes`](GraphModel::all_nodes) order.
    fn dependents_of(&self, node: &str) -> Vec<&str> {
        self.all_nodes()
            .into_iter()
            .filter(|candidate| self.dependencies_of(candidate).contains(&node))
            .collect()
    }
}

/// Incrementally assembles a [`DependencyGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` as a node, returning its index.
    ///
    /// Declaring an existing node is a no-op.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), index);
        index
    }

    /// Record that `from` directly depends on `to`.
    ///
    /// Both endpoints are declared if needed, so a binding that only ever
    /// appears as a dependency is still a node. Duplicate edges are ignored.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> &mut Self {
        let from_index = self.add_node(from);
        let to_index = self.add_node(to);
        if self.graph.find_edge(from_index, to_index).is_none() {
            self.graph.add_edge(from_index, to_index, ());
        }
        self
    }

    /// Declare `node` together with its direct dependencies, in order.
    pub fn add_binding<I, S>(&mut self, node: &str, dependencies: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_node(node);
        for dependency in dependencies {
            self.add_dependency(node, dependency.as_ref());
        }
        self
    }

    /// Number of nodes declared so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Finish building. The returned graph cannot be modified.
    #[must_use]
    pub fn build(self) -> DependencyGraph {
        DependencyGraph {
            graph: self.graph,
            node_map: self.node_map,
        }
    }
}

/// An immutable binding graph backed by petgraph.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Node weights are binding names; edges carry no data.
    graph: DiGraph<String, ()>,

    /// Binding name to graph index. Every node has exactly one entry.
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build a graph from `(node, dependencies)` pairs.
    ///
    /// ```
    /// use tangle_engine::{DependencyGraph, GraphModel};
    ///
    /// let graph = DependencyGraph::from_adjacency([
    ///     ("com.google.Component", vec!["com.google.CatsFactory", "com.google.Helper"]),
    ///     ("com.google.CatsFactory", vec!["com.google.Cat"]),
    /// ]);
    /// assert!(graph.contains("com.google.Cat"));
    /// assert_eq!(graph.node_count(), 4);
    /// ```
    pub fn from_adjacency<I, N, D, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: AsRef<str>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (node, dependencies) in bindings {
            builder.add_binding(node.as_ref(), dependencies);
        }
        builder.build()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn neighbors_in_order(&self, node: &str, direction: Direction) -> Vec<&str> {
        let Some(&index) = self.node_map.get(node) else {
            return Vec::new();
        };

        // petgraph walks a node's edge list newest first.
        let mut neighbors: Vec<NodeIndex> =
            self.graph.neighbors_directed(index, direction).collect();
        match direction {
            Direction::Outgoing => neighbors.reverse(),
            Direction::Incoming => neighbors.sort_unstable(),
        }

        neighbors
            .into_iter()
            .map(|neighbor| self.graph[neighbor].as_str())
            .collect()
    }
}

impl GraphModel for DependencyGraph {
    fn dependencies_of(&self, node: &str) -> Vec<&str> {
        self.neighbors_in_order(node, Direction::Outgoing)
    }

    fn contains(&self, node: &str) -> bool {
        self.node_map.contains_key(node)
    }

    fn all_nodes(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|index| self.graph[index].as_str())
            .collect()
    }

    fn dependents_of(&self, node: &str) -> Vec<&str> {
        // Incoming edges sorted by index match the declaration order used by
        // the scanning default.
        self.neighbors_in_order(node, Direction::Incoming)
    }
}

/// Keys are the nodes; a dependency that is not itself a key is not a node.
impl GraphModel for BTreeMap<String, Vec<String>> {
    fn dependencies_of(&self, node: &str) -> Vec<&str> {
        self.get(node)
            .map(|dependencies| dependencies.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn contains(&self, node: &str) -> bool {
        self.contains_key(node)
    }

    fn all_nodes(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// A -> {B, C}, B -> {C, D, E}, D -> {F, G, H}, G -> {H, I, J}
    #[fixture]
    fn graph() -> DependencyGraph {
        DependencyGraph::from_adjacency([
            ("A", vec!["B", "C"]),
            ("B", vec!["C", "D", "E"]),
            ("C", vec![]),
            ("D", vec!["F", "G", "H"]),
            ("E", vec![]),
            ("F", vec![]),
            ("G", vec!["H", "I", "J"]),
            ("H", vec![]),
            ("I", vec![]),
            ("J", vec![]),
        ])
    }

    #[rstest]
    #[case("A", vec!["B", "C"])]
    #[case("B", vec!["C", "D", "E"])]
    #[case("G", vec!["H", "I", "J"])]
    #[case("J", vec![])]
    #[case("Z", vec![])]
    fn test_dependencies_in_insertion_order(
        graph: DependencyGraph,
        #[case] node: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(graph.dependencies_of(node), expected);
    }

    #[rstest]
    #[case("C", vec!["A", "B"])]
    #[case("H", vec!["D", "G"])]
    #[case("A", vec![])]
    #[case("Z", vec![])]
    fn test_dependents_one_hop(
        graph: DependencyGraph,
        #[case] node: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(graph.dependents_of(node), expected);
    }

    #[rstest]
    fn test_dependents_override_matches_scanning_default(graph: DependencyGraph) {
        let as_map: BTreeMap<String, Vec<String>> = graph
            .all_nodes()
            .into_iter()
            .map(|node| {
                let deps = graph
                    .dependencies_of(node)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (node.to_string(), deps)
            })
            .collect();

        for node in graph.all_nodes() {
            assert_eq!(graph.dependents_of(node), as_map.dependents_of(node));
        }
    }

    #[rstest]
    fn test_all_nodes_in_declaration_order(graph: DependencyGraph) {
        assert_eq!(
            graph.all_nodes(),
            vec!["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]
        );
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 11);
    }

    #[test]
    fn test_dependency_only_nodes_are_declared() {
        let mut builder = GraphBuilder::new();
        builder.add_dependency("com.google.Component", "com.google.Cat");
        let graph = builder.build();

        assert!(graph.contains("com.google.Cat"));
        assert!(graph.dependencies_of("com.google.Cat").is_empty());
    }

    #[test]
    fn test_duplicate_edges_are_ignored() {
        let mut builder = GraphBuilder::new();
        builder
            .add_dependency("A", "B")
            .add_dependency("A", "B")
            .add_dependency("A", "C");
        let graph = builder.build();

        assert_eq!(graph.dependencies_of("A"), vec!["B", "C"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_self_loop_is_kept() {
        let graph = DependencyGraph::from_adjacency([("A", vec!["A"])]);

        assert_eq!(graph.dependencies_of("A"), vec!["A"]);
        assert_eq!(graph.dependents_of("A"), vec!["A"]);
    }

    #[test]
    fn test_btreemap_nodes_are_keys_only() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), vec!["c".to_string()]);
        map.insert("a".to_string(), vec!["b".to_string(), "c".to_string()]);

        assert_eq!(map.all_nodes(), vec!["a", "b"]);
        assert!(!GraphModel::contains(&map, "c"));
        assert_eq!(map.dependents_of("c"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphBuilder::new().build();
        assert!(graph.is_empty());
        assert!(graph.all_nodes().is_empty());
    }
}
