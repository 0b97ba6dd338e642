//! Paths through the binding graph and the walk state used to find them.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Separator between nodes in the string form of a [`Path`].
pub const PATH_SEPARATOR: &str = " -> ";

/// A simple path: consecutive nodes are joined by a dependency edge and no
/// node appears twice.
///
/// Displays as the node names joined with [`PATH_SEPARATOR`] and serializes
/// as a list of node names.
///
/// Paths returned by a search always hold at least the source node. An empty
/// `Path` only exists while one is being assembled with [`Path::push_last`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    nodes: Vec<String>,
}

impl Path {
    /// Create an empty path to build on with [`Path::push_last`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` to the end of the path.
    pub fn push_last(&mut self, node: impl Into<String>) {
        self.nodes.push(node.into());
    }

    /// Remove and return the last node.
    pub fn pop_last(&mut self) -> Option<String> {
        self.nodes.pop()
    }

    /// The last node, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// The first node, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    /// Whether the path has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The nodes from source to target.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nodes.join(PATH_SEPARATOR))
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nodes.serialize(serializer)
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Walk state for a single depth-first search.
///
/// Holds the nodes on the current walk as a stack, with a companion set for
/// constant-time "already on this walk?" checks. A node is in `visited` iff
/// it is on `stack`. Every `push` must be matched by exactly one `pop` on
/// every exit path so the tracker is empty again once the search returns.
#[derive(Debug, Default)]
pub struct PathTracker<'g> {
    stack: Vec<&'g str>,
    visited: HashSet<&'g str>,
}

impl<'g> PathTracker<'g> {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Step onto `node`.
    pub fn push(&mut self, node: &'g str) {
        self.stack.push(node);
        self.visited.insert(node);
    }

    /// Step back off the most recently pushed node.
    pub fn pop(&mut self) -> Option<&'g str> {
        let node = self.stack.pop()?;
        self.visited.remove(node);
        Some(node)
    }

    /// Whether `node` is on the current walk.
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.visited.contains(node)
    }

    /// The node at the head of the walk.
    #[must_use]
    pub fn peek(&self) -> Option<&'g str> {
        self.stack.last().copied()
    }

    /// Number of nodes on the walk.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the walk is empty (and nothing is marked visited).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty() && self.visited.is_empty()
    }

    /// Snapshot the current walk as an owned [`Path`].
    #[must_use]
    pub fn current(&self) -> Path {
        self.stack.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display_joins_with_arrow() {
        let path: Path = ["com.google.A", "com.google.B", "com.google.D"]
            .into_iter()
            .collect();

        assert_eq!(path.to_string(), "com.google.A -> com.google.B -> com.google.D");
        assert_eq!(path.first(), Some("com.google.A"));
        assert_eq!(path.last(), Some("com.google.D"));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_path_push_and_pop() {
        let mut path = Path::new();
        assert!(path.is_empty());

        path.push_last("A");
        path.push_last("B");
        assert_eq!(path.last(), Some("B"));
        assert_eq!(path.pop_last().as_deref(), Some("B"));
        assert_eq!(path.to_string(), "A");
    }

    #[test]
    fn test_path_serializes_as_node_list() {
        let path: Path = ["A", "B"].into_iter().collect();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["A","B"]"#);
    }

    #[test]
    fn test_tracker_visited_follows_stack() {
        let mut tracker = PathTracker::new();
        tracker.push("A");
        tracker.push("B");

        assert!(tracker.contains("A"));
        assert!(tracker.contains("B"));
        assert_eq!(tracker.peek(), Some("B"));
        assert_eq!(tracker.depth(), 2);
        assert_eq!(tracker.current().to_string(), "A -> B");

        assert_eq!(tracker.pop(), Some("B"));
        assert!(!tracker.contains("B"));
        assert_eq!(tracker.pop(), Some("A"));
        assert!(tracker.is_empty());
        assert_eq!(tracker.pop(), None);
    }

    #[test]
    fn test_snapshot_is_independent_of_tracker() {
        let mut tracker = PathTracker::new();
        tracker.push("A");
        let snapshot = tracker.current();
        tracker.push("B");

        assert_eq!(snapshot.to_string(), "A");
    }
}
