//! Query kinds and validated queries.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of question asked about the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Direct dependencies of one node.
    Deps,
    /// Direct dependents of one node.
    RDeps,
    /// Every simple path between two nodes.
    AllPaths,
    /// One simple path between two nodes.
    SomePath,
    /// Confirms that one node exists.
    Exists,
}

impl QueryKind {
    /// Every supported kind.
    pub const ALL: [Self; 5] = [
        Self::Deps,
        Self::RDeps,
        Self::AllPaths,
        Self::SomePath,
        Self::Exists,
    ];

    /// The name used in textual queries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deps => "deps",
            Self::RDeps => "rdeps",
            Self::AllPaths => "allpaths",
            Self::SomePath => "somepath",
            Self::Exists => "exists",
        }
    }

    /// Number of node parameters the kind takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Deps | Self::RDeps | Self::Exists => 1,
            Self::AllPaths | Self::SomePath => 2,
        }
    }

    /// One-line description for help output.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Deps => "direct dependencies of a binding",
            Self::RDeps => "bindings that directly depend on a binding",
            Self::AllPaths => "every dependency path between two bindings",
            Self::SomePath => "one dependency path between two bindings",
            Self::Exists => "check that a binding is in the graph",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueryKind {
    type Err = Error;

    /// Case-insensitive: `"deps"`, `"DePs"` and `"DEPS"` all parse.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownQueryKind(s.to_string()))
    }
}

/// A query whose parameter count matches its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    kind: QueryKind,
    parameters: Vec<String>,
}

impl Query {
    /// Build a query, checking the number of parameters.
    ///
    /// # Errors
    ///
    /// Returns `Error::ArityMismatch` if `parameters` does not have exactly
    /// `kind.arity()` elements.
    pub fn new<I, S>(kind: QueryKind, parameters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parameters: Vec<String> = parameters.into_iter().map(Into::into).collect();
        if parameters.len() != kind.arity() {
            return Err(Error::ArityMismatch {
                kind,
                expected: kind.arity(),
                actual: parameters.len(),
            });
        }
        Ok(Self { kind, parameters })
    }

    /// The query kind.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Node parameters, in order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for parameter in &self.parameters {
            write!(f, " {parameter}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("deps", QueryKind::Deps)]
    #[case("DePs", QueryKind::Deps)]
    #[case("rdeps", QueryKind::RDeps)]
    #[case("ALLpaths", QueryKind::AllPaths)]
    #[case("SoMePaTh", QueryKind::SomePath)]
    #[case("exists", QueryKind::Exists)]
    fn test_kind_parsing_ignores_case(#[case] input: &str, #[case] expected: QueryKind) {
        assert_eq!(input.parse::<QueryKind>(), Ok(expected));
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "path".parse::<QueryKind>(),
            Err(Error::UnknownQueryKind("path".to_string()))
        );
    }

    #[rstest]
    #[case(QueryKind::Deps, 1)]
    #[case(QueryKind::RDeps, 1)]
    #[case(QueryKind::AllPaths, 2)]
    #[case(QueryKind::SomePath, 2)]
    #[case(QueryKind::Exists, 1)]
    fn test_arity(#[case] kind: QueryKind, #[case] arity: usize) {
        assert_eq!(kind.arity(), arity);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in QueryKind::ALL {
            assert_eq!(kind.name().parse::<QueryKind>(), Ok(kind));
        }
    }

    #[rstest]
    #[case(QueryKind::Deps, vec!["com.google.cats.FirstCat", "com.google.cats.SecondCat"])]
    #[case(QueryKind::Deps, vec![])]
    #[case(QueryKind::AllPaths, vec!["com.google.cats.Cat"])]
    #[case(QueryKind::SomePath, vec![])]
    fn test_wrong_arity_is_rejected(#[case] kind: QueryKind, #[case] parameters: Vec<&str>) {
        let actual = parameters.len();
        assert_eq!(
            Query::new(kind, parameters),
            Err(Error::ArityMismatch {
                kind,
                expected: kind.arity(),
                actual,
            })
        );
    }

    #[test]
    fn test_query_display() {
        let query = Query::new(QueryKind::AllPaths, ["A", "B"]).unwrap();
        assert_eq!(query.to_string(), "allpaths A B");
        assert_eq!(query.parameters(), ["A".to_string(), "B".to_string()]);
    }
}
