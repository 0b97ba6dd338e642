//! Free-text query parsing.
//!
//! A query line is `<kind> <param>...`, split on whitespace. The kind is
//! matched case-insensitively and the parameter count is checked against the
//! kind's arity before anything touches a graph.

use crate::error::{Error, Result};
use tangle_engine::{Query, QueryKind};

/// Parse a query line such as `allpaths com.google.A com.google.B`.
///
/// # Errors
///
/// - `Error::EmptyQuery` if `input` has no tokens
/// - `UnknownQueryKind` / `ArityMismatch` from the engine for a bad kind
///   or parameter count
pub fn parse_query(input: &str) -> Result<Query> {
    let mut tokens = input.split_whitespace();
    let kind = tokens.next().ok_or(Error::EmptyQuery)?;
    parse_tokens(kind, tokens)
}

/// Build a query from an already split kind and parameters, as given on the
/// command line.
///
/// # Errors
///
/// Same as [`parse_query`], minus the empty case.
pub fn parse_tokens<I, S>(kind: &str, parameters: I) -> Result<Query>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let kind: QueryKind = kind.parse()?;
    let query = Query::new(kind, parameters)?;
    tracing::debug!(%query, "Parsed query");
    Ok(query)
}
