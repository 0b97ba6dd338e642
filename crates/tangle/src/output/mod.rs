//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or, with `--json`, a
//! single pretty-printed JSON document on stdout. Failures go to stderr in
//! text mode and to stdout as `{"error": ...}` in JSON mode.

pub mod color;

use crate::catalog::{GraphOutcome, GraphSummary};
use crate::loader::LoadWarning;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use tangle_engine::{Query, QueryKind};

pub use color::{error, success, warning};

use color::{bold, dimmed};

/// Prefix of every user-facing failure message.
pub const FAILURE_PREFIX: &str = "Execution failed. Reason: ";

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TANGLE_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("TANGLE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic use
    Json,
}

impl OutputMode {
    /// Pick the mode from the global `--json` flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: String,
    kind: QueryKind,
    results: &'a [String],
}

#[derive(Serialize)]
struct GraphOutcomeOutput<'a> {
    graph: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct GraphRow<'a> {
    #[serde(flatten)]
    summary: &'a GraphSummary,
    warnings: usize,
}

#[derive(Serialize)]
struct KindOutput {
    name: &'static str,
    arity: usize,
    description: &'static str,
}

/// Print the results of `query`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_results(
    query: &Query,
    results: &[String],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&QueryOutput {
            query: query.to_string(),
            kind: query.kind(),
            results,
        }),
        OutputMode::Text => {
            let mut out = io::stdout().lock();
            write_results_text(&mut out, results, config)
        }
    }
}

/// Print the results of `query` grouped by graph.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_outcomes(
    outcomes: &[GraphOutcome],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let rows: Vec<GraphOutcomeOutput<'_>> = outcomes
                .iter()
                .map(|outcome| match &outcome.outcome {
                    Ok(results) => GraphOutcomeOutput {
                        graph: &outcome.graph,
                        results: Some(results),
                        error: None,
                    },
                    Err(err) => GraphOutcomeOutput {
                        graph: &outcome.graph,
                        results: None,
                        error: Some(err.to_string()),
                    },
                })
                .collect();
            print_json(&rows)
        }
        OutputMode::Text => {
            let mut out = io::stdout().lock();
            for outcome in outcomes {
                writeln!(out, "{}", bold(&format!("[{}]", outcome.graph), config))?;
                match &outcome.outcome {
                    Ok(results) => write_results_text(&mut out, results, config)?,
                    Err(err) => writeln!(out, "{}", error(&err.to_string(), config))?,
                }
            }
            Ok(())
        }
    }
}

/// Print a failure the way every command reports one.
///
/// # Errors
///
/// Returns an error if writing the message fails.
pub fn print_failure(
    message: &dyn std::fmt::Display,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({ "error": message.to_string() })),
        OutputMode::Text => {
            let mut err = io::stderr().lock();
            writeln!(err, "{}", error(&failure_text(message), config))
        }
    }
}

/// The text line for a failure.
#[must_use]
pub fn failure_text(message: &dyn std::fmt::Display) -> String {
    format!("{FAILURE_PREFIX}{message}")
}

/// Print the loaded graphs with their sizes and load warning counts.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_graphs(
    summaries: &[GraphSummary],
    warnings: &[(String, LoadWarning)],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    let warning_count =
        |name: &str| warnings.iter().filter(|(graph, _)| graph == name).count();

    match mode {
        OutputMode::Json => {
            let rows: Vec<GraphRow<'_>> = summaries
                .iter()
                .map(|summary| GraphRow {
                    summary,
                    warnings: warning_count(&summary.name),
                })
                .collect();
            print_json(&rows)
        }
        OutputMode::Text => {
            let mut out = io::stdout().lock();
            for summary in summaries {
                write!(
                    out,
                    "{}  {}",
                    bold(&summary.name, config),
                    dimmed(
                        &format!("{} bindings, {} dependencies", summary.nodes, summary.edges),
                        config
                    )
                )?;
                match warning_count(&summary.name) {
                    0 => writeln!(out)?,
                    n => writeln!(out, "  {}", warning(&format!("{n} load warnings"), config))?,
                }
            }
            Ok(())
        }
    }
}

/// Print the supported query kinds.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_kinds(mode: OutputMode, config: &OutputConfig) -> io::Result<()> {
    let kinds: Vec<KindOutput> = QueryKind::ALL
        .into_iter()
        .map(|kind| KindOutput {
            name: kind.name(),
            arity: kind.arity(),
            description: kind.description(),
        })
        .collect();

    match mode {
        OutputMode::Json => print_json(&kinds),
        OutputMode::Text => {
            let mut out = io::stdout().lock();
            for kind in kinds {
                let usage = match kind.arity {
                    1 => format!("{} <binding>", kind.name),
                    _ => format!("{} <source> <target>", kind.name),
                };
                writeln!(
                    out,
                    "{:<32}{}",
                    bold(&usage, config),
                    dimmed(kind.description, config)
                )?;
            }
            Ok(())
        }
    }
}

/// Print any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

fn write_results_text<W: Write>(
    w: &mut W,
    results: &[String],
    config: &OutputConfig,
) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(w, "{}", dimmed("No results.", config));
    }
    for line in results {
        writeln!(w, "{}", color::path(line, config))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputConfig {
        OutputConfig::new(false)
    }

    #[test]
    fn test_results_text_one_per_line() {
        let mut buf = Vec::new();
        let results = vec!["A -> B".to_string(), "A -> C -> B".to_string()];

        write_results_text(&mut buf, &results, &plain()).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "A -> B\nA -> C -> B\n");
    }

    #[test]
    fn test_empty_results_text() {
        let mut buf = Vec::new();
        write_results_text(&mut buf, &[], &plain()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No results.\n");
    }

    #[test]
    fn test_query_output_json_shape() {
        let query = Query::new(QueryKind::Deps, ["A"]).unwrap();
        let results = vec!["B".to_string()];
        let value = serde_json::to_value(QueryOutput {
            query: query.to_string(),
            kind: query.kind(),
            results: &results,
        })
        .unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "query": "deps A", "kind": "deps", "results": ["B"] })
        );
    }

    #[test]
    fn test_failure_text() {
        let err = tangle_engine::Error::UnknownNode {
            name: "X".to_string(),
            suggestions: vec![],
        };
        assert_eq!(
            failure_text(&err),
            "Execution failed. Reason: Binding with name X not found in the graph."
        );
    }

    #[test]
    fn test_output_mode_from_flag() {
        assert_eq!(OutputMode::from_json_flag(true), OutputMode::Json);
        assert_eq!(OutputMode::from_json_flag(false), OutputMode::Text);
    }
}
