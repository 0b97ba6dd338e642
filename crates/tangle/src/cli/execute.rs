//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use std::io::Write;
use tangle_engine::Query;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::args::{InitArgs, QueryArgs, ReplArgs};
use crate::app::App;
use crate::catalog::Catalog;
use crate::output::{self, OutputConfig, OutputMode};
use crate::router::parse_query;

/// Words that leave the REPL.
const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Execute the init command
pub async fn execute_init(args: &InitArgs, config: &OutputConfig) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing tangle workspace...");
    }

    let result = init::init(&current_dir, args.example).await?;

    if !args.quiet {
        println!(
            "{}",
            output::success(
                &format!("Initialized tangle in {}", result.tangle_dir.display()),
                config
            )
        );
        println!("  Config: {}", result.config_file.display());
        println!("  Graphs: {}", result.graphs_dir.display());
        if let Some(example) = &result.example_graph {
            println!("  Example graph: {}", example.display());
        }
    }

    Ok(())
}

/// Execute the query command
pub fn execute_query(
    app: &App,
    args: &QueryArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let query = Query::new(args.kind, args.params.iter().map(String::as_str))?;

    if args.per_graph {
        let outcomes = app.catalog().execute_per_graph(&query);
        output::print_outcomes(&outcomes, output_mode, config)?;
        return Ok(());
    }

    let results = app.catalog().execute(&query)?;
    output::print_results(&query, &results, output_mode, config)?;
    Ok(())
}

/// Execute the repl command
///
/// Reads one query per line from stdin until end of input or `quit`/`exit`.
/// A failing query prints its reason and the session carries on.
pub async fn execute_repl(
    app: &App,
    args: &ReplArgs,
    output_mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let show_prompt = !args.quiet && output_mode == OutputMode::Text;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if show_prompt {
            let mut err = std::io::stderr().lock();
            write!(err, "> ")?;
            err.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.iter().any(|quit| line.eq_ignore_ascii_case(quit)) {
            break;
        }

        match run_line(app.catalog(), line) {
            Ok((query, results)) => output::print_results(&query, &results, output_mode, config)?,
            Err(err) => output::print_failure(&err, output_mode, config)?,
        }
    }

    tracing::debug!("REPL session ended");
    Ok(())
}

/// Parse and run one query line.
fn run_line(catalog: &Catalog, line: &str) -> crate::error::Result<(Query, Vec<String>)> {
    let query = parse_query(line)?;
    let results = catalog.execute(&query)?;
    Ok((query, results))
}

/// Execute the graphs command
pub fn execute_graphs(app: &App, output_mode: OutputMode, config: &OutputConfig) -> Result<()> {
    output::print_graphs(
        &app.catalog().summaries(),
        app.warnings(),
        output_mode,
        config,
    )?;
    Ok(())
}

/// Execute the kinds command
pub fn execute_kinds(output_mode: OutputMode, config: &OutputConfig) -> Result<()> {
    output::print_kinds(output_mode, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NamedGraph;
    use tangle_engine::DependencyGraph;

    fn catalog() -> Catalog {
        let graph = DependencyGraph::from_adjacency([
            ("com.google.Component", vec!["com.google.CatsFactory", "com.google.Helper"]),
            ("com.google.CatsFactory", vec!["com.google.Cat"]),
        ]);
        Catalog::new(vec![NamedGraph::new("cats", graph)])
    }

    #[test]
    fn test_run_line() {
        let (query, results) =
            run_line(&catalog(), "somepath com.google.Component com.google.Cat").unwrap();

        assert_eq!(query.to_string(), "somepath com.google.Component com.google.Cat");
        assert_eq!(
            results,
            vec!["com.google.Component -> com.google.CatsFactory -> com.google.Cat"]
        );
    }

    #[test]
    fn test_run_line_failure_message() {
        let err = run_line(&catalog(), "deps com.google.Cats").unwrap_err();

        assert_eq!(
            output::failure_text(&err),
            "Execution failed. Reason: Binding with name com.google.Cats contains a typo and not found in the graph. Maybe you meant com.google.Cat?"
        );
    }

    #[test]
    fn test_run_line_empty() {
        let err = run_line(&catalog(), "   ").unwrap_err();
        assert!(matches!(err, crate::error::Error::EmptyQuery));
    }
}
