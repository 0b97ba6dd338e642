//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use tangle_engine::QueryKind;

use super::validators::{validate_query_kind, validate_timeout_ms};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Write a sample component graph to try queries on
    #[arg(long)]
    pub example: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `query` command
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Query kind: deps, rdeps, allpaths, somepath or exists (any case)
    #[arg(value_parser = validate_query_kind)]
    pub kind: QueryKind,

    /// Binding names the query takes (one, or source and target)
    #[arg(num_args = 0..)]
    pub params: Vec<String>,

    /// Abort path searches after this many milliseconds
    #[arg(long, value_parser = validate_timeout_ms)]
    pub timeout_ms: Option<u64>,

    /// Show results separately for each graph
    #[arg(long)]
    pub per_graph: bool,
}

/// Arguments for the `repl` command
#[derive(Parser, Debug, Clone)]
pub struct ReplArgs {
    /// Abort path searches after this many milliseconds
    #[arg(long, value_parser = validate_timeout_ms)]
    pub timeout_ms: Option<u64>,

    /// Don't print the prompt
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `graphs` command
#[derive(Parser, Debug, Clone)]
pub struct GraphsArgs {}

/// Arguments for the `kinds` command
#[derive(Parser, Debug, Clone)]
pub struct KindsArgs {}
