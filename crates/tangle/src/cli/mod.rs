//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Create a `.tangle/` workspace
//! - `query`: Run one query against every loaded graph
//! - `repl`: Read queries from stdin, one per line
//! - `graphs`: List the loaded graphs
//! - `kinds`: List the supported query kinds
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--graphs <PATH>`: Load graphs from a file or directory instead of the workspace
//!
//! # Example
//!
//! ```bash
//! tangle init --example
//! tangle query allpaths com.example.beach.Beach com.example.beach.Sand
//! echo "deps com.example.beach.Beach" | tangle repl --quiet
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use args::{GraphsArgs, InitArgs, KindsArgs, QueryArgs, ReplArgs};
pub use validators::{validate_query_kind, validate_timeout_ms};

/// Tangle - query dependency-injection binding graphs
///
/// Graphs are read from `.tangle/graphs/*.jsonl`, one binding per line:
/// `{"key": "com.example.A", "dependencies": ["com.example.B"]}`.
#[derive(Parser, Debug)]
#[command(name = "tangle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Graph file or directory to load instead of the workspace graphs
    #[arg(long, global = true, value_name = "PATH")]
    pub graphs: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new tangle workspace
    ///
    /// Creates the `.tangle/` directory with configuration and an empty
    /// graphs directory. `--example` adds a small graph to query.
    Init(InitArgs),

    /// Run a single query
    ///
    /// The query runs against every loaded graph and the results are
    /// concatenated in graph order.
    Query(QueryArgs),

    /// Start an interactive query session
    ///
    /// Each input line is `<kind> <params...>`. A failed query prints its
    /// reason and the session continues. `quit` or end of input leaves.
    Repl(ReplArgs),

    /// List the loaded graphs
    Graphs(GraphsArgs),

    /// List the supported query kinds
    Kinds(KindsArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// Command failures are reported as `Execution failed. Reason: ...` and
    /// turn into a failure exit code. Only a failure to write that report
    /// is returned as an error.
    pub async fn execute(&self) -> Result<ExitCode> {
        use crate::output::{self, OutputConfig, OutputMode};

        let output_mode = OutputMode::from_json_flag(self.json);
        let config = OutputConfig::from_env();

        match self.dispatch(output_mode, &config).await {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(err) => {
                tracing::debug!(error = ?err, "Command failed");
                output::print_failure(&err, output_mode, &config)?;
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn dispatch(
        &self,
        output_mode: crate::output::OutputMode,
        config: &crate::output::OutputConfig,
    ) -> Result<()> {
        use crate::app::App;

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, config).await,
            Some(Commands::Query(args)) => {
                let app = App::from_directory(&std::env::current_dir()?, self.graphs.as_deref())
                    .await?
                    .with_timeout_ms(args.timeout_ms);
                execute::execute_query(&app, args, output_mode, config)
            }
            Some(Commands::Repl(args)) => {
                let app = App::from_directory(&std::env::current_dir()?, self.graphs.as_deref())
                    .await?
                    .with_timeout_ms(args.timeout_ms);
                execute::execute_repl(&app, args, output_mode, config).await
            }
            Some(Commands::Graphs(_)) => {
                let app =
                    App::from_directory(&std::env::current_dir()?, self.graphs.as_deref()).await?;
                execute::execute_graphs(&app, output_mode, config)
            }
            Some(Commands::Kinds(_)) => execute::execute_kinds(output_mode, config),
            None => {
                println!("Tangle binding graph query console");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
