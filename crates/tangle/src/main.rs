//! Tangle CLI binary.

use anyhow::Result;
use std::process::ExitCode;
use tangle::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the tangle CLI.
///
/// Queries are CPU-bound and run one at a time, so a current_thread runtime
/// covers the only async work: file loading and reading the REPL input.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for results and JSON.
    // Example: RUST_LOG=tangle=debug,tangle_engine=debug tangle query deps com.a.A
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tangle=info,tangle_engine=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting tangle CLI");

    let cli = Cli::parse_args();
    let code = cli.execute().await?;

    tracing::debug!("Tangle CLI finished");
    Ok(code)
}
