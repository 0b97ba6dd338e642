//! Implementation of the `init` command.
//!
//! Creates the `.tangle/` directory with a default configuration and an
//! empty graphs directory, optionally seeded with a sample component graph.

use crate::config::{CONFIG_FILE_NAME, DEFAULT_GRAPHS_DIR, TANGLE_DIR_NAME, TangleConfig};
use crate::error::{ConfigError, Result};
use crate::loader::save_graph_file;
use std::path::{Path, PathBuf};
use tangle_engine::DependencyGraph;
use tokio::fs;

/// File name of the sample graph written by `init --example`
pub const EXAMPLE_GRAPH_FILE: &str = "beach.jsonl";

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created tangle directory
    pub tangle_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created graphs directory
    pub graphs_dir: PathBuf,
    /// Path to the sample graph, if one was written
    pub example_graph: Option<PathBuf>,
}

/// Initialize a new tangle workspace in `base_dir`.
///
/// # Errors
///
/// Returns an error if:
/// - The `.tangle/` directory already exists
/// - File system operations fail
pub async fn init(base_dir: &Path, example: bool) -> Result<InitResult> {
    let tangle_dir = base_dir.join(TANGLE_DIR_NAME);

    if tangle_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(tangle_dir).into());
    }

    fs::create_dir_all(&tangle_dir).await?;

    let config_file = tangle_dir.join(CONFIG_FILE_NAME);
    TangleConfig::default().save(&config_file).await?;

    let graphs_dir = base_dir.join(DEFAULT_GRAPHS_DIR);
    fs::create_dir_all(&graphs_dir).await?;

    let example_graph = if example {
        let path = graphs_dir.join(EXAMPLE_GRAPH_FILE);
        save_graph_file(&path, &beach_graph()).await?;
        Some(path)
    } else {
        None
    };

    tracing::debug!(dir = %tangle_dir.display(), example, "Initialized workspace");

    Ok(InitResult {
        tangle_dir,
        config_file,
        graphs_dir,
        example_graph,
    })
}

/// A small beach resort component, for trying queries out.
#[must_use]
pub fn beach_graph() -> DependencyGraph {
    DependencyGraph::from_adjacency([
        ("com.example.beach.BeachComponent", vec!["com.example.beach.Beach"]),
        (
            "com.example.beach.Beach",
            vec![
                "java.util.Set<com.example.beach.Tourist>",
                "java.util.Set<com.example.beach.Staff>",
                "com.example.beach.IceCreamShop",
            ],
        ),
        (
            "java.util.Set<com.example.beach.Tourist>",
            vec!["com.example.beach.Tourist"],
        ),
        (
            "java.util.Set<com.example.beach.Staff>",
            vec!["com.example.beach.Lifeguard"],
        ),
        (
            "java.util.List<com.example.beach.Staff>",
            vec!["com.example.beach.Manager"],
        ),
        (
            "com.example.beach.TouristsComponent",
            vec!["com.example.beach.Tourist"],
        ),
        (
            "com.example.beach.Apartment",
            vec![
                "com.example.beach.Bed",
                "com.example.beach.MiniBar",
                "com.example.beach.TV",
                "com.example.beach.Phone",
                "com.example.beach.Tourist",
            ],
        ),
        (
            "com.example.beach.MiniBar",
            vec![
                "com.example.beach.CocaCola",
                "com.example.beach.Fanta",
                "com.example.beach.Sprite",
            ],
        ),
    ])
}
