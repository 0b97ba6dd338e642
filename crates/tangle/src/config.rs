//! Workspace configuration.
//!
//! A tangle workspace is a directory containing `.tangle/config.yaml`:
//!
//! ```yaml
//! graphs: .tangle/graphs
//! engine:
//!   max-edit-distance: 3
//!   max-suggestions: null
//!   timeout-ms: 5000
//! ```
//!
//! `graphs` is resolved relative to the workspace root.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tangle_engine::EngineConfig;
use tokio::fs;

/// Name of the tangle directory
pub const TANGLE_DIR_NAME: &str = ".tangle";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default location of graph files, relative to the workspace root
pub const DEFAULT_GRAPHS_DIR: &str = ".tangle/graphs";

/// Maximum directory depth to traverse when searching for the workspace root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for tangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TangleConfig {
    /// Directory (or single file) holding the binding graphs
    #[serde(default = "default_graphs")]
    pub graphs: String,

    /// Query engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_graphs() -> String {
    DEFAULT_GRAPHS_DIR.to_string()
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            graphs: default_graphs(),
            engine: EngineConfig::default(),
        }
    }
}

impl TangleConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or
    /// `ConfigError::Yaml` if it is not a valid configuration.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Yaml` if `content` is not a valid configuration.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content).map_err(ConfigError::Yaml)?)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(ConfigError::Yaml)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Absolute location of the graphs for a workspace rooted at `root`.
    #[must_use]
    pub fn graphs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.graphs)
    }
}

/// Find the workspace root by searching up the directory tree.
///
/// Returns the first directory, starting at `start_dir`, that contains a
/// `.tangle/` directory, or `None` once the filesystem root or the maximum
/// traversal depth is reached.
#[must_use]
pub fn find_tangle_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(TANGLE_DIR_NAME).is_dir() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
