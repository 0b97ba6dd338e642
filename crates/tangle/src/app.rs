//! Application context for CLI command execution.
//!
//! [`App`] finds the workspace, reads its configuration and loads every
//! component graph into a [`Catalog`] that commands query.
//!
//! # Example
//!
//! ```no_run
//! use tangle::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new("."), None).await?;
//!     println!("{} graphs loaded", app.catalog().graphs().len());
//!     Ok(())
//! }
//! ```

use crate::catalog::Catalog;
use crate::config::{CONFIG_FILE_NAME, TANGLE_DIR_NAME, TangleConfig, find_tangle_root};
use crate::error::{ConfigError, Result};
use crate::loader::{LoadWarning, source_for};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    catalog: Catalog,
    graphs_path: PathBuf,
    warnings: Vec<(String, LoadWarning)>,
}

impl App {
    /// Create an App from the workspace containing `working_dir`.
    ///
    /// `graphs_override` replaces the configured graphs location. When it is
    /// given, a workspace is optional: default engine settings are used if
    /// none is found.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No workspace is found and no override was given
    /// - Configuration cannot be loaded
    /// - The graphs cannot be loaded
    pub async fn from_directory(working_dir: &Path, graphs_override: Option<&Path>) -> Result<Self> {
        let root = find_tangle_root(working_dir);

        let config = match &root {
            Some(root) => {
                TangleConfig::load(&root.join(TANGLE_DIR_NAME).join(CONFIG_FILE_NAME)).await?
            }
            None if graphs_override.is_some() => TangleConfig::default(),
            None => return Err(ConfigError::NotInitialized.into()),
        };

        let graphs_path = match (graphs_override, &root) {
            (Some(path), _) => working_dir.join(path),
            (None, Some(root)) => config.graphs_path(root),
            (None, None) => return Err(ConfigError::NotInitialized.into()),
        };

        let source = source_for(&graphs_path);
        let loaded = source.load().await?;
        for (graph, warning) in &loaded.warnings {
            tracing::warn!(graph = %graph, "{warning}");
        }
        tracing::debug!(
            location = %source.location().display(),
            graphs = loaded.graphs.len(),
            "Loaded graphs"
        );

        Ok(Self {
            catalog: Catalog::new(loaded.graphs).with_config(config.engine),
            graphs_path,
            warnings: loaded.warnings,
        })
    }

    /// Override the per-query timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if timeout_ms.is_some() {
            let mut config = self.catalog.config().clone();
            config.timeout_ms = timeout_ms;
            self.catalog = self.catalog.with_config(config);
        }
        self
    }

    /// The loaded graphs.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Where the graphs were loaded from.
    pub fn graphs_path(&self) -> &Path {
        &self.graphs_path
    }

    /// Warnings raised while loading, per graph name.
    pub fn warnings(&self) -> &[(String, LoadWarning)] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_app_from_initialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), true).await.unwrap();

        let app = App::from_directory(temp_dir.path(), None).await.unwrap();

        assert_eq!(app.catalog().graphs().len(), 1);
        assert!(app.graphs_path().ends_with(".tangle/graphs"));
        assert!(app.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_app_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), true).await.unwrap();

        let sub_dir = temp_dir.path().join("src").join("main");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir, None).await.unwrap();
        assert_eq!(app.catalog().graphs()[0].name, "beach");
    }

    #[tokio::test]
    async fn test_app_from_uninitialized_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = App::from_directory(temp_dir.path(), None).await.unwrap_err();
        assert!(err.to_string().contains("Not a tangle workspace"));
    }

    #[tokio::test]
    async fn test_graphs_override_without_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("cats.jsonl");
        std::fs::write(&file, "{\"key\": \"A\", \"dependencies\": [\"B\"]}\nbroken\n").unwrap();

        let app = App::from_directory(temp_dir.path(), Some(Path::new("cats.jsonl")))
            .await
            .unwrap()
            .with_timeout_ms(Some(1000));

        assert_eq!(app.catalog().graphs()[0].name, "cats");
        assert_eq!(app.catalog().config().timeout_ms, Some(1000));
        assert_eq!(app.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_graphs_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), false).await.unwrap();

        let err = App::from_directory(temp_dir.path(), None).await.unwrap_err();
        assert!(err.to_string().contains("no graph files"));
    }
}
