//! Error types for tangle console operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for tangle console operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A query failed to parse or execute.
    #[error(transparent)]
    Query(#[from] tangle_engine::Error),

    /// The query line was empty.
    #[error("You did not specify the request and its parameters.")]
    EmptyQuery,

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Graph sources could not be loaded or written.
    #[error("Binding graph sources not found: {0}")]
    Load(#[from] LoadError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.tangle/` directory in the working directory or its parents.
    #[error("Not a tangle workspace (or any parent up to mount point). Run 'tangle init' first.")]
    NotInitialized,

    /// `tangle init` ran where a workspace already exists.
    #[error("Tangle is already initialized in this directory. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The configuration file is not valid YAML for the expected shape.
    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors from loading or saving graph files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The graphs directory holds no `*.jsonl` files.
    #[error("no graph files in {}", .dir.display())]
    NoGraphs {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// A graph file or directory could not be read.
    #[error("{}: {source}", .path.display())]
    Read {
        /// The path being read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },

    /// A binding could not be serialized while saving.
    #[error("failed to serialize binding '{key}': {source}")]
    Serialize {
        /// Key of the binding being written.
        key: String,
        /// Underlying serializer failure.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for tangle console operations.
pub type Result<T> = std::result::Result<T, Error>;
