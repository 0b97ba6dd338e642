//! Loading binding graphs from JSON Lines files.
//!
//! Each line of a graph file declares one binding and its direct
//! dependencies:
//!
//! ```text
//! {"key": "com.google.Beach", "dependencies": ["com.google.IceCreamShop"]}
//! {"key": "com.google.IceCreamShop"}
//! ```
//!
//! `dependencies` may be omitted. Blank lines are ignored. Loading is
//! resilient: a bad line is skipped and reported as a [`LoadWarning`] rather
//! than failing the whole file.

use crate::catalog::NamedGraph;
use crate::error::{LoadError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tangle_engine::{DependencyGraph, GraphBuilder, GraphModel};
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// File extension of graph files.
pub const GRAPH_FILE_EXTENSION: &str = "jsonl";

/// One line of a graph file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Fully qualified binding name.
    pub key: String,

    /// Direct dependencies, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Non-fatal problems found while loading a graph file.
///
/// The offending line is skipped (or merged, for duplicates) and loading
/// carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The line is not a valid binding record.
    ///
    /// **Effect**: Line is skipped entirely.
    MalformedJson {
        /// 1-based line number.
        line_number: usize,
        /// Parser message.
        error: String,
    },

    /// The record has an empty or whitespace-only key.
    ///
    /// **Effect**: Line is skipped entirely.
    EmptyKey {
        /// 1-based line number.
        line_number: usize,
    },

    /// A dependency name is empty or whitespace-only.
    ///
    /// **Effect**: That dependency is dropped; the rest of the record loads.
    EmptyDependency {
        /// Key of the record listing it.
        key: String,
        /// 1-based line number.
        line_number: usize,
    },

    /// The key was already declared earlier in the file.
    ///
    /// **Effect**: The dependencies are merged into the first declaration.
    DuplicateBinding {
        /// The repeated key.
        key: String,
        /// 1-based line number of the repeat.
        line_number: usize,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: skipped malformed record: {error}")
            }
            Self::EmptyKey { line_number } => {
                write!(f, "line {line_number}: skipped record with empty key")
            }
            Self::EmptyDependency { key, line_number } => {
                write!(f, "line {line_number}: skipped empty dependency of '{key}'")
            }
            Self::DuplicateBinding { key, line_number } => {
                write!(f, "line {line_number}: merged duplicate binding '{key}'")
            }
        }
    }
}

/// Graphs loaded from a source, plus the warnings raised per graph.
#[derive(Debug, Default)]
pub struct LoadedGraphs {
    /// Graphs in load order.
    pub graphs: Vec<NamedGraph>,
    /// `(graph name, warning)` pairs.
    pub warnings: Vec<(String, LoadWarning)>,
}

/// Somewhere binding graphs can be loaded from.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Load every graph this source provides.
    async fn load(&self) -> Result<LoadedGraphs>;

    /// Human-readable location, for logs.
    fn location(&self) -> &Path;
}

/// Every `*.jsonl` file in a directory, one graph per file.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Source the graphs in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl GraphSource for DirectorySource {
    async fn load(&self) -> Result<LoadedGraphs> {
        load_graph_dir(&self.dir).await
    }

    fn location(&self) -> &Path {
        &self.dir
    }
}

/// A single graph file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source the graph in `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GraphSource for FileSource {
    async fn load(&self) -> Result<LoadedGraphs> {
        let (graph, warnings) = load_graph_file(&self.path).await?;
        let warnings = warnings
            .into_iter()
            .map(|warning| (graph.name.clone(), warning))
            .collect();
        Ok(LoadedGraphs {
            graphs: vec![graph],
            warnings,
        })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Pick the source for `path`: a directory of graphs or a single file.
#[must_use]
pub fn source_for(path: &Path) -> Box<dyn GraphSource> {
    if path.is_file() {
        Box::new(FileSource::new(path))
    } else {
        Box::new(DirectorySource::new(path))
    }
}

/// Parse graph records from `lines`, resiliently.
///
/// Records are merged by key in first-declaration order, then assembled into
/// a graph.
pub fn parse_graph<'a, I>(lines: I) -> (DependencyGraph, Vec<LoadWarning>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = RecordParser::default();
    for (index, line) in lines.into_iter().enumerate() {
        parser.accept(index + 1, line);
    }
    parser.finish()
}

/// Load one graph file. The graph is named after the file stem.
///
/// # Errors
///
/// Returns `LoadError::Read` if the file cannot be opened or read.
pub async fn load_graph_file(path: &Path) -> Result<(NamedGraph, Vec<LoadWarning>)> {
    let read_error = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_error)?;
    let mut lines = BufReader::new(file).lines();
    let mut parser = RecordParser::default();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await.map_err(read_error)? {
        line_number += 1;
        parser.accept(line_number, &line);
    }

    let (graph, warnings) = parser.finish();
    let name = graph_name(path);
    tracing::debug!(
        graph = %name,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        warnings = warnings.len(),
        "Loaded graph file"
    );

    Ok((NamedGraph::new(name, graph), warnings))
}

/// Load every graph file in `dir`, sorted by file name.
///
/// # Errors
///
/// - `LoadError::Read` if the directory or a file in it cannot be read
/// - `LoadError::NoGraphs` if the directory holds no graph files
pub async fn load_graph_dir(dir: &Path) -> Result<LoadedGraphs> {
    let read_error = |source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_error)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == GRAPH_FILE_EXTENSION) && path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(LoadError::NoGraphs {
            dir: dir.to_path_buf(),
        }
        .into());
    }
    paths.sort();

    let mut loaded = LoadedGraphs::default();
    for path in paths {
        let (graph, warnings) = load_graph_file(&path).await?;
        loaded
            .warnings
            .extend(warnings.into_iter().map(|w| (graph.name.clone(), w)));
        loaded.graphs.push(graph);
    }
    Ok(loaded)
}

/// Write `graph` to `path`, one record per node in declaration order.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// failed write leaves any existing file intact. The temporary file is
/// removed when the write or the rename fails.
///
/// # Errors
///
/// Returns `LoadError::Read` on IO failure and `LoadError::Serialize` if a
/// record cannot be encoded.
pub async fn save_graph_file(path: &Path, graph: &DependencyGraph) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let outcome: Result<()> = match write_records(&temp_path, graph).await {
        Ok(()) => fs::rename(&temp_path, path).await.map_err(|source| {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
            .into()
        }),
        Err(err) => Err(err),
    };

    if outcome.is_err() {
        // Best-effort cleanup of temp file
        let _ = fs::remove_file(&temp_path).await;
    }
    outcome
}

async fn write_records(temp_path: &Path, graph: &DependencyGraph) -> Result<()> {
    let write_error = |source| LoadError::Read {
        path: temp_path.to_path_buf(),
        source,
    };

    let file = File::create(temp_path).await.map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    for key in graph.all_nodes() {
        let record = BindingRecord {
            key: key.to_string(),
            dependencies: graph
                .dependencies_of(key)
                .into_iter()
                .map(str::to_string)
                .collect(),
        };
        let json = serde_json::to_string(&record).map_err(|source| LoadError::Serialize {
            key: record.key.clone(),
            source,
        })?;
        writer.write_all(json.as_bytes()).await.map_err(write_error)?;
        writer.write_all(b"\n").await.map_err(write_error)?;
    }

    writer.flush().await.map_err(write_error)?;
    Ok(())
}

fn graph_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned())
}

/// Accumulates records line by line, merging duplicate keys.
#[derive(Default)]
struct RecordParser {
    bindings: Vec<BindingRecord>,
    index: HashMap<String, usize>,
    warnings: Vec<LoadWarning>,
}

impl RecordParser {
    fn accept(&mut self, line_number: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let record: BindingRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                self.warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: err.to_string(),
                });
                return;
            }
        };

        let key = record.key.trim();
        if key.is_empty() {
            self.warnings.push(LoadWarning::EmptyKey { line_number });
            return;
        }

        // Trimmed like keys; empty names are dropped.
        let mut dependencies = Vec::with_capacity(record.dependencies.len());
        for dependency in &record.dependencies {
            let dependency = dependency.trim();
            if dependency.is_empty() {
                self.warnings.push(LoadWarning::EmptyDependency {
                    key: key.to_string(),
                    line_number,
                });
            } else {
                dependencies.push(dependency.to_string());
            }
        }

        if let Some(&existing) = self.index.get(key) {
            self.warnings.push(LoadWarning::DuplicateBinding {
                key: key.to_string(),
                line_number,
            });
            if let Some(first) = self.bindings.get_mut(existing) {
                first.dependencies.extend(dependencies);
            }
            return;
        }

        self.index.insert(key.to_string(), self.bindings.len());
        self.bindings.push(BindingRecord {
            key: key.to_string(),
            dependencies,
        });
    }

    fn finish(self) -> (DependencyGraph, Vec<LoadWarning>) {
        let mut builder = GraphBuilder::new();
        // Declare every key first so node order follows the file.
        for binding in &self.bindings {
            builder.add_node(&binding.key);
        }
        for binding in &self.bindings {
            builder.add_binding(&binding.key, &binding.dependencies);
        }
        (builder.build(), self.warnings)
    }
}
