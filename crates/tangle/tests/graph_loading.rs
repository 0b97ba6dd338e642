//! Integration tests for loading graph files and querying them.
//!
//! # Test Coverage
//!
//! - Resilient loading of damaged graph files
//! - Directory loading order and graph naming
//! - Save then load preserving declaration and dependency order
//! - Queries over a catalog built from loaded files

use std::io::Write;
use tangle::catalog::Catalog;
use tangle::loader::{
    DirectorySource, FileSource, GraphSource, LoadWarning, load_graph_dir, load_graph_file,
    save_graph_file,
};
use tangle_engine::{DependencyGraph, GraphModel, Query, QueryKind};
use tempfile::{NamedTempFile, TempDir};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_temp_jsonl_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".jsonl")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn query(kind: QueryKind, params: &[&str]) -> Query {
    Query::new(kind, params.iter().copied()).unwrap()
}

// =============================================================================
// Resilient Loading
// =============================================================================

#[tokio::test]
async fn test_damaged_file_loads_remaining_records() {
    let file = create_temp_jsonl_file(
        r#"{"key": "com.a.Component", "dependencies": ["com.a.Service"]}
{"key": "com.a.Service", "dependencies": ["com.a.Repo"]
{"key": "  ", "dependencies": ["com.a.Lost"]}

{"key": "com.a.Service", "dependencies": ["com.a.Clock"]}
{"key": "com.a.Repo"}
"#,
    );

    let (named, warnings) = load_graph_file(file.path()).await.unwrap();

    assert_eq!(warnings.len(), 2);
    assert!(matches!(warnings[0], LoadWarning::MalformedJson { line_number: 2, .. }));
    assert_eq!(warnings[1], LoadWarning::EmptyKey { line_number: 3 });

    // The broken line 2 is gone; the valid redeclaration on line 5 stands alone.
    assert_eq!(named.graph.dependencies_of("com.a.Service"), vec!["com.a.Clock"]);
    assert!(named.graph.contains("com.a.Repo"));
    assert!(!named.graph.contains("com.a.Lost"));
}

#[tokio::test]
async fn test_duplicate_keys_merge_with_warning() {
    let file = create_temp_jsonl_file(
        r#"{"key": "A", "dependencies": ["B"]}
{"key": "A", "dependencies": ["C", "B"]}
"#,
    );

    let (named, warnings) = load_graph_file(file.path()).await.unwrap();

    assert_eq!(
        warnings,
        vec![LoadWarning::DuplicateBinding {
            key: "A".to_string(),
            line_number: 2,
        }]
    );
    assert_eq!(named.graph.dependencies_of("A"), vec!["B", "C"]);
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();

    let err = load_graph_file(&temp_dir.path().join("absent.jsonl"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("absent.jsonl"));
}

// =============================================================================
// Directories and Sources
// =============================================================================

#[tokio::test]
async fn test_directory_loads_in_name_order() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("zoo.jsonl"), "{\"key\": \"Z\"}\n").unwrap();
    std::fs::write(temp_dir.path().join("app.jsonl"), "{\"key\": \"A\"}\n").unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), "not a graph").unwrap();

    let loaded = load_graph_dir(temp_dir.path()).await.unwrap();

    let names: Vec<&str> = loaded.graphs.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["app", "zoo"]);
    assert!(loaded.warnings.is_empty());
}

#[tokio::test]
async fn test_sources_agree_on_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("only.jsonl");
    std::fs::write(&path, "{\"key\": \"A\", \"dependencies\": [\"B\"]}\nnope\n").unwrap();

    let from_dir = DirectorySource::new(temp_dir.path()).load().await.unwrap();
    let from_file = FileSource::new(&path).load().await.unwrap();

    assert_eq!(from_dir.graphs.len(), 1);
    assert_eq!(from_file.graphs.len(), 1);
    assert_eq!(from_dir.warnings, from_file.warnings);
    assert_eq!(from_file.warnings[0].0, "only");
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_save_then_load_preserves_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.jsonl");
    let graph = DependencyGraph::from_adjacency([
        ("com.a.Component", vec!["com.a.Zeta", "com.a.Alpha"]),
        ("com.a.Alpha", vec!["com.a.Zeta"]),
    ]);

    save_graph_file(&path, &graph).await.unwrap();
    let (named, warnings) = load_graph_file(&path).await.unwrap();

    assert!(warnings.is_empty());
    assert_eq!(named.graph.all_nodes(), graph.all_nodes());
    assert_eq!(
        named.graph.dependencies_of("com.a.Component"),
        vec!["com.a.Zeta", "com.a.Alpha"]
    );
    assert!(!temp_dir.path().join("saved.tmp").exists());
}

// =============================================================================
// Querying Loaded Graphs
// =============================================================================

#[tokio::test]
async fn test_catalog_over_loaded_directory() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("first.jsonl"),
        "{\"key\": \"com.a.Root\", \"dependencies\": [\"com.a.Mid\", \"com.a.Leaf\"]}\n\
         {\"key\": \"com.a.Mid\", \"dependencies\": [\"com.a.Leaf\"]}\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("second.jsonl"),
        "{\"key\": \"com.a.Root\", \"dependencies\": [\"com.a.Leaf\"]}\n",
    )
    .unwrap();

    let loaded = load_graph_dir(temp_dir.path()).await.unwrap();
    let catalog = Catalog::new(loaded.graphs);

    let results = catalog
        .execute(&query(QueryKind::AllPaths, &["com.a.Root", "com.a.Leaf"]))
        .unwrap();

    assert_eq!(
        results,
        vec![
            "com.a.Root -> com.a.Mid -> com.a.Leaf",
            "com.a.Root -> com.a.Leaf",
            "com.a.Root -> com.a.Leaf",
        ]
    );
}
