//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // Go up from crates/tangle to workspace root
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Helper that builds the binary once and runs it directly
pub fn get_tangle_binary() -> PathBuf {
    let workspace = workspace_root();

    // Build the binary first (this should be quick if already built)
    let status = Command::new("cargo")
        .args(["build", "--package", "tangle", "--quiet"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build tangle");

    assert!(status.success(), "Failed to build tangle binary");

    workspace.join("target/debug/tangle")
}

/// Run the tangle binary directly in the specified directory
pub fn run_tangle_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(get_tangle_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute tangle binary")
}

/// Run the tangle binary with `input` piped to stdin
pub fn run_tangle_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(get_tangle_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tangle binary");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child
        .wait_with_output()
        .expect("Failed to wait for tangle binary")
}

/// Write a graph file of `(key, dependencies)` bindings into `dir`
pub fn write_graph(dir: &Path, name: &str, bindings: &[(&str, &[&str])]) -> PathBuf {
    let path = dir.join(format!("{name}.jsonl"));
    let content: String = bindings
        .iter()
        .map(|(key, deps)| {
            format!(
                "{}\n",
                serde_json::json!({ "key": key, "dependencies": deps })
            )
        })
        .collect();
    std::fs::write(&path, content).expect("Failed to write graph file");
    path
}

/// Stdout of a finished command as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
