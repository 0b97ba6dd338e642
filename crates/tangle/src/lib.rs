//! Tangle - a query console for dependency-injection binding graphs.
//!
//! This crate loads component graphs from JSON Lines files, runs
//! [`tangle_engine`] queries across all of them and prints the results. It
//! provides both the `tangle` binary and a library for embedding the same
//! workflow.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod router;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod config;
pub mod output;
