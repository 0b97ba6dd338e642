//! Tangle engine - structured queries over dependency-injection binding graphs.
//!
//! A binding graph maps every binding (a fully qualified node name such as
//! `com.google.Cat`) to the set of bindings it directly depends on. The engine
//! answers five kinds of queries against such a graph:
//!
//! | Kind       | Parameters       | Result                                   |
//! |------------|------------------|------------------------------------------|
//! | `deps`     | node             | direct dependencies of `node`            |
//! | `rdeps`    | node             | nodes that directly depend on `node`     |
//! | `allpaths` | source, target   | every simple path from source to target  |
//! | `somepath` | source, target   | one simple path, or nothing              |
//! | `exists`   | node             | the node name itself                     |
//!
//! Every node parameter is validated before any traversal starts. A name
//! that is not in the graph fails the whole query with
//! [`Error::UnknownNode`], carrying the closest known names by edit distance.
//!
//! # Example
//!
//! ```
//! use tangle_engine::{GraphBuilder, Query, QueryExecutor, QueryKind};
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_dependency("com.google.A", "com.google.B");
//! builder.add_dependency("com.google.B", "com.google.C");
//! let graph = builder.build();
//!
//! let query = Query::new(QueryKind::AllPaths, ["com.google.A", "com.google.C"])?;
//! let results = QueryExecutor::new(&graph).execute(&query)?;
//! assert_eq!(results, vec!["com.google.A -> com.google.B -> com.google.C"]);
//! # Ok::<(), tangle_engine::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod deadline;
pub mod error;
pub mod executor;
pub mod graph;
pub mod matcher;
pub mod path;
pub mod query;
pub mod validator;

pub use config::EngineConfig;
pub use deadline::{AbortReason, CancelHandle, Deadline};
pub use error::{Error, Result};
pub use executor::{QueryExecutor, execute};
pub use graph::{DependencyGraph, GraphBuilder, GraphModel};
pub use matcher::{closest_names, distance};
pub use path::{PATH_SEPARATOR, Path, PathTracker};
pub use query::{Query, QueryKind};
pub use validator::NodeValidator;
