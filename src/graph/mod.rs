//! Graph module for module dependency modeling.
//!
//! This module provides the [`ModuleGraph`] struct, built eagerly from an
//! entry file by resolving and traversing import statements with a
//! directed graph structure underneath.
//!
//! # Example
//!
//! ```rust
//! use modgraph::graph::{GraphOptions, ModuleGraph};
//! use modgraph::vfs::MemoryFileSystem;
//!
//! let mut fs = MemoryFileSystem::new();
//! fs.insert("/src/index.js", "import { run } from './run.js';");
//! fs.insert("/src/run.js", "export function run() {}");
//!
//! let graph =
//!     ModuleGraph::build_with(&fs, GraphOptions::new("/src/index.js"), &[]).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod module_graph;

pub use module_graph::{
    BuildError, BuildResult, CycleDiagnostic, GraphOptions, ImportEdge, ModuleGraph, ModuleNode,
};
