//! modgraph - Static module dependency graph builder for JavaScript and TypeScript
//!
//! Given an entry file, this crate parses each file's import and require
//! statements, resolves every specifier to a file on disk (honoring an
//! ordered set of path aliases), and recursively visits dependencies to
//! assemble a module graph with cycle detection.

pub mod config;
pub mod export;
pub mod extract;
pub mod graph;
pub mod resolve;
pub mod vfs;
