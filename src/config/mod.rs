//! Configuration module for modgraph.
//!
//! This module loads build configuration from modgraph.json files: the
//! entry file and the ordered alias rules used during specifier
//! resolution. Command-line flags can supply either value directly, so
//! every field in the file is optional on its own.
//!
//! # Example
//!
//! ```rust
//! use modgraph::config;
//!
//! let json = r#"{
//!     "entry": "./src/index.js",
//!     "aliases": [{ "find": "@/", "replacement": "./src" }]
//! }"#;
//!
//! let config = config::parse_str(json).unwrap();
//! let aliases = config.alias_map();
//!
//! assert_eq!(config.entry, Some("./src/index.js".to_string()));
//! assert_eq!(aliases.len(), 1);
//! ```

pub mod file;
pub mod types;

// Re-export commonly used items for convenience
pub use file::{parse_file, parse_str, validate, ConfigError, ConfigResult};
pub use types::{AliasConfig, GraphConfig};
