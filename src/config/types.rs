//! Shared types for build configuration.
//!
//! This module defines the data structures representing a modgraph.json
//! configuration file.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resolve::AliasMap;

/// One alias rule in a configuration file.
///
/// Aliases are serialized as an array so their order survives the round
/// trip; resolution is first-prefix-match-wins in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Specifier prefix to match (e.g. `"@/"`).
    pub find: String,

    /// Directory substituted for the matched prefix.
    pub replacement: String,
}

impl AliasConfig {
    /// Creates a new alias rule.
    pub fn new(find: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replacement: replacement.into(),
        }
    }
}

impl fmt::Display for AliasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.find, self.replacement)
    }
}

/// Represents the structure of a modgraph.json file.
///
/// Both fields are optional in the file itself; command-line flags can
/// supply or override either one. Alias directories are not validated
/// for existence here, only when a specifier is resolved against the
/// filesystem.
///
/// # Example
///
/// ```rust
/// use modgraph::config::GraphConfig;
///
/// let json = r#"{
///     "entry": "./src/index.js",
///     "aliases": [{ "find": "@/", "replacement": "./src" }]
/// }"#;
/// let config: GraphConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.entry, Some("./src/index.js".to_string()));
/// assert_eq!(config.alias_count(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Entry file the traversal starts from.
    pub entry: Option<String>,

    /// Ordered alias rules.
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
}

impl GraphConfig {
    /// Returns true if any alias rules are configured.
    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// Returns the number of configured alias rules.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Converts the configured rules into an [`AliasMap`], preserving
    /// their order.
    pub fn alias_map(&self) -> AliasMap {
        AliasMap::from_pairs(
            self.aliases
                .iter()
                .map(|a| (a.find.as_str(), a.replacement.as_str())),
        )
    }
}
