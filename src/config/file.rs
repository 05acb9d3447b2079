//! Loader for modgraph.json configuration files.
//!
//! This module reads and validates build configuration from disk,
//! keeping file handling separate from the configuration types.

use std::fs;
use std::path::Path;

use super::types::GraphConfig;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The configuration is structurally valid JSON but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parses a modgraph.json file from a file path.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Returns
///
/// A `ConfigResult` containing the parsed `GraphConfig` or an error.
pub fn parse_file(path: &Path) -> ConfigResult<GraphConfig> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a configuration from a JSON string.
///
/// # Example
///
/// ```
/// use modgraph::config::parse_str;
///
/// let json = r#"{"entry": "./src/index.js"}"#;
/// let config = parse_str(json).unwrap();
/// assert_eq!(config.entry, Some("./src/index.js".to_string()));
/// ```
pub fn parse_str(content: &str) -> ConfigResult<GraphConfig> {
    let config: GraphConfig = serde_json::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates a parsed configuration.
///
/// A configuration must carry at least an entry or one alias rule to be
/// worth loading, and no alias may have an empty prefix (an empty
/// prefix would match every specifier).
pub fn validate(config: &GraphConfig) -> ConfigResult<()> {
    if config.entry.is_none() && !config.has_aliases() {
        return Err(ConfigError::InvalidConfig(
            "configuration has no entry and no aliases".to_string(),
        ));
    }

    for alias in &config.aliases {
        if alias.find.is_empty() {
            return Err(ConfigError::InvalidConfig(format!(
                "alias with empty find prefix (replacement: {})",
                alias.replacement
            )));
        }
    }

    Ok(())
}
