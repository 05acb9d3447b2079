//! Path and alias resolution for raw import specifiers.
//!
//! A raw specifier as written in source (`'@/ui/button'`, `'./util.js'`)
//! is turned into a concrete filesystem path in two steps: alias expansion
//! against an ordered [`AliasMap`], falling back to joining against the
//! importing file's directory when no alias matches.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// One alias rule: a raw-specifier prefix and the directory it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Specifier prefix to match (e.g. `"@/"`).
    pub find: String,
    /// Directory substituted for the prefix (e.g. `"/project/src"`).
    pub replacement: PathBuf,
}

impl AliasEntry {
    /// Creates a new alias entry.
    pub fn new(find: impl Into<String>, replacement: impl Into<PathBuf>) -> Self {
        Self {
            find: find.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered mapping from specifier prefixes to replacement directories.
///
/// Resolution is first-prefix-match-wins in insertion order, deliberately
/// not longest-prefix. With `@/ -> /src` configured before `@/ui/ ->
/// /widgets`, the specifier `@/ui/button` resolves under `/src`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use modgraph::resolve::AliasMap;
///
/// let mut aliases = AliasMap::new();
/// aliases.push("@/", "/src");
/// aliases.push("@/ui/", "/widgets");
///
/// assert_eq!(
///     aliases.resolve("@/ui/button").unwrap(),
///     Path::new("/src/ui/button")
/// );
/// assert!(aliases.resolve("./relative").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: Vec<AliasEntry>,
}

impl AliasMap {
    /// Creates an empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an alias map from `(find, replacement)` pairs, preserving
    /// iteration order.
    pub fn from_pairs<F, R, I>(pairs: I) -> Self
    where
        F: Into<String>,
        R: Into<PathBuf>,
        I: IntoIterator<Item = (F, R)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(find, replacement)| AliasEntry::new(find, replacement))
                .collect(),
        }
    }

    /// Appends an alias rule. Later rules only apply to specifiers no
    /// earlier rule's prefix matches.
    pub fn push(&mut self, find: impl Into<String>, replacement: impl Into<PathBuf>) {
        self.entries.push(AliasEntry::new(find, replacement));
    }

    /// Resolves a raw specifier against the configured aliases.
    ///
    /// Returns the normalized replacement path for the first entry whose
    /// `find` is a prefix of `raw`, or `None` when no entry matches.
    pub fn resolve(&self, raw: &str) -> Option<PathBuf> {
        for entry in &self.entries {
            if let Some(rest) = raw.strip_prefix(&entry.find) {
                return Some(entry.replacement.join(rest).clean());
            }
        }
        None
    }

    /// Returns the configured rules in match order.
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    /// Returns the number of configured rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lexically normalizes a path (resolves `.` and `..` segments) without
/// touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    path.clean()
}

/// Joins a specifier against the directory of the importing file and
/// normalizes the result.
///
/// This is the fallback used for specifiers no alias matches, mirroring
/// how relative imports are resolved by module systems.
pub fn join_relative(importer: &Path, specifier: &str) -> PathBuf {
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    dir.join(specifier).clean()
}
