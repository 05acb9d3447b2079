//! Module dependency graph implementation using petgraph.
//!
//! Provides a directed graph of source modules built by traversing import
//! statements from an entry file, with alias resolution, cycle detection,
//! and per-import-site edge tracking.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::extract::{ExtractError, ExtractorPlugin, SourceLanguage, StatementExtractor};
use crate::resolve::{join_relative, normalize, AliasMap};
use crate::vfs::{FileSystem, OsFileSystem};

/// Errors that abort graph construction.
///
/// Both variants are fatal: when construction fails no partial graph is
/// returned. Cycles are not errors, see [`CycleDiagnostic`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The entry file or an internal dependency could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A visited file could not be parsed as module code.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Result type for graph construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// A single visited module file.
///
/// One node exists per distinct filepath. Nodes are immutable once
/// constructed and owned by the graph.
#[derive(Debug, Clone)]
pub struct ModuleNode {
    /// Normalized path of the module file.
    pub filepath: PathBuf,
    /// The full source text of the file.
    pub source: String,
    /// Raw dependency specifiers as written in the file, in extraction
    /// order. These are unresolved; resolution happens per edge during
    /// traversal.
    pub dependencies: Vec<String>,
}

impl ModuleNode {
    /// Creates a new module node.
    pub fn new(
        filepath: impl Into<PathBuf>,
        source: impl Into<String>,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            filepath: filepath.into(),
            source: source.into(),
            dependencies,
        }
    }
}

/// One import site: an edge from the importing module to the module its
/// raw specifier resolved to.
///
/// Parallel edges are allowed, so a file importing the same dependency
/// twice keeps both sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// The raw specifier as written at the import site.
    pub specifier: String,
}

impl ImportEdge {
    /// Creates a new import edge.
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
        }
    }
}

/// A dependency edge that points back into the current traversal path.
///
/// Cycles are diagnostics, not errors: the back-edge is recorded as a
/// dependency of the importing module, but the target is not expanded
/// again and traversal continues with sibling edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDiagnostic {
    /// The module whose import closes the cycle.
    pub from: PathBuf,
    /// The already-visited module the import points back to.
    pub to: PathBuf,
    /// The visitation path from the entry to `from` at detection time.
    pub stack: Vec<PathBuf>,
}

impl CycleDiagnostic {
    /// Returns a formatted representation of the cycle path.
    ///
    /// For example: "main.js -> a.js -> main.js"
    pub fn cycle_path(&self) -> String {
        let start = self
            .stack
            .iter()
            .position(|p| p == &self.to)
            .unwrap_or(0);

        let mut parts: Vec<String> = self.stack[start..]
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        parts.push(self.to.display().to_string());
        parts.join(" -> ")
    }
}

/// Configuration for graph construction.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Entry file the traversal starts from.
    pub entry: PathBuf,
    /// Ordered alias rules applied to raw specifiers.
    pub aliases: AliasMap,
}

impl GraphOptions {
    /// Creates options with an entry file and no aliases.
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            aliases: AliasMap::new(),
        }
    }

    /// Sets the alias rules.
    pub fn with_aliases(mut self, aliases: AliasMap) -> Self {
        self.aliases = aliases;
        self
    }
}

/// A directed graph of module files reachable from an entry file.
///
/// Construction is eager: building the graph reads the entry file,
/// extracts its import specifiers, and traverses dependencies depth-first
/// until the reachable set is exhausted or a fatal error occurs. Each
/// specifier is alias-resolved first; when no alias matches it is joined
/// against the importing file's directory. Specifiers that resolve to a
/// path that does not exist are external (a package-manager dependency,
/// a builtin) and are skipped without error.
///
/// Nodes are stored once per filepath; reaching the same file through a
/// second import chain records a new edge, not a new node. The node
/// sequence is depth-first pre-order from the entry.
///
/// # Example
///
/// ```rust
/// use modgraph::graph::{GraphOptions, ModuleGraph};
/// use modgraph::vfs::MemoryFileSystem;
///
/// let mut fs = MemoryFileSystem::new();
/// fs.insert("/src/index.js", "import { a } from './a.js';");
/// fs.insert("/src/a.js", "export const a = 1;");
///
/// let graph =
///     ModuleGraph::build_with(&fs, GraphOptions::new("/src/index.js"), &[]).unwrap();
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert!(!graph.has_cycles());
/// ```
#[derive(Debug)]
pub struct ModuleGraph {
    /// The underlying directed graph; node insertion order is the
    /// depth-first pre-order of the traversal.
    graph: DiGraph<ModuleNode, ImportEdge>,
    /// Maps normalized filepaths to their node indices for O(1) lookup.
    node_indices: HashMap<PathBuf, NodeIndex>,
    /// Cycle diagnostics collected during construction.
    cycles: Vec<CycleDiagnostic>,
    /// Normalized entry path.
    entry: PathBuf,
    /// Ordered alias rules.
    aliases: AliasMap,
}

impl ModuleGraph {
    /// Builds the graph from an entry file on the real filesystem.
    ///
    /// # Arguments
    ///
    /// * `entry` - Path of the entry file, which must exist and be readable
    /// * `aliases` - Ordered alias rules for specifier resolution
    ///
    /// # Returns
    ///
    /// The fully constructed graph, or the first fatal [`BuildError`].
    pub fn build(entry: impl Into<PathBuf>, aliases: AliasMap) -> BuildResult<Self> {
        Self::build_with(
            &OsFileSystem,
            GraphOptions::new(entry).with_aliases(aliases),
            &[],
        )
    }

    /// Builds the graph against an explicit filesystem and plugin list.
    ///
    /// This is the full-control entry point used by tests and benchmarks;
    /// [`ModuleGraph::build`] delegates here with the OS filesystem and no
    /// plugins.
    pub fn build_with<F: FileSystem>(
        fs: &F,
        options: GraphOptions,
        plugins: &[&dyn ExtractorPlugin],
    ) -> BuildResult<Self> {
        let entry = normalize(&options.entry);
        let mut extractor = StatementExtractor::new()?;

        let mut graph = Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            cycles: Vec::new(),
            entry: entry.clone(),
            aliases: options.aliases,
        };

        let entry_node = read_node(fs, &mut extractor, plugins, &entry)?;
        let entry_idx = graph.insert_node(entry_node);
        graph.expand(fs, &mut extractor, plugins, entry_idx, vec![entry])?;

        Ok(graph)
    }

    /// Expands one node: resolves each of its raw specifiers and recurses
    /// into newly discovered internal modules.
    ///
    /// `visitation_path` is the chain of filepaths from the entry to the
    /// node being expanded, inclusive. Each branch carries its own copy,
    /// so sibling subtrees cannot see each other's paths.
    fn expand<F: FileSystem>(
        &mut self,
        fs: &F,
        extractor: &mut StatementExtractor,
        plugins: &[&dyn ExtractorPlugin],
        idx: NodeIndex,
        visitation_path: Vec<PathBuf>,
    ) -> BuildResult<()> {
        let importer = self.graph[idx].filepath.clone();
        let specifiers = self.graph[idx].dependencies.clone();

        for specifier in specifiers {
            let dep_path = self.resolve_specifier(&importer, &specifier);

            // External specifier: not a file in this source tree, so it
            // produces neither a node nor an error.
            if !fs.exists(&dep_path) {
                continue;
            }

            if visitation_path.contains(&dep_path) {
                self.cycles.push(CycleDiagnostic {
                    from: importer.clone(),
                    to: dep_path.clone(),
                    stack: visitation_path.clone(),
                });
                // The back-edge is still a dependency of the importer;
                // only the expansion stops here.
                if let Some(&to_idx) = self.node_indices.get(&dep_path) {
                    self.graph.add_edge(idx, to_idx, ImportEdge::new(specifier.as_str()));
                }
                continue;
            }

            // Already reached through another branch: record the new
            // import site, keep the single node.
            if let Some(&seen_idx) = self.node_indices.get(&dep_path) {
                self.graph.add_edge(idx, seen_idx, ImportEdge::new(specifier.as_str()));
                continue;
            }

            let node = read_node(fs, extractor, plugins, &dep_path)?;
            let dep_idx = self.insert_node(node);
            self.graph.add_edge(idx, dep_idx, ImportEdge::new(specifier.as_str()));

            let mut child_path = visitation_path.clone();
            child_path.push(dep_path);
            self.expand(fs, extractor, plugins, dep_idx, child_path)?;
        }

        Ok(())
    }

    fn insert_node(&mut self, node: ModuleNode) -> NodeIndex {
        let filepath = node.filepath.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(filepath, idx);
        idx
    }

    /// Resolves a raw specifier for traversal: alias expansion first,
    /// directory-relative joining as the fallback.
    fn resolve_specifier(&self, importer: &Path, specifier: &str) -> PathBuf {
        self.aliases
            .resolve(specifier)
            .unwrap_or_else(|| join_relative(importer, specifier))
    }

    /// Expands a raw path against the configured aliases.
    ///
    /// The first alias whose prefix matches wins; when none matches the
    /// raw path is returned unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::path::Path;
    /// use modgraph::graph::{GraphOptions, ModuleGraph};
    /// use modgraph::resolve::AliasMap;
    /// use modgraph::vfs::MemoryFileSystem;
    ///
    /// let mut fs = MemoryFileSystem::new();
    /// fs.insert("/app/main.js", "");
    ///
    /// let aliases = AliasMap::from_pairs([("@/", "/app/src")]);
    /// let graph = ModuleGraph::build_with(
    ///     &fs,
    ///     GraphOptions::new("/app/main.js").with_aliases(aliases),
    ///     &[],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(graph.resolve_alias("@/util.js"), Path::new("/app/src/util.js"));
    /// assert_eq!(graph.resolve_alias("./local.js"), Path::new("./local.js"));
    /// ```
    pub fn resolve_alias(&self, raw: &str) -> PathBuf {
        self.aliases
            .resolve(raw)
            .unwrap_or_else(|| PathBuf::from(raw))
    }

    /// Returns true if the alias-resolved path exists on the given
    /// filesystem, classifying the specifier as project-internal.
    pub fn is_internal_module<F: FileSystem>(&self, fs: &F, raw: &str) -> bool {
        fs.exists(&self.resolve_alias(raw))
    }

    /// All nodes recorded for an exact filepath.
    ///
    /// The node store is keyed by filepath, so this returns at most one
    /// node; the sequence shape mirrors the lookup being an exact-path
    /// filter rather than an existence test.
    pub fn nodes_with_path(&self, filepath: &Path) -> Vec<&ModuleNode> {
        self.get_node(filepath).into_iter().collect()
    }

    /// The raw specifier list recorded on the node at `filepath`, or
    /// empty when no such node exists.
    pub fn direct_dependencies(&self, filepath: &Path) -> &[String] {
        self.get_node(filepath)
            .map(|node| node.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Gets a node by filepath.
    pub fn get_node(&self, filepath: &Path) -> Option<&ModuleNode> {
        self.node_indices
            .get(&normalize(filepath))
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// All nodes in depth-first pre-order from the entry.
    pub fn nodes(&self) -> Vec<&ModuleNode> {
        self.graph.node_weights().collect()
    }

    /// The modules that `filepath` imports (outgoing edges).
    pub fn dependencies_of(&self, filepath: &Path) -> Vec<&ModuleNode> {
        let Some(&idx) = self.node_indices.get(&normalize(filepath)) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .collect()
    }

    /// The modules that import `filepath` (incoming edges).
    pub fn dependents_of(&self, filepath: &Path) -> Vec<&ModuleNode> {
        let Some(&idx) = self.node_indices.get(&normalize(filepath)) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .collect()
    }

    /// All import sites as (importer, raw specifier, imported) triples.
    pub fn edges(&self) -> Vec<(&ModuleNode, &str, &ModuleNode)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    &self.graph[edge.source()],
                    edge.weight().specifier.as_str(),
                    &self.graph[edge.target()],
                )
            })
            .collect()
    }

    /// Cycle diagnostics collected during construction, in detection
    /// order.
    pub fn cycles(&self) -> &[CycleDiagnostic] {
        &self.cycles
    }

    /// Returns true if any cycle was detected.
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// The normalized entry path.
    pub fn entry(&self) -> &Path {
        &self.entry
    }

    /// The configured alias rules.
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of import edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if a node exists for the given filepath.
    pub fn contains(&self, filepath: &Path) -> bool {
        self.node_indices.contains_key(&normalize(filepath))
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

/// Reads and extracts one module file.
///
/// The caller has already confirmed existence; a read failure here is
/// fatal for the whole build, as is a parse failure.
fn read_node<F: FileSystem>(
    fs: &F,
    extractor: &mut StatementExtractor,
    plugins: &[&dyn ExtractorPlugin],
    path: &Path,
) -> BuildResult<ModuleNode> {
    let source = fs.read_text(path).map_err(|err| BuildError::FileRead {
        path: path.to_path_buf(),
        source: err,
    })?;

    let language = SourceLanguage::from_path(path);
    let dependencies = extractor.extract_with(&source, language, path, plugins)?;

    Ok(ModuleNode::new(path, source, dependencies))
}
