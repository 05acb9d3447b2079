//! Export functionality for module graphs.
//!
//! This module provides exporters for outputting a built dependency
//! graph in various formats: JSON and Graphviz DOT.

pub mod dot;
pub mod json;

use crate::graph::{CycleDiagnostic, ModuleGraph};
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// Graphviz DOT format - renderable graph description
    Dot,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// One module in an export snapshot.
#[derive(Debug, Clone)]
pub struct ExportModule {
    /// Normalized filepath of the module.
    pub filepath: String,
    /// Raw specifiers as written in the file, in extraction order.
    pub dependencies: Vec<String>,
}

/// One import site in an export snapshot.
#[derive(Debug, Clone)]
pub struct ExportEdge {
    /// Filepath of the importing module.
    pub from: String,
    /// The raw specifier at the import site.
    pub specifier: String,
    /// Filepath of the imported module.
    pub to: String,
}

/// Data container for export operations.
///
/// Holds a snapshot of the graph so exporters do not need to borrow the
/// graph itself.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Entry file the graph was built from
    pub entry: String,
    /// All modules in depth-first pre-order
    pub modules: Vec<ExportModule>,
    /// All import sites
    pub edges: Vec<ExportEdge>,
    /// Detected circular dependencies
    pub cycles: Vec<CycleDiagnostic>,
}

impl ExportData {
    /// Create new export data from a built graph.
    pub fn new(graph: &ModuleGraph) -> Self {
        let modules = graph
            .nodes()
            .into_iter()
            .map(|node| ExportModule {
                filepath: node.filepath.display().to_string(),
                dependencies: node.dependencies.clone(),
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|(from, specifier, to)| ExportEdge {
                from: from.filepath.display().to_string(),
                specifier: specifier.to_string(),
                to: to.filepath.display().to_string(),
            })
            .collect();

        Self {
            entry: graph.entry().display().to_string(),
            modules,
            edges,
            cycles: graph.cycles().to_vec(),
        }
    }

    /// Get count of modules in the snapshot
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Get count of import sites in the snapshot
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get count of detected cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Dot => dot::DotExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
