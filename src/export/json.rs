//! JSON export implementation.
//!
//! Exports the module graph in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable module for JSON output.
#[derive(Serialize)]
struct JsonModule {
    filepath: String,
    dependencies: Vec<String>,
}

/// Serializable import site for JSON output.
#[derive(Serialize)]
struct JsonEdge {
    from: String,
    specifier: String,
    to: String,
}

/// Serializable cycle diagnostic for JSON output.
#[derive(Serialize)]
struct JsonCycle {
    from: String,
    to: String,
    path: String,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    modules: usize,
    import_sites: usize,
    circular_dependencies: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport {
    entry: String,
    summary: JsonSummary,
    modules: Vec<JsonModule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    edges: Vec<JsonEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    circular_dependencies: Vec<JsonCycle>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let modules: Vec<JsonModule> = data
            .modules
            .iter()
            .map(|m| JsonModule {
                filepath: m.filepath.clone(),
                dependencies: m.dependencies.clone(),
            })
            .collect();

        let edges: Vec<JsonEdge> = data
            .edges
            .iter()
            .map(|e| JsonEdge {
                from: e.from.clone(),
                specifier: e.specifier.clone(),
                to: e.to.clone(),
            })
            .collect();

        let circular_dependencies: Vec<JsonCycle> = data
            .cycles
            .iter()
            .map(|c| JsonCycle {
                from: c.from.display().to_string(),
                to: c.to.display().to_string(),
                path: c.cycle_path(),
            })
            .collect();

        let export = JsonExport {
            entry: data.entry.clone(),
            summary: JsonSummary {
                modules: data.module_count(),
                import_sites: data.edge_count(),
                circular_dependencies: data.cycle_count(),
            },
            modules,
            edges,
            circular_dependencies,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
