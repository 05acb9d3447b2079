//! Graphviz DOT export implementation.
//!
//! Exports the module graph as a DOT digraph, with edges labeled by the
//! raw specifier written at each import site.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

impl DotExporter {
    /// Escape a value for use inside a double-quoted DOT string.
    fn escape(value: &str) -> String {
        value.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph modules {{")?;
        writeln!(writer, "    rankdir=LR;")?;

        // Declare every module so isolated nodes still render.
        for module in &data.modules {
            writeln!(writer, "    \"{}\";", Self::escape(&module.filepath))?;
        }

        for edge in &data.edges {
            writeln!(
                writer,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                Self::escape(&edge.from),
                Self::escape(&edge.to),
                Self::escape(&edge.specifier)
            )?;
        }

        writeln!(writer, "}}")
    }
}
