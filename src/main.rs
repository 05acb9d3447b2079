use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use modgraph::config;
use modgraph::export::{self, ExportData, ExportFormat};
use modgraph::graph::ModuleGraph;
use modgraph::resolve::AliasMap;

#[derive(Parser)]
#[command(name = "modgraph")]
#[command(version = "0.1.0")]
#[command(about = "Static module dependency graph builder for JavaScript and TypeScript", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency graph from an entry file
    Build {
        /// Entry file to start traversal from (falls back to the config file)
        entry: Option<PathBuf>,

        /// Alias rule as FIND=DIR, repeatable, matched in the given order
        #[arg(short, long, value_name = "FIND=DIR")]
        alias: Vec<String>,

        /// Path to a modgraph.json configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (json or dot)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            entry,
            alias,
            config,
            format,
            output,
        } => build(entry, alias, config, format, output),
        Commands::Version => {
            println!("modgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn build(
    entry: Option<PathBuf>,
    alias_args: Vec<String>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;

    let file_config = config_path
        .as_deref()
        .map(config::parse_file)
        .transpose()
        .context("failed to load configuration")?;

    // Command-line values win over the config file.
    let entry = entry
        .or_else(|| {
            file_config
                .as_ref()
                .and_then(|c| c.entry.as_ref().map(PathBuf::from))
        })
        .ok_or_else(|| {
            anyhow!("no entry file given; pass one as an argument or set \"entry\" in modgraph.json")
        })?;

    let aliases = if alias_args.is_empty() {
        file_config
            .as_ref()
            .map(|c| c.alias_map())
            .unwrap_or_default()
    } else {
        parse_alias_args(&alias_args)?
    };

    let graph = ModuleGraph::build(&entry, aliases)
        .with_context(|| format!("failed to build graph from {}", entry.display()))?;

    for cycle in graph.cycles() {
        eprintln!("warning: circular dependency: {}", cycle.cycle_path());
    }

    let data = ExportData::new(&graph);
    let rendered = export::export_to_string(format, &data)?;

    match output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}

fn parse_alias_args(args: &[String]) -> Result<AliasMap> {
    let mut aliases = AliasMap::new();
    for arg in args {
        let (find, replacement) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid alias '{}', expected FIND=DIR", arg))?;
        aliases.push(find, replacement);
    }
    Ok(aliases)
}
