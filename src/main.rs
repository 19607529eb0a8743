//! ordo - CLI

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use ordo::emit::{self, Format};
use ordo::input;
use ordo::traverse::{self, Order, Traversal, VisitedSet};
use ordo::util::config::{self, Config, ConfigLayer};
use ordo::util::logger::{self, LogLevel};
use ordo::{find_cycle, sort, sort_levels, NAME, VERSION};

/// Dependency ordering and structural traversal
#[derive(Parser, Debug)]
#[command(name = "ordo")]
#[command(author = "Ordo Team")]
#[command(version = VERSION)]
#[command(about = "Order dependency maps and walk reference graphs", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: plain, alias or json
    #[arg(short, long, global = true, value_name = "FORMAT")]
    format: Option<Format>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a dependency map in dependency order
    Sort {
        /// JSON dependency map
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Group nodes into levels that can be processed together
        #[arg(short, long)]
        levels: bool,
    },

    /// Walk a reference graph from one or more roots
    Traverse {
        /// JSON reference graph
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Root node, repeatable; defaults to every key in file order
        #[arg(short, long = "root", value_name = "NODE")]
        roots: Vec<String>,

        /// Traversal order: post or in
        #[arg(short, long)]
        order: Option<Order>,
    },

    /// Report one dependency cycle; exits non-zero if one is found
    Cycle {
        /// JSON dependency map
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Args {
    /// The command line as the highest-priority config layer.
    fn overrides(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        if self.verbose {
            layer.log.level = Some(LogLevel::Debug);
        }
        layer.output.format = self.format;
        if self.no_color {
            layer.output.color = Some(false);
        }
        if let Commands::Traverse { order, .. } = &self.command {
            layer.traverse.order = *order;
        }
        layer
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = config::load_merged(&args.overrides()).context("Failed to load configuration")?;
    logger::init_with_level(config.log.level);

    if args.verbose {
        eprintln!("{} version: {}", NAME, VERSION);
        eprintln!("Host: {}", std::env::consts::OS);
    }

    match &args.command {
        Commands::Sort { file, levels } => run_sort(file, *levels, &config),
        Commands::Traverse { file, roots, .. } => run_traverse(file, roots, &config),
        Commands::Cycle { file } => run_cycle(file, &config),
    }
}

fn run_sort(
    file: &Path,
    levels: bool,
    config: &Config,
) -> Result<ExitCode> {
    let map = input::load_dependency_map(file)
        .with_context(|| format!("Failed to load: {}", file.display()))?;
    let format = config.output.format;

    let text = if levels {
        match sort_levels(&map) {
            Ok(levels) => emit::render_levels(&levels, format)?,
            Err(err) => return Ok(report_cycle(err.cycle(), config)),
        }
    } else {
        match sort(&map) {
            Ok(order) => emit::render(&order, format)?,
            Err(err) => return Ok(report_cycle(err.cycle(), config)),
        }
    };

    header(&format!("{} nodes in dependency order", map.num_nodes()), config);
    write_out(&text);
    Ok(ExitCode::SUCCESS)
}

fn run_traverse(
    file: &Path,
    roots: &[String],
    config: &Config,
) -> Result<ExitCode> {
    let graph = input::load_reference_graph(file)
        .with_context(|| format!("Failed to load: {}", file.display()))?;

    let roots: Vec<String> = if roots.is_empty() {
        graph.keys().cloned().collect()
    } else {
        roots.to_vec()
    };
    for root in &roots {
        if !graph.contains_key(root) {
            warn!(%root, "root has no entry in the graph");
        }
    }

    let order: Order = config.traverse.order;
    let mut visited = VisitedSet::new();
    let nodes: Vec<String> =
        traverse::infallible(Traversal::forest(roots, &graph, order, &mut visited)).collect();
    info!(produced = nodes.len(), visited = visited.len(), "traversal finished");

    header(&format!("{} nodes in {}-order", nodes.len(), order), config);
    write_out(&emit::render(&nodes, config.output.format)?);
    Ok(ExitCode::SUCCESS)
}

fn run_cycle(
    file: &Path,
    config: &Config,
) -> Result<ExitCode> {
    let map = input::load_dependency_map(file)
        .with_context(|| format!("Failed to load: {}", file.display()))?;

    match find_cycle(&map) {
        Some(cycle) => Ok(report_cycle(&cycle, config)),
        None => {
            header("no dependency cycle", config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print a cycle as `A -> B -> A` on stderr.
fn report_cycle(
    cycle: &[String],
    config: &Config,
) -> ExitCode {
    let mut path: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        path.push(first);
    }

    let label = "error: dependency cycle detected";
    if config.output.color {
        eprintln!("{}", label.red().bold());
    } else {
        eprintln!("{}", label);
    }
    eprintln!("  {}", path.join(" -> "));
    ExitCode::FAILURE
}

/// Status line on stderr, so stdout carries only the rendered output.
fn header(
    text: &str,
    config: &Config,
) {
    if config.output.color {
        eprintln!("{}", text.green().bold());
    } else {
        eprintln!("{}", text);
    }
}

fn write_out(text: &str) {
    if text.is_empty() || text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
