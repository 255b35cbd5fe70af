use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use graph_traversal_core::{load_graphs, Graph, LoadedGraph, TraversalKind};
use tracing_subscriber::EnvFilter;

/// Traverse graphs described as adjacency lists
#[derive(Parser)]
#[command(name = "traverse")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Walk adjacency-list graphs depth-first and breadth-first", long_about = None)]
struct Cli {
    /// YAML or JSON file containing one or more adjacency lists
    #[arg(short, long, value_name = "FILE")]
    graph: PathBuf,

    /// Start node for documents that do not declare a root
    #[arg(short, long, value_name = "NODE")]
    start: Option<String>,

    /// Which traversals to run
    #[arg(long, value_enum, default_value_t = Order::Both)]
    order: Order,

    /// Do not print each loaded graph before traversing it
    #[arg(long)]
    quiet_graph: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Order {
    Dfs,
    Bfs,
    Both,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing subscriber with environment filter, logging to stderr
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load every document and traverse it; `Ok(false)` if any document failed
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let graphs = load_graphs(&cli.graph)
        .with_context(|| format!("loading graphs from {}", cli.graph.display()))?;

    let mut all_ok = true;
    for (n, loaded) in graphs.iter().enumerate() {
        if let Err(err) = traverse_document(cli, loaded) {
            tracing::warn!(document = n, "traversal failed");
            eprintln!("Error in document {n}: {err:#}");
            all_ok = false;
        }
    }
    Ok(all_ok)
}

fn traverse_document(cli: &Cli, loaded: &LoadedGraph) -> anyhow::Result<()> {
    if !cli.quiet_graph {
        println!("Loaded graph:\n{}", loaded.graph);
    }
    let start = loaded
        .start_node(cli.start.as_deref())
        .context("document has no root; pass --start to choose a start node")?;

    if cli.order != Order::Bfs {
        run_dfs(&loaded.graph, start)?;
    }
    if cli.order == Order::Both {
        println!("\n-------");
    }
    if cli.order != Order::Dfs {
        run_bfs(&loaded.graph, start)?;
    }
    Ok(())
}

fn run_dfs(graph: &Graph, start: &str) -> anyhow::Result<()> {
    println!("Traversing graph using {}:", TraversalKind::DepthFirst);
    let report = graph.dfs(start, |node| println!("{node}"))?;
    let has = if report.has_cycles() {
        "has"
    } else {
        "does not have"
    };
    println!("The graph {has} cycles");
    Ok(())
}

fn run_bfs(graph: &Graph, start: &str) -> anyhow::Result<()> {
    println!("Traversing graph using {}:", TraversalKind::BreadthFirst);
    graph.bfs(start, |node| println!("{node}"))?;
    Ok(())
}
