//! Command-line driver: reads a DIMACS graph, preprocesses it, builds
//! the Gomory-Hu tree and reports the minimum cut, the tree in DOT form
//! and the phase timings as one JSON line.

use anyhow::Context;
use anyhow::bail;
use clap::Parser;
use k_min_cut::gomory_hu::gusfield;
use k_min_cut::k_cut::{min_k_cut_coloring, min_k_cut_value};
use k_min_cut::{input, output, preprocess};
use k_min_cut::util::JsonLogger;
use std::io::Write;

// The CLI takes no k; the driver computes the classic minimum cut.
const K: usize = 2;

/// Minimum k-cut of a weighted graph via its Gomory-Hu tree.
#[derive(Parser, Debug)]
struct Args {
    /// Path to a DIMACS shortest-path graph file.
    graph: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = input::dimacs_from_file(&args.graph)
        .with_context(|| format!("failed to read '{}'", args.graph))?;
    log::info!(
        "parsed graph with {} nodes and {} edges",
        raw.node_count(),
        raw.edge_count()
    );

    let graph = preprocess::preprocess(&raw);
    if graph.node_count() < K {
        bail!("graph should have at least {} nodes", K);
    }
    log::info!(
        "preprocessed down to {} edges, connected and simple",
        graph.edge_count()
    );

    let mut logger = JsonLogger::new();
    let tree = gusfield(&graph, &mut logger);
    let value = min_k_cut_value(&tree, K, &mut logger);
    let colors = min_k_cut_coloring(&tree, K, &mut logger);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", output::to_dot_str(&tree))?;
    writeln!(out, "minimum {}-cut value: {}", K, value)?;
    for node in tree.node_indices() {
        let label = tree.node_weight(node).expect("node weight should exist");
        writeln!(out, "node {}: component {}", label, colors[node.index()])?;
    }
    logger.write(&mut out)?;

    Ok(())
}
