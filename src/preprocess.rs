use crate::UnGraph;
use crate::Weight;
use fixedbitset::FixedBitSet;
use hashbrown::HashSet;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// Weight of the edges added to stitch disconnected components together.
pub const SYNTHETIC_WEIGHT: Weight = 42;

/// Returns a copy of the graph without self-loops and parallel edges.
///
/// Node ids and labels are preserved. Of each parallel bundle the first
/// edge in iteration order survives; weights are not summed.
pub fn remove_parallel_edges(graph: &UnGraph) -> UnGraph {
    let mut out = UnGraph::new_undirected();
    for node in graph.node_indices() {
        out.add_node(*graph.node_weight(node).expect("node weight should exist"));
    }

    let mut seen = HashSet::new();
    for edge in graph.edge_references() {
        let a = edge.source().index();
        let b = edge.target().index();
        if a == b {
            continue;
        }
        if seen.insert((a.min(b), a.max(b))) {
            out.add_edge(edge.source(), edge.target(), *edge.weight());
        }
    }

    out
}

/// Connects the graph in place.
///
/// Every component unreachable from the first node gets one edge of
/// weight [`SYNTHETIC_WEIGHT`] from the first node to its
/// lowest-indexed vertex.
pub fn connect_components(graph: &mut UnGraph) {
    let Some(anchor) = graph.node_indices().next() else {
        return;
    };

    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    mark_component(graph, anchor, &mut visited);

    for node in graph.node_indices() {
        if !visited.contains(node.index()) {
            graph.add_edge(anchor, node, SYNTHETIC_WEIGHT);
            mark_component(graph, node, &mut visited);
        }
    }
}

/// Produces the simple connected graph the builders expect.
pub fn preprocess(graph: &UnGraph) -> UnGraph {
    let mut out = remove_parallel_edges(graph);
    connect_components(&mut out);
    out
}

fn mark_component(graph: &UnGraph, start: NodeIndex, visited: &mut FixedBitSet) {
    let mut stack = vec![start];
    visited.insert(start.index());
    while let Some(node) = stack.pop() {
        for next in graph.neighbors(node) {
            if !visited.contains(next.index()) {
                visited.insert(next.index());
                stack.push(next);
            }
        }
    }
}
