use crate::UnGraph;
use crate::Weight;
use crate::util::{JsonLogger, Timer};
use hashbrown::HashSet;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use std::collections::BinaryHeap;

/// Value of the minimum k-cut read off a Gomory-Hu tree: the sum of the
/// k-1 smallest tree-edge weights.
///
/// For k = 2 this is the minimum cut value of the underlying graph. For
/// larger k it is the cheapest cut obtainable by deleting tree edges,
/// which can exceed the overall minimum k-cut (a graph edge may cross
/// two deleted tree cuts and then counts twice in the sum).
///
/// The sweep keeps a bounded max-heap of size k-1, so ties among equal
/// weights are broken arbitrarily but the sum is well-defined.
///
/// The elapsed time is written to `logger` under `min_k_cut_value_time`.
///
/// # Panics
///
/// If `k < 2` or `k` exceeds the number of tree nodes.
pub fn min_k_cut_value(tree: &UnGraph, k: usize, logger: &mut JsonLogger) -> Weight {
    let mut timer = Timer::new();

    let n_cuts = check_k(tree, k);
    let mut heap = BinaryHeap::with_capacity(n_cuts + 1);
    for edge in tree.edge_references() {
        heap.push(*edge.weight());
        if heap.len() > n_cuts {
            heap.pop();
        }
    }
    let sum = heap.iter().copied().sum();

    logger.add("min_k_cut_value_time", timer.tick());

    sum
}

/// Coloring that realizes the minimum k-cut: deleting k-1 tree edges of
/// minimum total weight leaves k components, and every vertex is
/// labeled with its component's color in `1..=k`.
///
/// The returned vector is indexed by node index. Which of several
/// equal-weight edge sets is chosen, and which component gets which
/// color, are implementation details (ties go to lower edge ids, colors
/// follow node-index order).
///
/// Sub-phase timings are written to `logger` under
/// `min_k_cut_map_time_find_min_flows`, `min_k_cut_map_time_dfs` and
/// `min_k_cut_map_time_total`.
///
/// # Panics
///
/// If `k < 2` or `k` exceeds the number of tree nodes.
pub fn min_k_cut_coloring(tree: &UnGraph, k: usize, logger: &mut JsonLogger) -> Vec<u32> {
    let mut t_total = Timer::new();

    let n_cuts = check_k(tree, k);

    // The k-1 lightest tree edges, same bounded heap as the value sweep.
    let mut t_find_min_flows = Timer::new();
    let mut heap: BinaryHeap<(Weight, EdgeIndex)> = BinaryHeap::with_capacity(n_cuts + 1);
    for edge in tree.edge_references() {
        heap.push((*edge.weight(), edge.id()));
        if heap.len() > n_cuts {
            heap.pop();
        }
    }
    let deleted: HashSet<EdgeIndex> = heap.into_iter().map(|(_, edge)| edge).collect();
    logger.add("min_k_cut_map_time_find_min_flows", t_find_min_flows.tick());

    // Color the components of the tree minus the deleted edges; 0 marks
    // an unvisited node.
    let mut t_dfs = Timer::new();
    let mut colors = vec![0u32; tree.node_count()];
    let mut color = 0;
    for node in tree.node_indices() {
        if colors[node.index()] != 0 {
            continue;
        }
        color += 1;
        let mut stack = vec![node];
        colors[node.index()] = color;
        while let Some(current) = stack.pop() {
            for edge in tree.edges(current) {
                if deleted.contains(&edge.id()) {
                    continue;
                }
                let next = edge.target();
                if colors[next.index()] == 0 {
                    colors[next.index()] = color;
                    stack.push(next);
                }
            }
        }
    }
    logger.add("min_k_cut_map_time_dfs", t_dfs.tick());

    logger.add("min_k_cut_map_time_total", t_total.tick());

    colors
}

fn check_k(tree: &UnGraph, k: usize) -> usize {
    assert!(k >= 2, "k should be at least 2");
    assert!(
        k <= tree.node_count(),
        "k should not exceed the number of nodes"
    );
    k - 1
}
