use crate::UnGraph;
use crate::Weight;
use petgraph::visit::EdgeRef;

/// Total weight of the edges whose endpoints carry different colors.
pub fn crossing_weight(graph: &UnGraph, colors: &[u32]) -> Weight {
    graph
        .edge_references()
        .filter(|e| colors[e.source().index()] != colors[e.target().index()])
        .map(|e| *e.weight())
        .sum()
}

/// Minimum total weight of edges crossing any partition of the vertices
/// into exactly `k` non-empty parts, found by exhaustive enumeration.
///
/// Every assignment of nodes to `k` parts is tried, so this is only for
/// small graphs (roughly n <= 10).
pub fn min_k_cut_by_enumeration(graph: &UnGraph, k: usize) -> Weight {
    let n = graph.node_count();
    assert!(k >= 2, "k should be at least 2");
    assert!(k <= n, "k should not exceed the number of nodes");

    let mut colors = vec![0u32; n];
    let mut best = Weight::MAX;
    loop {
        if all_parts_used(&colors, k) {
            best = best.min(crossing_weight(graph, &colors));
        }
        // advance the base-k counter
        let mut digit = 0;
        loop {
            if digit == n {
                return best;
            }
            colors[digit] += 1;
            if colors[digit] < k as u32 {
                break;
            }
            colors[digit] = 0;
            digit += 1;
        }
    }
}

fn all_parts_used(colors: &[u32], k: usize) -> bool {
    let mut used = vec![false; k];
    for &c in colors {
        used[c as usize] = true;
    }
    used.iter().all(|&u| u)
}
