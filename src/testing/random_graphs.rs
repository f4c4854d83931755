use crate::UnGraph;
use crate::Weight;
use petgraph::visit::NodeIndexable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Builds a random connected graph with `n` nodes, a spanning skeleton
/// plus `extra_edges` additional edges, and weights in `1..=max_weight`.
///
/// The same seed always produces the same graph. Parallel edges may
/// occur among the extras; self-loops do not.
pub fn random_connected_graph(n: usize, extra_edges: usize, max_weight: Weight, seed: u64) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i as u32 + 1);
        if i > 0 {
            let j = rng.random_range(0..i);
            let w = rng.random_range(1..=max_weight);
            graph.add_edge(graph.from_index(i), graph.from_index(j), w);
        }
    }

    for _ in 0..extra_edges {
        let s = rng.random_range(0..n);
        let mut t = rng.random_range(0..n);
        while t == s {
            t = rng.random_range(0..n);
        }
        let w = rng.random_range(1..=max_weight);
        graph.add_edge(graph.from_index(s), graph.from_index(t), w);
    }

    graph
}
