use crate::UnGraph;
use crate::Weight;
use crate::min_cut::MinCut;
use crate::util::{JsonLogger, Timer};
use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

/// A tree of still-unresolved vertex subsets. Each node holds the
/// original vertices it stands for; edges carry min-cut values.
type SupernodeTree = petgraph::graph::UnGraph<Vec<NodeIndex>, Weight>;

/// Builds the Gomory-Hu tree by the classical contraction algorithm.
///
/// A single supernode holding all of V is refined until every supernode
/// is a singleton: pop a supernode X of size >= 2, contract each
/// connected component of the tree minus X to one vertex, run a min
/// s-t cut between the first two members of X (storage order, which is
/// insertion order, so runs are reproducible), split X along the cut
/// and reattach X's neighbors by the side their component's
/// representative landed on.
///
/// The result satisfies the same Gomory-Hu property as
/// [`gusfield`](crate::gomory_hu::gusfield) and has the same edge-weight
/// multiset, though not necessarily the same tree.
///
/// Phase timings are written to `logger` under `gh_time_min_cut`,
/// `gh_time_contraction` and `gh_time_total`.
pub fn classical(graph: &UnGraph, logger: &mut JsonLogger) -> UnGraph {
    graph
        .node_indices()
        .next()
        .expect("graph should not be empty");

    let mut time_min_cut = 0.0;
    let mut time_contraction = 0.0;
    let mut t_total = Timer::new();

    let mut supernodes = SupernodeTree::new_undirected();
    let root = supernodes.add_node(graph.node_indices().collect());
    let mut worklist = VecDeque::new();
    if graph.node_count() > 1 {
        worklist.push_back(root);
    }

    while let Some(x) = worklist.pop_front() {
        let members = supernodes[x].clone();
        let (s, t) = (members[0], members[1]);

        let mut t_contraction = Timer::new();

        // Members of X keep their own vertex in the contracted graph.
        let mut contracted = UnGraph::new_undirected();
        let mut vertex_map = vec![NodeIndex::end(); graph.node_count()];
        for &v in &members {
            vertex_map[v.index()] =
                contracted.add_node(*graph.node_weight(v).expect("node weight should exist"));
        }

        // Each connected component of the supernode tree minus X
        // collapses onto a single representative vertex.
        let mut rep_of = HashMap::new();
        let mut seen = FixedBitSet::with_capacity(supernodes.node_count());
        seen.insert(x.index());
        for start in supernodes.neighbors(x) {
            if seen.contains(start.index()) {
                continue;
            }
            let rep = contracted.add_node(0);
            let mut stack = vec![start];
            seen.insert(start.index());
            while let Some(y) = stack.pop() {
                rep_of.insert(y, rep);
                for &v in &supernodes[y] {
                    vertex_map[v.index()] = rep;
                }
                for z in supernodes.neighbors(y) {
                    if !seen.contains(z.index()) {
                        seen.insert(z.index());
                        stack.push(z);
                    }
                }
            }
        }

        // Self-loops vanish; parallel edges stay, the engine sums them.
        for edge in graph.edge_references() {
            let a = vertex_map[edge.source().index()];
            let b = vertex_map[edge.target().index()];
            if a != b {
                contracted.add_edge(a, b, *edge.weight());
            }
        }

        time_contraction += t_contraction.tick();

        let mut t_min_cut = Timer::new();
        let mut min_cut = MinCut::new(&contracted, vertex_map[s.index()], vertex_map[t.index()]);
        min_cut.run();
        time_min_cut += t_min_cut.tick();
        let lambda = min_cut.flow_value();

        let mut t_split = Timer::new();

        let neighbors: Vec<(NodeIndex, Weight)> = supernodes
            .edges(x)
            .map(|edge| (edge.target(), *edge.weight()))
            .collect();

        // X becomes X1 in place, so supernode indices stay stable.
        let (x1_members, x2_members): (Vec<NodeIndex>, Vec<NodeIndex>) = members
            .iter()
            .copied()
            .partition(|&v| min_cut.in_source_side(vertex_map[v.index()]));
        supernodes[x] = x1_members;
        let x2 = supernodes.add_node(x2_members);
        supernodes.add_edge(x, x2, lambda);

        for (y, weight) in neighbors {
            if !min_cut.in_source_side(rep_of[&y]) {
                let edge = supernodes
                    .find_edge(x, y)
                    .expect("neighbor edge should exist");
                supernodes.remove_edge(edge);
                supernodes.add_edge(x2, y, weight);
            }
        }

        if supernodes[x].len() > 1 {
            worklist.push_back(x);
        }
        if supernodes[x2].len() > 1 {
            worklist.push_back(x2);
        }

        time_contraction += t_split.tick();
    }

    // Every supernode is a singleton now; read the tree off.
    let mut tree = UnGraph::new_undirected();
    for node in graph.node_indices() {
        tree.add_node(*graph.node_weight(node).expect("node weight should exist"));
    }
    for edge in supernodes.edge_references() {
        let u = supernodes[edge.source()][0];
        let v = supernodes[edge.target()][0];
        tree.add_edge(u, v, *edge.weight());
    }

    logger.add("gh_time_min_cut", time_min_cut);
    logger.add("gh_time_contraction", time_contraction);
    logger.add("gh_time_total", t_total.tick());

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gomory_hu::{gusfield, path_min_weight};
    use crate::testing::random_graphs::random_connected_graph;

    fn tree_weights(tree: &UnGraph) -> Vec<Weight> {
        let mut weights: Vec<Weight> = tree.edge_weights().copied().collect();
        weights.sort();
        weights
    }

    #[test]
    fn test_triangle_tree() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(1);
        let b = g.add_node(2);
        let c = g.add_node(3);
        g.add_edge(a, b, 1);
        g.add_edge(b, c, 2);
        g.add_edge(a, c, 3);

        let tree = classical(&g, &mut JsonLogger::new());
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree_weights(&tree), vec![3, 4]);
    }

    #[test]
    fn test_two_nodes() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(1);
        let b = g.add_node(2);
        g.add_edge(a, b, 4);

        let tree = classical(&g, &mut JsonLogger::new());
        assert_eq!(tree.edge_count(), 1);
        assert_eq!(tree_weights(&tree), vec![4]);
    }

    #[test]
    fn test_single_node_graph() {
        let mut g = UnGraph::new_undirected();
        g.add_node(1);
        let tree = classical(&g, &mut JsonLogger::new());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edge_count(), 0);
    }

    #[test]
    fn test_random_graphs_satisfy_gomory_hu_property() {
        for seed in 0..10 {
            let g = random_connected_graph(9, 8, 12, seed);
            let tree = classical(&g, &mut JsonLogger::new());
            assert_eq!(tree.edge_count(), g.node_count() - 1);
            for a in g.node_indices() {
                for b in g.node_indices() {
                    if a >= b {
                        continue;
                    }
                    let mut min_cut = MinCut::new(&g, a, b);
                    min_cut.run();
                    assert_eq!(path_min_weight(&tree, a, b), min_cut.flow_value());
                }
            }
        }
    }

    #[test]
    fn test_agrees_with_gusfield_on_weight_multisets() {
        for seed in 0..20 {
            let g = random_connected_graph(10, 10, 15, seed);
            let by_contraction = classical(&g, &mut JsonLogger::new());
            let by_gusfield = gusfield(&g, &mut JsonLogger::new());
            assert_eq!(
                tree_weights(&by_contraction),
                tree_weights(&by_gusfield),
                "seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_timings_are_logged_once() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(1);
        let b = g.add_node(2);
        g.add_edge(a, b, 4);

        let mut logger = JsonLogger::new();
        let _ = classical(&g, &mut logger);
        let mut buf = Vec::new();
        logger.write(&mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();
        for key in ["gh_time_min_cut", "gh_time_contraction", "gh_time_total"] {
            assert_eq!(line.matches(key).count(), 1);
        }
    }
}
