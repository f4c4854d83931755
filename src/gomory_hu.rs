use crate::UnGraph;
use crate::Weight;
use crate::min_cut::MinCut;
use crate::util::{JsonLogger, Timer};
use petgraph::graph::NodeIndex;

// The Gomory-Hu tree is encoded in the p (predecessor) and fl (min flow)
// arrays as follows: the tree edges are the final pairs (i, p[i]) for
// every non-root i, and edge (i, p[i]) has weight fl[i].

/// Builds the Gomory-Hu tree with Gusfield's algorithm, rooted at the
/// first node.
///
/// The graph should be connected and simple (see `mod preprocess`); on
/// disconnected input the tree comes back with 0-weight edges marking
/// the components.
///
/// The returned tree has the same node set as the input, node labels
/// copied over, and each edge weighted with the minimum cut value
/// between its endpoints. Exactly n-1 min-cut computations are run; the
/// graph itself is never mutated.
///
/// Phase timings are written to `logger` under `gh_time_min_cut`,
/// `gh_time_relabel` and `gh_time_total`.
pub fn gusfield(graph: &UnGraph, logger: &mut JsonLogger) -> UnGraph {
    let root = graph
        .node_indices()
        .next()
        .expect("graph should not be empty");
    gusfield_from(graph, root, logger)
}

/// Same as [`gusfield`], with an explicit root.
///
/// Any root yields a valid Gomory-Hu tree; the trees may differ but
/// their edge-weight multisets do not.
pub fn gusfield_from(graph: &UnGraph, root: NodeIndex, logger: &mut JsonLogger) -> UnGraph {
    let n = graph.node_count();
    let mut time_min_cut = 0.0;
    let mut time_relabel = 0.0;
    let mut t_total = Timer::new();

    let mut p: Vec<Option<NodeIndex>> = vec![Some(root); n];
    let mut fl: Vec<Weight> = vec![Weight::MAX; n];
    p[root.index()] = None;

    for s in graph.node_indices() {
        if s == root {
            continue;
        }
        let t = p[s.index()].expect("non-root nodes always have a predecessor");

        let mut t_min_cut = Timer::new();
        let mut min_cut = MinCut::new(graph, s, t);
        min_cut.run();
        time_min_cut += t_min_cut.tick();

        let flow = min_cut.flow_value();
        fl[s.index()] = flow;

        let mut t_relabel = Timer::new();

        // Children of t on the s side of the cut move under s.
        for i in graph.node_indices() {
            if i != s && min_cut.in_source_side(i) && p[i.index()] == Some(t) {
                p[i.index()] = Some(s);
            }
        }

        // If t's own predecessor fell on the s side, s takes t's place
        // under it and t hangs off s.
        if let Some(pt) = p[t.index()] {
            if min_cut.in_source_side(pt) {
                p[s.index()] = Some(pt);
                p[t.index()] = Some(s);
                fl[s.index()] = fl[t.index()];
                fl[t.index()] = flow;
            }
        }

        time_relabel += t_relabel.tick();
    }

    // The predecessor encoding is enough to represent the tree, but a
    // graph is easier for downstream consumers to traverse.
    let mut tree = UnGraph::new_undirected();
    for node in graph.node_indices() {
        tree.add_node(*graph.node_weight(node).expect("node weight should exist"));
    }
    for node in graph.node_indices() {
        if let Some(parent) = p[node.index()] {
            tree.add_edge(node, parent, fl[node.index()]);
        }
    }

    logger.add("gh_time_min_cut", time_min_cut);
    logger.add("gh_time_relabel", time_relabel);
    logger.add("gh_time_total", t_total.tick());

    tree
}

/// Minimum edge weight on the unique a-b path of a tree.
///
/// By the Gomory-Hu property this is the minimum a-b cut value of the
/// graph the tree was built from.
pub fn path_min_weight(tree: &UnGraph, a: NodeIndex, b: NodeIndex) -> Weight {
    use petgraph::visit::EdgeRef;

    assert!(a != b, "path endpoints should be distinct");

    // DFS from a, tracking the minimum weight seen along each path.
    let mut min_on_path = vec![None; tree.node_count()];
    let mut stack = vec![a];
    min_on_path[a.index()] = Some(Weight::MAX);
    while let Some(node) = stack.pop() {
        let here = min_on_path[node.index()].expect("stacked nodes are labeled");
        if node == b {
            return here;
        }
        for edge in tree.edges(node) {
            let next = edge.target();
            if min_on_path[next.index()].is_none() {
                min_on_path[next.index()] = Some(here.min(*edge.weight()));
                stack.push(next);
            }
        }
    }

    panic!("endpoints should be connected in the tree");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::random_graphs::random_connected_graph;

    fn tree_weights(tree: &UnGraph) -> Vec<Weight> {
        let mut weights: Vec<Weight> = tree.edge_weights().copied().collect();
        weights.sort();
        weights
    }

    /// Checks the Gomory-Hu property of `tree` against `graph` pair by
    /// pair with independent min-cut runs.
    fn assert_gomory_hu_property(graph: &UnGraph, tree: &UnGraph) {
        assert_eq!(tree.node_count(), graph.node_count());
        assert_eq!(tree.edge_count(), graph.node_count() - 1);
        for a in graph.node_indices() {
            for b in graph.node_indices() {
                if a >= b {
                    continue;
                }
                let mut min_cut = MinCut::new(graph, a, b);
                min_cut.run();
                assert_eq!(
                    path_min_weight(tree, a, b),
                    min_cut.flow_value(),
                    "pair ({}, {})",
                    a.index(),
                    b.index()
                );
            }
        }
    }

    fn triangle() -> UnGraph {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(1);
        let b = g.add_node(2);
        let c = g.add_node(3);
        g.add_edge(a, b, 1);
        g.add_edge(b, c, 2);
        g.add_edge(a, c, 3);
        g
    }

    #[test]
    fn test_triangle_tree() {
        // pairwise flows are f(1,2) = 3, f(2,3) = 3, f(1,3) = 4, so the
        // heaviest pair must appear as a tree edge
        let g = triangle();
        let tree = gusfield(&g, &mut JsonLogger::new());
        assert_eq!(tree_weights(&tree), vec![3, 4]);
        assert_gomory_hu_property(&g, &tree);
    }

    #[test]
    fn test_path_is_its_own_tree() {
        // Path 1-2-...-6 with edge (i, i+1) weighted i.
        let mut g = UnGraph::new_undirected();
        for id in 1..=6 {
            g.add_node(id);
        }
        for i in 0..5 {
            g.add_edge(NodeIndex::new(i), NodeIndex::new(i + 1), (i + 1) as Weight);
        }

        let tree = gusfield(&g, &mut JsonLogger::new());
        assert_eq!(tree_weights(&tree), vec![1, 2, 3, 4, 5]);
        assert_gomory_hu_property(&g, &tree);
    }

    #[test]
    fn test_star_is_its_own_tree() {
        let mut g = UnGraph::new_undirected();
        let center = g.add_node(1);
        for i in 0..4 {
            let leaf = g.add_node(i + 2);
            g.add_edge(center, leaf, (i + 3) as Weight);
        }

        let tree = gusfield(&g, &mut JsonLogger::new());
        assert_eq!(tree_weights(&tree), vec![3, 4, 5, 6]);
        assert_gomory_hu_property(&g, &tree);
    }

    #[test]
    fn test_two_cliques_with_bridge() {
        let mut g = UnGraph::new_undirected();
        for id in 1..=8 {
            g.add_node(id);
        }
        // two K4s on nodes 0..4 and 4..8
        for part in [0, 4] {
            for i in part..part + 4 {
                for j in i + 1..part + 4 {
                    g.add_edge(NodeIndex::new(i), NodeIndex::new(j), 5);
                }
            }
        }
        g.add_edge(NodeIndex::new(0), NodeIndex::new(4), 1);

        let tree = gusfield(&g, &mut JsonLogger::new());
        let weights = tree_weights(&tree);
        assert_eq!(weights.iter().filter(|&&w| w == 1).count(), 1);
        assert_gomory_hu_property(&g, &tree);
    }

    #[test]
    fn test_single_node_graph() {
        let mut g = UnGraph::new_undirected();
        g.add_node(1);
        let tree = gusfield(&g, &mut JsonLogger::new());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edge_count(), 0);
    }

    #[test]
    fn test_disconnected_input_marks_components() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(1);
        let b = g.add_node(2);
        let c = g.add_node(3);
        let d = g.add_node(4);
        g.add_edge(a, b, 3);
        g.add_edge(c, d, 4);

        let tree = gusfield(&g, &mut JsonLogger::new());
        assert_eq!(tree.edge_count(), 3);
        assert_eq!(tree_weights(&tree).iter().filter(|&&w| w == 0).count(), 1);
    }

    #[test]
    fn test_random_graphs_satisfy_gomory_hu_property() {
        for seed in 0..10 {
            let g = random_connected_graph(9, 8, 12, seed);
            let tree = gusfield(&g, &mut JsonLogger::new());
            assert_gomory_hu_property(&g, &tree);
        }
    }

    #[test]
    fn test_root_independence() {
        for seed in 0..5 {
            let g = random_connected_graph(8, 6, 9, seed);
            let reference = tree_weights(&gusfield(&g, &mut JsonLogger::new()));
            for root in g.node_indices() {
                let tree = gusfield_from(&g, root, &mut JsonLogger::new());
                assert_gomory_hu_property(&g, &tree);
                assert_eq!(tree_weights(&tree), reference, "root {}", root.index());
            }
        }
    }

    #[test]
    fn test_timings_are_logged_once() {
        let mut logger = JsonLogger::new();
        let _ = gusfield(&triangle(), &mut logger);
        let mut buf = Vec::new();
        logger.write(&mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();
        for key in ["gh_time_min_cut", "gh_time_relabel", "gh_time_total"] {
            assert_eq!(line.matches(key).count(), 1);
        }
    }
}
