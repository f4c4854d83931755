use crate::UnGraph;
use crate::Weight;
use fixedbitset::FixedBitSet;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

/// Maximum s-t flow / minimum s-t cut on an undirected weighted graph.
///
/// Dinic's algorithm: breadth-first level graphs, depth-first blocking
/// flows. Each undirected edge carries one signed flow value, so the
/// residual capacity is `w - f` in the stored direction and `w + f`
/// against it. Parallel edges and zero-weight edges are fine.
///
/// After [`run`](MinCut::run), [`flow_value`](MinCut::flow_value) is the
/// max-flow value and [`in_source_side`](MinCut::in_source_side) tells
/// which side of the minimum cut a node is on. On a graph where the
/// sink is unreachable the flow is 0 and the source side is the
/// reachable component.
///
/// Working state is O(|V| + |E|) and lives as long as the instance.
pub struct MinCut<'a> {
    graph: &'a UnGraph,
    source: NodeIndex,
    sink: NodeIndex,
    adjacent: Vec<Vec<EdgeIndex>>,
    // signed flow per edge, positive in the stored direction
    flows: Vec<Weight>,
    level: Vec<usize>,
    next_edge: Vec<usize>,
    source_side: FixedBitSet,
    flow_value: Weight,
}

impl<'a> MinCut<'a> {
    /// Prepares a computation between two distinct nodes.
    pub fn new(graph: &'a UnGraph, source: NodeIndex, sink: NodeIndex) -> Self {
        assert!(source != sink, "source and sink should be distinct");
        let n = graph.node_count();

        let mut adjacent = vec![Vec::new(); n];
        for edge in graph.edge_references() {
            adjacent[edge.source().index()].push(edge.id());
            if edge.source() != edge.target() {
                adjacent[edge.target().index()].push(edge.id());
            }
        }

        Self {
            graph,
            source,
            sink,
            adjacent,
            flows: vec![0; graph.edge_count()],
            level: vec![usize::MAX; n],
            next_edge: vec![0; n],
            source_side: FixedBitSet::with_capacity(n),
            flow_value: 0,
        }
    }

    /// Runs the computation to completion.
    pub fn run(&mut self) {
        while self.bfs_levels() {
            self.next_edge.fill(0);
            loop {
                let pushed = self.augment(self.source, Weight::MAX);
                if pushed == 0 {
                    break;
                }
                self.flow_value += pushed;
            }
        }

        // The last level search failed to reach the sink, so it marked
        // exactly the nodes reachable in the residual graph.
        self.source_side.clear();
        for node in self.graph.node_indices() {
            if self.level[node.index()] != usize::MAX {
                self.source_side.insert(node.index());
            }
        }
    }

    /// The maximum flow value, equal to the minimum cut capacity.
    pub fn flow_value(&self) -> Weight {
        self.flow_value
    }

    /// True iff the node is reachable from the source in the residual
    /// graph after termination, i.e. on the s side of the returned cut.
    pub fn in_source_side(&self, node: NodeIndex) -> bool {
        self.source_side.contains(node.index())
    }

    /// Labels nodes with their residual BFS distance from the source.
    /// Returns whether the sink was reached.
    fn bfs_levels(&mut self) -> bool {
        self.level.fill(usize::MAX);
        self.level[self.source.index()] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);

        while let Some(node) = queue.pop_front() {
            for i in 0..self.adjacent[node.index()].len() {
                let edge = self.adjacent[node.index()][i];
                let next = self.other_endpoint(edge, node);
                if self.level[next.index()] == usize::MAX && self.residual(edge, node) > 0 {
                    self.level[next.index()] = self.level[node.index()] + 1;
                    queue.push_back(next);
                }
            }
        }

        self.level[self.sink.index()] != usize::MAX
    }

    /// Pushes one augmenting path through the level graph, up to `limit`.
    fn augment(&mut self, node: NodeIndex, limit: Weight) -> Weight {
        if node == self.sink {
            return limit;
        }

        while self.next_edge[node.index()] < self.adjacent[node.index()].len() {
            let edge = self.adjacent[node.index()][self.next_edge[node.index()]];
            let next = self.other_endpoint(edge, node);
            let residual = self.residual(edge, node);
            if residual > 0 && self.level[next.index()] == self.level[node.index()] + 1 {
                let pushed = self.augment(next, limit.min(residual));
                if pushed > 0 {
                    self.push_flow(edge, node, pushed);
                    return pushed;
                }
            }
            self.next_edge[node.index()] += 1;
        }

        0
    }

    fn residual(&self, edge: EdgeIndex, from: NodeIndex) -> Weight {
        let (a, _) = self
            .graph
            .edge_endpoints(edge)
            .expect("edge endpoints should exist");
        let capacity = *self
            .graph
            .edge_weight(edge)
            .expect("edge weight should exist");
        if from == a {
            capacity - self.flows[edge.index()]
        } else {
            capacity + self.flows[edge.index()]
        }
    }

    fn push_flow(&mut self, edge: EdgeIndex, from: NodeIndex, amount: Weight) {
        let (a, _) = self
            .graph
            .edge_endpoints(edge)
            .expect("edge endpoints should exist");
        if from == a {
            self.flows[edge.index()] += amount;
        } else {
            self.flows[edge.index()] -= amount;
        }
    }

    fn other_endpoint(&self, edge: EdgeIndex, node: NodeIndex) -> NodeIndex {
        let (a, b) = self
            .graph
            .edge_endpoints(edge)
            .expect("edge endpoints should exist");
        if node == a { b } else { a }
    }
}
