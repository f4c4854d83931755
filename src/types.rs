/// Edge capacity type.
///
/// Capacities are positive integers; `i64` leaves room for the flow sums
/// the min-cut engine accumulates on large instances.
pub type Weight = i64;

/// Wrapper for petgraph's graph type.
///
/// Node weights are the labels given in the input file (1-based ids),
/// edge weights are capacities. The Gomory-Hu tree is an `UnGraph` too,
/// with min-cut values on its edges.
pub type UnGraph = petgraph::graph::UnGraph<u32, Weight>;
