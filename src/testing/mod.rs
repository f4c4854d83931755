//! Helpers for exercising the builders: seeded random graphs and an
//! exhaustive k-cut reference implementation for small inputs.

pub mod brute_force;
pub mod random_graphs;
