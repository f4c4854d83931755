#![warn(missing_docs)]

//! # k_min_cut
//!
//! A Rust library for computing minimum k-way cuts of undirected,
//! edge-weighted graphs through Gomory-Hu trees.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! The tree is built by either Gusfield's algorithm
//! ([`gomory_hu::gusfield`]) or the classical contraction algorithm
//! ([`supernodes::classical`]); both run n-1 max-flow computations
//! ([`min_cut::MinCut`]). The k-cut value and a realizing node coloring
//! are then read off the tree ([`k_cut`]).

pub mod gomory_hu;
pub mod input;
pub mod k_cut;
pub mod min_cut;
pub mod output;
pub mod preprocess;
pub mod supernodes;
pub mod testing;
pub mod types;
pub mod util;

pub use types::UnGraph;
pub use types::Weight;
