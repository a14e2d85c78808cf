#![deny(missing_docs)]

//! Maximum-flow and minimum-cut algorithms for capacitated graphs.
//!
//! Four interchangeable solvers compute the same answer on the same
//! residual graph: `edmonds_karp`, `ford_fulkerson` (legacy, eager flow
//! dict), `shortest_augmenting_path`, and `preflow_push` (the default).
//! Pick one with [`FlowOptions::flow_func`] and call [`maximum_flow`],
//! [`maximum_flow_value`], [`minimum_cut`], or [`minimum_cut_value`].
//!
//! This crate does not ship a graph data structure of its own — bring
//! any type implementing [`CapacityGraph`], or use [`SimpleGraph`] for
//! quick experiments.
//!
//! ```
//! use maxflow_graph::{maximum_flow, FlowOptions, SimpleGraph};
//!
//! let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
//! g.add_edge("s", "a", 3);
//! g.add_edge("a", "t", 3);
//!
//! let solution = maximum_flow(&g, &"s", &"t", &FlowOptions::new()).unwrap();
//! assert_eq!(solution.value, 3);
//! ```
//!
//! Cargo features gate the individual solvers (all enabled by default):
//!
//! - `edmonds_karp`
//! - `ford_fulkerson`
//! - `shortest_augmenting_path`
//! - `preflow_push`

pub mod algorithms;
mod capacity;
mod cut;
mod dispatch;
mod error;
mod flow_dict;
mod graph;
mod residual;

pub use capacity::Capacity;
pub use cut::Cut;
pub use dispatch::{
    maximum_flow, maximum_flow_value, minimum_cut, minimum_cut_value, FlowFunc, FlowOptions,
    FlowSolution, MinCutSolution,
};
pub use error::{FlowError, FlowResult};
pub use graph::{CapacityGraph, SimpleGraph};
pub use residual::{Algorithm, Arc, ResidualGraph};
