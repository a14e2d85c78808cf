//! The four augmenting-path and preflow-push solvers, each operating in
//! place on a [`crate::residual::ResidualGraph`] built by the caller.

#[cfg(feature = "edmonds_karp")]
pub mod edmonds_karp;
#[cfg(feature = "ford_fulkerson")]
pub mod ford_fulkerson;
#[cfg(feature = "preflow_push")]
pub mod preflow_push;
#[cfg(feature = "shortest_augmenting_path")]
pub mod shortest_augmenting_path;
