//! Depth-first augmenting paths, kept for backward compatibility with
//! callers that still request it by name.
//!
//! Unlike the other three solvers, this one eagerly reconstructs the
//! flow dictionary and caches it on the [`ResidualGraph`] before
//! returning, rather than leaving that to the dispatcher.

use std::hash::Hash;

use crate::capacity::Capacity;
use crate::flow_dict::build_flow_dict;
use crate::residual::{Algorithm, ResidualGraph};

/// Repeatedly finds an augmenting path by DFS and saturates it.
pub fn run<N, C>(r: &mut ResidualGraph<N, C>, cutoff: Option<C>)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    r.set_algorithm(Algorithm::FordFulkersonLegacy);
    loop {
        if let Some(c) = cutoff {
            if r.flow_value() >= c {
                break;
            }
        }
        let Some((path, bottleneck)) = depth_first_path(r) else {
            break;
        };
        let delta = cutoff.map_or(bottleneck, |c| {
            let remaining = c - r.flow_value();
            if remaining < bottleneck {
                remaining
            } else {
                bottleneck
            }
        });
        r.augment_path(&path, delta);
    }
    let dict = build_flow_dict(r);
    r.set_flow_dict(dict);
}

fn depth_first_path<N, C>(r: &ResidualGraph<N, C>) -> Option<(Vec<usize>, C)>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = r.node_count();
    let (s, t) = (r.source(), r.sink());
    let mut visited = vec![false; n];
    let mut parent_arc: Vec<Option<usize>> = vec![None; n];
    let mut stack = vec![s];
    visited[s] = true;
    while let Some(u) = stack.pop() {
        if u == t {
            break;
        }
        for &arc_idx in r.arcs_from(u) {
            let arc = r.arc(arc_idx);
            if arc.residual() > C::zero() && !visited[arc.to] {
                visited[arc.to] = true;
                parent_arc[arc.to] = Some(arc_idx);
                stack.push(arc.to);
            }
        }
    }
    if !visited[t] {
        return None;
    }
    let mut path = Vec::new();
    let mut bottleneck = r.inf();
    let mut v = t;
    while v != s {
        let arc_idx = parent_arc[v].expect("visited non-source vertex has a parent arc");
        let arc = r.arc(arc_idx);
        if arc.residual() < bottleneck {
            bottleneck = arc.residual();
        }
        path.push(arc_idx);
        v = arc.from;
    }
    path.reverse();
    Some((path, bottleneck))
}
