//! Extracts the `(S, T)` minimum-cut partition from a solved residual
//! graph by a single reachability pass.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::residual::ResidualGraph;

/// The two sides of a minimum cut: `reachable` contains `s` and every
/// vertex still reachable from it along positive-residual arcs;
/// `unreachable` is everything else, including `t`.
#[derive(Debug, Clone)]
pub struct Cut<N> {
    /// Vertices reachable from the source in the residual graph.
    pub reachable: HashSet<N>,
    /// Vertices not reachable from the source in the residual graph.
    pub unreachable: HashSet<N>,
}

impl<N: Eq + Hash> PartialEq for Cut<N> {
    fn eq(&self, other: &Self) -> bool {
        self.reachable == other.reachable && self.unreachable == other.unreachable
    }
}

impl<N: Eq + Hash> Eq for Cut<N> {}

/// Runs a BFS over arcs with positive residual capacity starting at the
/// source, then partitions the vertex set by reachability. A correctly
/// saturated residual graph has no reachable path to the sink, so `t`
/// always lands in `unreachable`.
pub fn extract_cut<N, C>(r: &ResidualGraph<N, C>) -> Cut<N>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let mut seen = vec![false; r.node_count()];
    let mut queue = VecDeque::new();
    seen[r.source()] = true;
    queue.push_back(r.source());
    while let Some(u) = queue.pop_front() {
        for &arc_idx in r.arcs_from(u) {
            let arc = r.arc(arc_idx);
            if arc.residual() > C::zero() && !seen[arc.to] {
                seen[arc.to] = true;
                queue.push_back(arc.to);
            }
        }
    }

    let mut reachable = HashSet::new();
    let mut unreachable = HashSet::new();
    for idx in 0..r.node_count() {
        let node = r.node_at(idx).clone();
        if seen[idx] {
            reachable.insert(node);
        } else {
            unreachable.insert(node);
        }
    }
    Cut {
        reachable,
        unreachable,
    }
}

/// Sums the capacities of every arc crossing from `reachable` to
/// `unreachable`, which equals the maximum flow value for a correctly
/// saturated residual graph.
pub fn cut_value<N, C>(r: &ResidualGraph<N, C>, cut: &Cut<N>) -> C
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let mut total = C::zero();
    for idx in 0..r.node_count() {
        if !cut.reachable.contains(r.node_at(idx)) {
            continue;
        }
        for &arc_idx in r.arcs_from(idx) {
            let arc = r.arc(arc_idx);
            if cut.unreachable.contains(r.node_at(arc.to)) {
                total = total + arc.capacity;
            }
        }
    }
    total
}
