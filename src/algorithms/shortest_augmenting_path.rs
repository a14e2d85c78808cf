//! Augmenting paths chosen by vertex distance labels (advance/retreat),
//! amortizing the search work a plain BFS repeats on every augmentation.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::residual::{Algorithm, ResidualGraph};

/// Runs shortest-augmenting-path to completion (or to `cutoff`).
///
/// When `two_phase` is set, a first pass only pursues paths at the
/// graph's initial source-to-sink distance — the shortest an admissible
/// path can possibly be — and stops as soon as relabelling pushes that
/// distance any further out, deferring the rest to a second,
/// unrestricted pass. This avoids the long detours distance labels can
/// produce right after a fresh relabelling wave.
pub fn run<N, C>(r: &mut ResidualGraph<N, C>, cutoff: Option<C>, two_phase: bool)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    r.set_algorithm(Algorithm::ShortestAugmentingPath);
    if two_phase {
        let initial_dist = distances_to_sink(r);
        let bound = initial_dist[r.source()];
        phase(r, cutoff, Some(bound));
    }
    phase(r, cutoff, None);
}

/// Runs advance/retreat to completion (or to `cutoff`).
///
/// `dist_bound`, when set, stops the phase as soon as the source's
/// distance label exceeds it, leaving whatever excess capacity remains
/// to a later, less restricted phase.
fn phase<N, C>(r: &mut ResidualGraph<N, C>, cutoff: Option<C>, dist_bound: Option<usize>)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = r.node_count();
    let mut dist = distances_to_sink(r);
    let mut current = vec![0usize; n];
    loop {
        if let Some(c) = cutoff {
            if r.flow_value() >= c {
                break;
            }
        }
        let Some((path, bottleneck)) = advance_retreat(r, &mut dist, &mut current, dist_bound) else {
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
}

/// Exact distance (in residual arcs) from every vertex to the sink,
/// computed by a single reverse BFS. Vertices that cannot reach the sink
/// get `node_count`, a sentinel no real distance can reach.
fn distances_to_sink<N, C>(r: &ResidualGraph<N, C>) -> Vec<usize>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = r.node_count();
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in 0..n {
        for &arc_idx in r.arcs_from(u) {
            let arc = r.arc(arc_idx);
            if arc.residual() > C::zero() {
                incoming[arc.to].push(u);
            }
        }
    }
    let mut dist = vec![n; n];
    let t = r.sink();
    dist[t] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(t);
    while let Some(v) = queue.pop_front() {
        for &u in &incoming[v] {
            if dist[u] == n {
                dist[u] = dist[v] + 1;
                queue.push_back(u);
            }
        }
    }
    dist
}

/// One full advance/retreat search for a single augmenting path, reusing
/// `dist` and `current` across calls within the same phase.
///
/// `dist_bound` is the optional extra ceiling a restricted first phase
/// imposes on the source's distance label, on top of the usual
/// no-path-exists bound of `node_count`.
fn advance_retreat<N, C>(
    r: &ResidualGraph<N, C>,
    dist: &mut [usize],
    current: &mut [usize],
    dist_bound: Option<usize>,
) -> Option<(Vec<usize>, C)>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = r.node_count();
    let (s, t) = (r.source(), r.sink());
    let mut path: Vec<usize> = Vec::new();
    let mut u = s;
    loop {
        if dist[s] >= n || dist_bound.is_some_and(|bound| dist[s] > bound) {
            return None;
        }
        if u == t {
            let bottleneck = path
                .iter()
                .map(|&a| r.arc(a).residual())
                .min()
                .unwrap_or_else(|| r.inf());
            return Some((path, bottleneck));
        }
        let neighbors = r.arcs_from(u);
        let mut advanced = None;
        while current[u] < neighbors.len() {
            let arc_idx = neighbors[current[u]];
            let arc = r.arc(arc_idx);
            if arc.residual() > C::zero() && dist[u] == dist[arc.to] + 1 {
                advanced = Some(arc_idx);
                break;
            }
            current[u] += 1;
        }
        if let Some(arc_idx) = advanced {
            path.push(arc_idx);
            u = r.arc(arc_idx).to;
            continue;
        }
        let min_reachable = neighbors
            .iter()
            .filter_map(|&a| {
                let arc = r.arc(a);
                (arc.residual() > C::zero()).then_some(dist[arc.to])
            })
            .min();
        dist[u] = min_reachable.map_or(n, |d| d + 1);
        current[u] = 0;
        if u == s {
            continue;
        }
        let last = path.pop().expect("retreating non-source vertex has an incoming path arc");
        u = r.arc(last).from;
        current[u] += 1;
    }
}
