//! Highest-label preflow-push: the only solver that does not route flow
//! along whole paths, instead pushing local excess downhill and lifting
//! vertices ("relabelling") until every preflow becomes a flow.

use std::collections::{BTreeMap, VecDeque};
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::residual::{Algorithm, ResidualGraph};

/// Runs highest-label push-relabel to completion.
///
/// `global_relabel_freq` controls how often exact distance labels are
/// recomputed from scratch by a reverse BFS, expressed as a multiple of
/// `node_count` discharge operations between recomputations; `0`
/// disables global relabelling and relies solely on local relabels and
/// the gap heuristic.
pub fn run<N, C>(r: &mut ResidualGraph<N, C>, global_relabel_freq: u32)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    r.set_algorithm(Algorithm::PreflowPush);
    let n = r.node_count();
    let (s, t) = (r.source(), r.sink());
    let mut state = State::new(n, s, t);

    for &arc_idx in r.arcs_from(s).to_vec().iter() {
        let residual = r.arc(arc_idx).residual();
        if residual > C::zero() {
            r.push_flow(arc_idx, residual);
            let to = r.arc(arc_idx).to;
            state.excess[to] = state.excess[to] + residual;
            if to != s && to != t {
                state.activate(to);
            }
        }
    }
    global_relabel(r, &mut state);

    let relabel_threshold = if global_relabel_freq == 0 {
        None
    } else {
        Some((global_relabel_freq as usize).saturating_mul(n).max(1))
    };
    let mut discharges_since_relabel = 0usize;

    while let Some(u) = state.pop_highest() {
        if state.excess[u] <= C::zero() {
            continue;
        }
        discharge(r, &mut state, u);
        discharges_since_relabel += 1;
        if relabel_threshold.is_some_and(|threshold| discharges_since_relabel >= threshold) {
            global_relabel(r, &mut state);
            discharges_since_relabel = 0;
        }
    }

    r.set_flow_value(state.excess[t]);
}

struct State<C> {
    height: Vec<usize>,
    excess: Vec<C>,
    current: Vec<usize>,
    buckets: BTreeMap<usize, Vec<usize>>,
    count_at_height: BTreeMap<usize, usize>,
    source: usize,
    sink: usize,
}

impl<C: Capacity> State<C> {
    fn new(n: usize, source: usize, sink: usize) -> Self {
        let mut height = vec![0usize; n];
        height[source] = n;
        let mut count_at_height = BTreeMap::new();
        for (v, &h) in height.iter().enumerate() {
            if v != source {
                *count_at_height.entry(h).or_insert(0) += 1;
            }
        }
        Self {
            height,
            excess: vec![C::zero(); n],
            current: vec![0usize; n],
            buckets: BTreeMap::new(),
            count_at_height,
            source,
            sink,
        }
    }

    fn activate(&mut self, v: usize) {
        if v == self.source || v == self.sink {
            return;
        }
        self.buckets.entry(self.height[v]).or_default().push(v);
    }

    fn pop_highest(&mut self) -> Option<usize> {
        loop {
            let &top = self.buckets.keys().next_back()?;
            let bucket = self.buckets.get_mut(&top).expect("key from keys() exists");
            match bucket.pop() {
                Some(v) => {
                    if bucket.is_empty() {
                        self.buckets.remove(&top);
                    }
                    if self.height[v] == top {
                        return Some(v);
                    }
                    // stale entry from a relabel that happened after it was queued
                }
                None => {
                    self.buckets.remove(&top);
                }
            }
        }
    }

    fn set_height(&mut self, v: usize, new_height: usize) {
        let old_height = self.height[v];
        if let Some(count) = self.count_at_height.get_mut(&old_height) {
            *count -= 1;
            if *count == 0 {
                self.count_at_height.remove(&old_height);
            }
        }
        self.height[v] = new_height;
        *self.count_at_height.entry(new_height).or_insert(0) += 1;
        self.current[v] = 0;
    }

    /// The gap heuristic: once a height level between the source and the
    /// sink empties out, every vertex above it can no longer reach the
    /// sink at all and is lifted clear of the active range in one shot.
    fn close_gap(&mut self, emptied_height: usize, n: usize) {
        if emptied_height == 0 || emptied_height >= n {
            return;
        }
        if self.count_at_height.contains_key(&emptied_height) {
            return;
        }
        let stranded: Vec<usize> = self
            .height
            .iter()
            .enumerate()
            .filter(|&(v, &h)| v != self.source && h > emptied_height && h < n)
            .map(|(v, _)| v)
            .collect();
        for v in stranded {
            self.set_height(v, n + 1);
            if self.excess[v] > C::zero() {
                self.activate(v);
            }
        }
    }
}

fn discharge<N, C>(r: &mut ResidualGraph<N, C>, state: &mut State<C>, u: usize)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = state.height.len();
    while state.excess[u] > C::zero() {
        let neighbors = r.arcs_from(u);
        if state.current[u] >= neighbors.len() {
            let old_height = state.height[u];
            let min_height = neighbors
                .iter()
                .filter_map(|&a| (r.arc(a).residual() > C::zero()).then_some(state.height[r.arc(a).to]))
                .min();
            let new_height = min_height.map_or(n + 1, |h| h + 1);
            state.set_height(u, new_height);
            state.close_gap(old_height, n);
            if state.excess[u] > C::zero() {
                state.activate(u);
            }
            return;
        }
        let arc_idx = neighbors[state.current[u]];
        let arc = r.arc(arc_idx);
        let residual = arc.residual();
        if residual > C::zero() && state.height[u] == state.height[arc.to] + 1 {
            let amount = if residual < state.excess[u] {
                residual
            } else {
                state.excess[u]
            };
            let to = arc.to;
            r.push_flow(arc_idx, amount);
            state.excess[u] = state.excess[u] - amount;
            state.excess[to] = state.excess[to] + amount;
            if to != state.source && to != state.sink {
                state.activate(to);
            }
        } else {
            state.current[u] += 1;
        }
    }
}

/// Recomputes exact distance labels by a reverse BFS from the sink over
/// arcs with positive residual capacity. Vertices the sink cannot see
/// stay (or become) cut off at `n`, matching the gap heuristic's
/// sentinel.
fn global_relabel<N, C>(r: &ResidualGraph<N, C>, state: &mut State<C>)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = state.height.len();
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
    dist[state.sink] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(state.sink);
    while let Some(v) = queue.pop_front() {
        for &u in &incoming[v] {
            if dist[u] == n && u != state.source {
                dist[u] = dist[v] + 1;
                queue.push_back(u);
            }
        }
    }
    state.buckets.clear();
    state.count_at_height.clear();
    for v in 0..n {
        if v == state.source {
            continue;
        }
        state.height[v] = dist[v];
        state.current[v] = 0;
        *state.count_at_height.entry(dist[v]).or_insert(0) += 1;
        if state.excess[v] > C::zero() {
            state.activate(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn saturates_single_edge() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 7);
        let mut r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        run(&mut r, 1);
        assert_eq!(r.flow_value(), 7);
        assert!(r.check_invariants());
    }

    #[test]
    fn matches_other_solvers_on_branching_graph() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 3);
        g.add_edge("a", "t", 3);
        g.add_edge("s", "b", 2);
        g.add_edge("b", "t", 2);
        let mut r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        run(&mut r, 1);
        assert_eq!(r.flow_value(), 5);
    }

    #[test]
    fn works_with_global_relabel_disabled() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 3);
        g.add_edge("a", "t", 3);
        g.add_edge("s", "b", 2);
        g.add_edge("b", "t", 2);
        let mut r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        run(&mut r, 0);
        assert_eq!(r.flow_value(), 5);
    }
}
