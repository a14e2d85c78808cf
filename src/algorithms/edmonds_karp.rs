//! Breadth-first augmenting paths: every augmentation uses a shortest
//! (fewest-arcs) path in the current residual graph.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::residual::{Algorithm, ResidualGraph};

/// Repeatedly finds a shortest augmenting path by BFS and saturates it,
/// stopping when none remains or, if `cutoff` is given, once the flow
/// value reaches it.
pub fn run<N, C>(r: &mut ResidualGraph<N, C>, cutoff: Option<C>)
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    r.set_algorithm(Algorithm::EdmondsKarp);
    loop {
        if let Some(c) = cutoff {
            if r.flow_value() >= c {
                break;
            }
        }
        let Some((path, bottleneck)) = shortest_path(r) else {
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

fn shortest_path<N, C>(r: &ResidualGraph<N, C>) -> Option<(Vec<usize>, C)>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let n = r.node_count();
    let mut parent_arc: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let (s, t) = (r.source(), r.sink());
    visited[s] = true;
    let mut queue = VecDeque::new();
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        if u == t {
            break;
        }
        for &arc_idx in r.arcs_from(u) {
            let arc = r.arc(arc_idx);
            if arc.residual() > C::zero() && !visited[arc.to] {
                visited[arc.to] = true;
                parent_arc[arc.to] = Some(arc_idx);
                queue.push_back(arc.to);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn saturates_single_edge() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 7);
        let mut r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        run(&mut r, None);
        assert_eq!(r.flow_value(), 7);
        assert!(r.check_invariants());
    }

    #[test]
    fn routes_around_a_saturated_bottleneck() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 3);
        g.add_edge("a", "t", 3);
        g.add_edge("s", "b", 2);
        g.add_edge("b", "t", 2);
        let mut r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        run(&mut r, None);
        assert_eq!(r.flow_value(), 5);
    }

    #[test]
    fn cutoff_stops_early() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 10);
        let mut r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        run(&mut r, Some(4));
        assert_eq!(r.flow_value(), 4);
    }
}
