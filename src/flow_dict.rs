//! Reconstructs the `{u: {v: flow}}` dictionary shape from a solved
//! [`ResidualGraph`], shared by every solver so cross-solver output stays
//! bit-for-bit comparable.

use std::collections::HashMap;
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::residual::ResidualGraph;

/// Builds the flow dictionary for a solved residual graph.
///
/// For directed graphs, `dict[u][v]` is the sum of `max(0, flow)` over
/// every forward arc from `u` to `v` (there can be more than one when `G`
/// has both `(u, v)` and `(v, u)` as distinct edges). For undirected
/// graphs, the single arc pair backing an edge carries one signed flow
/// value, and both `dict[u][v]` and `dict[v][u]` report its magnitude —
/// undirected flow has no preferred direction.
///
/// Every vertex appears as a key, and every adjacency of the host graph
/// appears in the inner map (defaulting to zero), even where no flow was
/// pushed.
pub fn build_flow_dict<N, C>(r: &ResidualGraph<N, C>) -> HashMap<N, HashMap<N, C>>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    let mut dict: HashMap<N, HashMap<N, C>> =
        r.nodes().map(|n| (n.clone(), HashMap::new())).collect();

    for &(ui, vi) in r.logical_edges() {
        let u = r.node_at(ui).clone();
        let v = r.node_at(vi).clone();
        dict.entry(u).or_default().entry(v).or_insert(C::zero());
    }

    if r.is_directed() {
        for u in 0..r.node_count() {
            for &arc_idx in r.arcs_from(u) {
                let arc = r.arc(arc_idx);
                if arc.flow <= C::zero() {
                    continue;
                }
                let from = r.node_at(arc.from).clone();
                let to = r.node_at(arc.to).clone();
                let entry = dict.entry(from).or_default().entry(to).or_insert(C::zero());
                *entry = *entry + arc.flow;
            }
        }
    } else {
        let mut visited = vec![false; r.arc_count()];
        for u in 0..r.node_count() {
            for &arc_idx in r.arcs_from(u) {
                if visited[arc_idx] {
                    continue;
                }
                let arc = r.arc(arc_idx);
                let rev_idx = arc.reverse;
                visited[arc_idx] = true;
                visited[rev_idx] = true;
                let magnitude = if arc.flow >= C::zero() {
                    arc.flow
                } else {
                    C::zero() - arc.flow
                };
                let a = r.node_at(arc.from).clone();
                let b = r.node_at(arc.to).clone();
                dict.entry(a.clone()).or_default().insert(b.clone(), magnitude);
                dict.entry(b).or_default().insert(a, magnitude);
            }
        }
    }

    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;
    use crate::residual::ResidualGraph;

    #[test]
    fn directed_dict_reports_zero_flow_edges() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 5);
        g.add_edge("a", "t", 0);
        let r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        let dict = build_flow_dict(&r);
        assert_eq!(dict[&"a"][&"t"], 0);
    }

    #[test]
    fn undirected_dict_is_symmetric() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::undirected();
        g.add_edge(1, 2, 1);
        let mut r = ResidualGraph::build(&g, &1, &2, "capacity").unwrap();
        let arc = r.arcs_from(r.index_of(&1).unwrap())[0];
        r.push_flow(arc, 1);
        let dict = build_flow_dict(&r);
        assert_eq!(dict[&1][&2], 1);
        assert_eq!(dict[&2][&1], 1);
    }

    #[test]
    fn isolated_vertex_has_empty_entry() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_edge(0, 1, 1);
        g.add_node(2);
        let r = ResidualGraph::build(&g, &0, &1, "capacity").unwrap();
        let dict = build_flow_dict(&r);
        assert!(dict[&2].is_empty());
    }
}
