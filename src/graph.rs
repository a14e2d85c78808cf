//! The minimal "host graph" trait this crate consumes, plus a small
//! directly-constructible adapter used by the crate's own tests and
//! doctests.
//!
//! The host graph data structure itself is out of scope for this crate —
//! callers are expected to bring their own labelled multigraph and
//! implement [`CapacityGraph`] for it. [`SimpleGraph`] exists only so
//! this crate does not need an external graph dependency to test itself.

use std::collections::HashMap;
use std::hash::Hash;

use crate::capacity::Capacity;

/// The four operations this crate needs from a host graph: iterate
/// nodes, iterate edges with their full attribute table, test adjacency,
/// and discriminate directed from undirected.
///
/// Mutation (`remove_edges_from`-style validation helpers some flow
/// libraries expose) is deliberately not part of this trait: it belongs
/// to the host graph's own API, not to a read-only collaborator trait.
pub trait CapacityGraph<N, C>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    /// Every vertex, in a stable iteration order.
    fn nodes(&self) -> Vec<N>;

    /// Whether edges are directed. Undirected edges are expanded into a
    /// pair of directed edges of the same capacity by the residual graph
    /// builder.
    fn is_directed(&self) -> bool;

    /// Whether an edge from `u` to `v` exists (in the direction given, for
    /// a directed graph; in either direction, for an undirected one).
    fn has_edge(&self, u: &N, v: &N) -> bool;

    /// Every edge, in insertion order, together with its attribute table.
    /// A missing entry for the chosen capacity attribute is how a caller
    /// expresses "infinite capacity" on that edge.
    fn edges(&self) -> Vec<(N, N, HashMap<String, C>)>;
}

/// A minimal, directly-constructible labelled multigraph.
///
/// This is a test fixture, not a general-purpose graph type: it stores
/// edges in a flat `Vec` and answers `has_edge` by linear scan. Real
/// callers with performance-sensitive graphs should implement
/// [`CapacityGraph`] for their own graph type instead.
#[derive(Clone, Debug, Default)]
pub struct SimpleGraph<N, C> {
    directed: bool,
    nodes: Vec<N>,
    edges: Vec<(N, N, HashMap<String, C>)>,
}

impl<N, C> SimpleGraph<N, C>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    /// Creates an empty directed graph.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            directed: true,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Creates an empty undirected graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self {
            directed: false,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a vertex, if not already present.
    pub fn add_node(&mut self, n: N) {
        if !self.nodes.contains(&n) {
            self.nodes.push(n);
        }
    }

    /// Adds an edge with an explicit attribute table, implicitly adding
    /// any endpoint not already present.
    pub fn add_edge_with_attrs(&mut self, u: N, v: N, attrs: HashMap<String, C>) {
        self.add_node(u.clone());
        self.add_node(v.clone());
        self.edges.push((u, v, attrs));
    }

    /// Adds an edge with a single `"capacity"` attribute.
    pub fn add_edge(&mut self, u: N, v: N, capacity: C) {
        let mut attrs = HashMap::with_capacity(1);
        attrs.insert("capacity".to_string(), capacity);
        self.add_edge_with_attrs(u, v, attrs);
    }

    /// Adds an edge with no capacity attribute at all, i.e. infinite
    /// capacity.
    pub fn add_unbounded_edge(&mut self, u: N, v: N) {
        self.add_edge_with_attrs(u, v, HashMap::new());
    }

    /// Removes a vertex and every edge touching it, matching the
    /// `remove_edges_from`/`remove_node` shape used by the host-graph
    /// validation routines that sit outside this crate's core.
    pub fn remove_node(&mut self, n: &N) {
        self.nodes.retain(|v| v != n);
        self.edges.retain(|(u, v, _)| u != n && v != n);
    }
}

impl<N, C> CapacityGraph<N, C> for SimpleGraph<N, C>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    fn nodes(&self) -> Vec<N> {
        self.nodes.clone()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn has_edge(&self, u: &N, v: &N) -> bool {
        self.edges.iter().any(|(a, b, _)| {
            (a == u && b == v) || (!self.directed && a == v && b == u)
        })
    }

    fn edges(&self) -> Vec<(N, N, HashMap<String, C>)> {
        self.edges.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_edges_and_adjacency() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 5);
        assert!(g.has_edge(&"s", &"t"));
        assert!(!g.has_edge(&"t", &"s"));
        assert_eq!(g.nodes(), vec!["s", "t"]);
        assert_eq!(g.edges().len(), 1);
    }

    #[test]
    fn undirected_adjacency_is_symmetric() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::undirected();
        g.add_edge(1, 2, 3);
        assert!(g.has_edge(&1, &2));
        assert!(g.has_edge(&2, &1));
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_edge(0, 1, 1);
        g.add_edge(1, 2, 1);
        g.remove_node(&1);
        assert_eq!(g.nodes(), vec![0, 2]);
        assert!(g.edges().is_empty());
    }
}
