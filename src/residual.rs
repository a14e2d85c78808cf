//! The residual graph: an arc arena with O(1) reverse-arc lookup, built
//! once per solver call and then mutated in place by exactly one solver.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use indexmap::IndexMap;

use crate::capacity::{infinite_capacity, Capacity};
use crate::error::{FlowError, FlowResult};
use crate::graph::CapacityGraph;

/// Identifies which solver produced a [`ResidualGraph`], matching the
/// string tags the distilled interface specifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Breadth-first augmenting paths.
    EdmondsKarp,
    /// Depth-first augmenting paths; the only variant with an eagerly
    /// populated [`ResidualGraph::flow_dict`].
    FordFulkersonLegacy,
    /// Distance-labelled augmenting paths, optionally two-phase.
    ShortestAugmentingPath,
    /// Highest-label push-relabel.
    PreflowPush,
}

impl Algorithm {
    /// The tag string used by the distilled interface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EdmondsKarp => "edmonds_karp",
            Self::FordFulkersonLegacy => "ford_fulkerson_legacy",
            Self::ShortestAugmentingPath => "shortest_augmenting_path",
            Self::PreflowPush => "preflow_push",
        }
    }
}

/// One arc of the residual graph arena.
///
/// `reverse` always points at this arc's twin, such that
/// `arcs[arcs[i].reverse].reverse == i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc<C> {
    /// Index of the tail vertex.
    pub from: usize,
    /// Index of the head vertex.
    pub to: usize,
    /// Residual capacity ceiling.
    pub capacity: C,
    /// Current flow; `arcs[i].flow == -arcs[arcs[i].reverse].flow` always.
    pub flow: C,
    /// Index of the paired arc running in the opposite direction.
    pub reverse: usize,
    /// Whether this arc's capacity originated (at least in part) from an
    /// edge missing the capacity attribute.
    pub infinite: bool,
}

impl<C: Capacity> Arc<C> {
    /// Remaining residual capacity: `capacity - flow`.
    #[must_use]
    pub fn residual(&self) -> C {
        self.capacity - self.flow
    }
}

/// A directed multigraph of residual capacities derived from a host
/// graph, mutated in place by exactly one solver.
pub struct ResidualGraph<N, C> {
    nodes: IndexMap<N, usize>,
    directed: bool,
    adjacency: Vec<Vec<usize>>,
    arcs: Vec<Arc<C>>,
    logical_edges: Vec<(usize, usize)>,
    source: usize,
    sink: usize,
    inf: C,
    flow_value: C,
    algorithm: Option<Algorithm>,
    flow_dict_cache: Option<HashMap<N, HashMap<N, C>>>,
}

impl<N: std::fmt::Debug + Eq + Hash, C: std::fmt::Debug> std::fmt::Debug for ResidualGraph<N, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResidualGraph")
            .field("nodes", &self.nodes)
            .field("directed", &self.directed)
            .field("adjacency", &self.adjacency)
            .field("arcs", &self.arcs)
            .field("logical_edges", &self.logical_edges)
            .field("source", &self.source)
            .field("sink", &self.sink)
            .field("inf", &self.inf)
            .field("flow_value", &self.flow_value)
            .field("algorithm", &self.algorithm)
            .field("flow_dict_cache", &self.flow_dict_cache)
            .finish()
    }
}

impl<N: Eq + Hash, C: PartialEq> PartialEq for ResidualGraph<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.directed == other.directed
            && self.adjacency == other.adjacency
            && self.arcs == other.arcs
            && self.logical_edges == other.logical_edges
            && self.source == other.source
            && self.sink == other.sink
            && self.inf == other.inf
            && self.flow_value == other.flow_value
            && self.algorithm == other.algorithm
            && self.flow_dict_cache == other.flow_dict_cache
    }
}

impl<N, C> ResidualGraph<N, C>
where
    N: Eq + Hash + Clone,
    C: Capacity,
{
    /// Builds a residual graph for `s -> t` from `g`, reading capacities
    /// under `capacity_attr` (a missing attribute denotes infinite
    /// capacity).
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::CoincidentEndpoints`] if `s == t`,
    /// [`FlowError::UnknownVertex`] if either endpoint is absent,
    /// [`FlowError::NegativeCapacity`] if an edge has a negative
    /// capacity, or [`FlowError::Unbounded`] if an `s -> t` path made
    /// entirely of infinite-capacity arcs already exists before any
    /// solver has run.
    pub fn build<G>(g: &G, s: &N, t: &N, capacity_attr: &str) -> FlowResult<Self, N>
    where
        G: CapacityGraph<N, C>,
    {
        if s == t {
            return Err(FlowError::CoincidentEndpoints);
        }
        let mut nodes: IndexMap<N, usize> = IndexMap::new();
        for n in g.nodes() {
            let idx = nodes.len();
            nodes.entry(n).or_insert(idx);
        }
        let source = *nodes
            .get(s)
            .ok_or_else(|| FlowError::UnknownVertex(s.clone()))?;
        let sink = *nodes
            .get(t)
            .ok_or_else(|| FlowError::UnknownVertex(t.clone()))?;

        let raw_edges = g.edges();
        let inf = infinite_capacity(raw_edges.iter().filter_map(|(_, _, attrs)| {
            attrs.get(capacity_attr).copied().filter(|c| *c >= C::zero())
        }));

        let mut adjacency = vec![Vec::new(); nodes.len()];
        let mut arcs: Vec<Arc<C>> = Vec::new();
        let mut logical_edges = Vec::new();
        let mut directed_index: HashMap<(usize, usize), usize> = HashMap::new();
        let mut undirected_index: HashMap<(usize, usize), usize> = HashMap::new();
        let directed = g.is_directed();

        for (u, v, attrs) in raw_edges {
            let missing = !attrs.contains_key(capacity_attr);
            let value = attrs.get(capacity_attr).copied().unwrap_or(inf);
            if value < C::zero() {
                return Err(FlowError::NegativeCapacity(u, v));
            }
            let ui = *nodes.entry(u).or_insert_with(|| {
                let idx = adjacency.len();
                adjacency.push(Vec::new());
                idx
            });
            let vi = *nodes.entry(v).or_insert_with(|| {
                let idx = adjacency.len();
                adjacency.push(Vec::new());
                idx
            });

            if directed {
                if let Some(&idx) = directed_index.get(&(ui, vi)) {
                    arcs[idx].capacity = arcs[idx].capacity + value;
                    arcs[idx].infinite = arcs[idx].infinite || missing;
                } else {
                    let fwd = arcs.len();
                    let rev = fwd + 1;
                    arcs.push(Arc {
                        from: ui,
                        to: vi,
                        capacity: value,
                        flow: C::zero(),
                        reverse: rev,
                        infinite: missing,
                    });
                    arcs.push(Arc {
                        from: vi,
                        to: ui,
                        capacity: C::zero(),
                        flow: C::zero(),
                        reverse: fwd,
                        infinite: false,
                    });
                    adjacency[ui].push(fwd);
                    adjacency[vi].push(rev);
                    directed_index.insert((ui, vi), fwd);
                    logical_edges.push((ui, vi));
                }
            } else {
                let key = (ui.min(vi), ui.max(vi));
                if let Some(&fwd) = undirected_index.get(&key) {
                    let rev = arcs[fwd].reverse;
                    arcs[fwd].capacity = arcs[fwd].capacity + value;
                    arcs[rev].capacity = arcs[rev].capacity + value;
                    arcs[fwd].infinite = arcs[fwd].infinite || missing;
                    arcs[rev].infinite = arcs[rev].infinite || missing;
                } else {
                    let fwd = arcs.len();
                    let rev = fwd + 1;
                    arcs.push(Arc {
                        from: ui,
                        to: vi,
                        capacity: value,
                        flow: C::zero(),
                        reverse: rev,
                        infinite: missing,
                    });
                    arcs.push(Arc {
                        from: vi,
                        to: ui,
                        capacity: value,
                        flow: C::zero(),
                        reverse: fwd,
                        infinite: missing,
                    });
                    adjacency[ui].push(fwd);
                    adjacency[vi].push(rev);
                    undirected_index.insert(key, fwd);
                    logical_edges.push((ui, vi));
                    logical_edges.push((vi, ui));
                }
            }
        }

        let graph = Self {
            nodes,
            directed,
            adjacency,
            arcs,
            logical_edges,
            source,
            sink,
            inf,
            flow_value: C::zero(),
            algorithm: None,
            flow_dict_cache: None,
        };
        if graph.has_all_infinite_path(source, sink) {
            return Err(FlowError::Unbounded);
        }
        Ok(graph)
    }

    /// `true` if `t` is reachable from `s` using only arcs whose capacity
    /// came (at least partly) from a missing capacity attribute.
    fn has_all_infinite_path(&self, source: usize, sink: usize) -> bool {
        let mut seen = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::new();
        seen[source] = true;
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            if u == sink {
                return true;
            }
            for &arc in &self.adjacency[u] {
                let a = &self.arcs[arc];
                if a.infinite && !seen[a.to] {
                    seen[a.to] = true;
                    queue.push_back(a.to);
                }
            }
        }
        false
    }

    /// Number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the underlying host graph was directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Index of the source vertex.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Index of the sink vertex.
    #[must_use]
    pub const fn sink(&self) -> usize {
        self.sink
    }

    /// The `INF` sentinel computed for this call.
    #[must_use]
    pub const fn inf(&self) -> C {
        self.inf
    }

    /// Arc indices leaving `u`, in residual-adjacency insertion order.
    #[must_use]
    pub fn arcs_from(&self, u: usize) -> &[usize] {
        &self.adjacency[u]
    }

    /// Immutable access to an arc.
    #[must_use]
    pub fn arc(&self, idx: usize) -> &Arc<C> {
        &self.arcs[idx]
    }

    /// Total number of arcs (forward and reverse).
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Pushes `delta` units of flow along `arc`, decrementing its twin to
    /// preserve skew-symmetry between an arc and its reverse.
    pub fn push_flow(&mut self, arc: usize, delta: C) {
        let rev = self.arcs[arc].reverse;
        self.arcs[arc].flow = self.arcs[arc].flow + delta;
        self.arcs[rev].flow = self.arcs[rev].flow - delta;
        debug_assert!(self.arcs[arc].flow <= self.arcs[arc].capacity);
        debug_assert!(self.arcs[arc].flow + self.arcs[rev].flow == C::zero());
    }

    /// Augments flow by `delta` along a path given as a sequence of arc
    /// indices from `source` to `sink`.
    pub fn augment_path(&mut self, path: &[usize], delta: C) {
        for &arc in path {
            self.push_flow(arc, delta);
        }
        self.flow_value = self.flow_value + delta;
    }

    /// Vertex index for a node, if present.
    #[must_use]
    pub fn index_of(&self, n: &N) -> Option<usize> {
        self.nodes.get(n).copied()
    }

    /// The node at a given vertex index.
    #[must_use]
    pub fn node_at(&self, idx: usize) -> &N {
        self.nodes.get_index(idx).expect("vertex index in range").0
    }

    /// All nodes, in stable insertion order.
    #[must_use]
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.keys()
    }

    /// The deduplicated `(from, to)` index pairs that correspond to a
    /// logical input edge, used to guarantee the flow dictionary's keyset
    /// matches the host graph's adjacency even for zero-flow edges.
    #[must_use]
    pub fn logical_edges(&self) -> &[(usize, usize)] {
        &self.logical_edges
    }

    /// The flow value recorded after a solver terminates.
    #[must_use]
    pub const fn flow_value(&self) -> C {
        self.flow_value
    }

    pub(crate) fn set_flow_value(&mut self, value: C) {
        self.flow_value = value;
    }

    /// The algorithm tag, once a solver has run.
    #[must_use]
    pub const fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub(crate) fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    /// The eagerly-built flow dictionary, populated only by legacy
    /// Ford-Fulkerson.
    #[must_use]
    pub fn flow_dict(&self) -> Option<&HashMap<N, HashMap<N, C>>> {
        self.flow_dict_cache.as_ref()
    }

    pub(crate) fn set_flow_dict(&mut self, dict: HashMap<N, HashMap<N, C>>) {
        self.flow_dict_cache = Some(dict);
    }

    /// Checks flow conservation, skew-symmetry, and capacity bounds over
    /// the whole arena; intended for tests, not for production hot paths.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        for (i, arc) in self.arcs.iter().enumerate() {
            if arc.flow + self.arcs[arc.reverse].flow != C::zero() {
                return false;
            }
            if self.arcs[arc.reverse].reverse != i {
                return false;
            }
            if arc.capacity > C::zero() && (arc.flow < C::zero() || arc.flow > arc.capacity) {
                return false;
            }
        }
        for v in 0..self.adjacency.len() {
            if v == self.source || v == self.sink {
                continue;
            }
            let net: C = self
                .adjacency
                .iter()
                .enumerate()
                .filter(|(u, _)| *u == v)
                .flat_map(|(_, arcs)| arcs.iter())
                .fold(C::zero(), |acc, &a| acc + self.arcs[a].flow);
            if net != C::zero() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn builds_simple_directed_residual() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 5);
        let r = ResidualGraph::build(&g, &"s", &"t", "capacity").unwrap();
        assert_eq!(r.node_count(), 2);
        assert_eq!(r.arc_count(), 2);
        let fwd = r.arcs_from(r.index_of(&"s").unwrap())[0];
        assert_eq!(r.arc(fwd).capacity, 5);
        assert_eq!(r.arc(fwd).residual(), 5);
    }

    #[test]
    fn sums_parallel_directed_edges() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_edge(0, 1, 3);
        g.add_edge(0, 1, 4);
        let r = ResidualGraph::build(&g, &0, &1, "capacity").unwrap();
        assert_eq!(r.arc_count(), 2);
        let fwd = r.arcs_from(0)[0];
        assert_eq!(r.arc(fwd).capacity, 7);
    }

    #[test]
    fn keeps_antiparallel_edges_distinct() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_edge(0, 1, 3);
        g.add_edge(1, 0, 9);
        let r = ResidualGraph::build(&g, &0, &1, "capacity").unwrap();
        assert_eq!(r.arc_count(), 4);
    }

    #[test]
    fn undirected_edge_has_symmetric_capacity() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::undirected();
        g.add_edge(1, 2, 1);
        let r = ResidualGraph::build(&g, &1, &2, "capacity").unwrap();
        assert_eq!(r.arc_count(), 2);
        let fwd = r.arcs_from(r.index_of(&1).unwrap())[0];
        let rev = r.arc(fwd).reverse;
        assert_eq!(r.arc(fwd).capacity, 1);
        assert_eq!(r.arc(rev).capacity, 1);
    }

    #[test]
    fn rejects_coincident_endpoints() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_node(0);
        assert_eq!(
            ResidualGraph::<u32, i64>::build(&g, &0, &0, "capacity"),
            Err(FlowError::CoincidentEndpoints)
        );
    }

    #[test]
    fn rejects_unknown_vertex() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_node(0);
        assert_eq!(
            ResidualGraph::<u32, i64>::build(&g, &0, &1, "capacity"),
            Err(FlowError::UnknownVertex(1))
        );
    }

    #[test]
    fn rejects_negative_capacity() {
        let mut g: SimpleGraph<u32, i64> = SimpleGraph::directed();
        g.add_edge(0, 1, -1);
        assert_eq!(
            ResidualGraph::<u32, i64>::build(&g, &0, &1, "capacity"),
            Err(FlowError::NegativeCapacity(0, 1))
        );
    }

    #[test]
    fn detects_all_infinite_path() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_unbounded_edge("s", "a");
        g.add_unbounded_edge("a", "t");
        g.add_edge("s", "t", 3);
        assert_eq!(
            ResidualGraph::<_, i64>::build(&g, &"s", &"t", "capacity"),
            Err(FlowError::Unbounded)
        );
    }

    #[test]
    fn mixed_finite_and_infinite_path_is_not_unbounded() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_unbounded_edge("s", "a");
        g.add_edge("a", "t", 60);
        let r = ResidualGraph::<_, i64>::build(&g, &"s", &"t", "capacity").unwrap();
        assert_eq!(r.inf(), 60);
    }
}
