//! The four public entry points and the options/algorithm-selection
//! surface that fans out to the individual solvers.

use std::collections::HashMap;
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::cut::{cut_value, extract_cut, Cut};
use crate::error::{FlowError, FlowResult};
use crate::flow_dict::build_flow_dict;
use crate::graph::CapacityGraph;
use crate::residual::ResidualGraph;

#[cfg(feature = "edmonds_karp")]
use crate::algorithms::edmonds_karp;
#[cfg(feature = "ford_fulkerson")]
use crate::algorithms::ford_fulkerson;
#[cfg(feature = "preflow_push")]
use crate::algorithms::preflow_push;
#[cfg(feature = "shortest_augmenting_path")]
use crate::algorithms::shortest_augmenting_path;

/// Which solver to run. [`FlowFunc::PreflowPush`] is the default — it
/// tends to be fastest across the board and needs no parameters beyond
/// `global_relabel_freq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowFunc {
    /// Breadth-first augmenting paths.
    EdmondsKarp,
    /// Depth-first augmenting paths; eagerly builds its own flow dict.
    FordFulkerson,
    /// Distance-labelled augmenting paths.
    ShortestAugmentingPath,
    /// Highest-label push-relabel.
    PreflowPush,
}

/// Tuning knobs shared by all four solvers. Fields not meaningful for a
/// given `flow_func` are simply ignored by that solver.
#[derive(Debug, Clone)]
pub struct FlowOptions<C> {
    flow_func: FlowFunc,
    capacity_attr: String,
    cutoff: Option<C>,
    two_phase: bool,
    global_relabel_freq: i64,
    value_only: bool,
}

impl<C: Capacity> Default for FlowOptions<C> {
    fn default() -> Self {
        Self {
            flow_func: FlowFunc::PreflowPush,
            capacity_attr: "capacity".to_string(),
            cutoff: None,
            two_phase: false,
            global_relabel_freq: 1,
            value_only: false,
        }
    }
}

impl<C: Capacity> FlowOptions<C> {
    /// Starts from the defaults: `preflow_push`, attribute `"capacity"`,
    /// no cutoff, single-phase, `global_relabel_freq = 1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects which solver runs.
    #[must_use]
    pub fn flow_func(mut self, flow_func: FlowFunc) -> Self {
        self.flow_func = flow_func;
        self
    }

    /// Selects the edge attribute holding capacity; edges missing it are
    /// treated as having infinite capacity.
    #[must_use]
    pub fn capacity_attr(mut self, attr: impl Into<String>) -> Self {
        self.capacity_attr = attr.into();
        self
    }

    /// Bounds the flow value; the solver stops as soon as it is reached
    /// or exceeded, returning a feasible but not necessarily maximum
    /// flow. Not accepted by [`minimum_cut`] or [`minimum_cut_value`].
    #[must_use]
    pub fn cutoff(mut self, cutoff: C) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// For `shortest_augmenting_path`: run an initial pass restricted to
    /// short paths before finishing unrestricted.
    #[must_use]
    pub fn two_phase(mut self, two_phase: bool) -> Self {
        self.two_phase = two_phase;
        self
    }

    /// For `preflow_push`: how many discharges (as a multiple of the
    /// vertex count) between global relabelling passes; `0` disables
    /// global relabelling.
    #[must_use]
    pub fn global_relabel_freq(mut self, freq: i64) -> Self {
        self.global_relabel_freq = freq;
        self
    }

    /// Skips flow-dictionary reconstruction, for callers that only need
    /// the flow value.
    #[must_use]
    pub fn value_only(mut self, value_only: bool) -> Self {
        self.value_only = value_only;
        self
    }
}

/// The result of [`maximum_flow`].
#[derive(Debug, Clone)]
pub struct FlowSolution<N, C> {
    /// The maximum (or cutoff-bounded) flow value.
    pub value: C,
    /// Per-edge flow, keyed the way the host graph's adjacency is keyed.
    /// Empty when [`FlowOptions::value_only`] was set.
    pub flow_dict: HashMap<N, HashMap<N, C>>,
    /// The solver tag, e.g. `"preflow_push"`.
    pub algorithm: &'static str,
}

/// The result of [`minimum_cut`].
#[derive(Debug, Clone)]
pub struct MinCutSolution<N, C> {
    /// The minimum cut's value, equal to the maximum flow value.
    pub value: C,
    /// The `(S, T)` vertex partition realizing the cut.
    pub partition: Cut<N>,
}

fn validate_options<C: Capacity, N>(options: &FlowOptions<C>) -> FlowResult<(), N>
where
    N: std::fmt::Debug,
{
    if options.global_relabel_freq < 0 {
        return Err(FlowError::NegativeGlobalRelabelFreq);
    }
    Ok(())
}

fn build_and_run<N, C, G>(
    g: &G,
    s: &N,
    t: &N,
    options: &FlowOptions<C>,
) -> FlowResult<ResidualGraph<N, C>, N>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    C: Capacity,
    G: CapacityGraph<N, C>,
{
    validate_options::<C, N>(options)?;
    let mut r = ResidualGraph::build(g, s, t, &options.capacity_attr)?;
    match options.flow_func {
        #[cfg(feature = "edmonds_karp")]
        FlowFunc::EdmondsKarp => edmonds_karp::run(&mut r, options.cutoff),
        #[cfg(not(feature = "edmonds_karp"))]
        FlowFunc::EdmondsKarp => panic!("the `edmonds_karp` feature is disabled"),

        #[cfg(feature = "ford_fulkerson")]
        FlowFunc::FordFulkerson => ford_fulkerson::run(&mut r, options.cutoff),
        #[cfg(not(feature = "ford_fulkerson"))]
        FlowFunc::FordFulkerson => panic!("the `ford_fulkerson` feature is disabled"),

        #[cfg(feature = "shortest_augmenting_path")]
        FlowFunc::ShortestAugmentingPath => {
            shortest_augmenting_path::run(&mut r, options.cutoff, options.two_phase);
        }
        #[cfg(not(feature = "shortest_augmenting_path"))]
        FlowFunc::ShortestAugmentingPath => {
            panic!("the `shortest_augmenting_path` feature is disabled")
        }

        #[cfg(feature = "preflow_push")]
        FlowFunc::PreflowPush => {
            preflow_push::run(&mut r, options.global_relabel_freq.max(0) as u32);
        }
        #[cfg(not(feature = "preflow_push"))]
        FlowFunc::PreflowPush => panic!("the `preflow_push` feature is disabled"),
    }
    Ok(r)
}

/// Computes a maximum flow from `s` to `t` in `g`.
///
/// # Errors
///
/// See [`FlowError`] for the conditions that reject the call outright,
/// plus [`FlowError::Unbounded`] when an infinite-capacity `s -> t` path
/// already exists.
pub fn maximum_flow<N, C, G>(
    g: &G,
    s: &N,
    t: &N,
    options: &FlowOptions<C>,
) -> FlowResult<FlowSolution<N, C>, N>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    C: Capacity,
    G: CapacityGraph<N, C>,
{
    let r = build_and_run(g, s, t, options)?;
    let flow_dict = if options.value_only {
        HashMap::new()
    } else {
        r.flow_dict().cloned().unwrap_or_else(|| build_flow_dict(&r))
    };
    Ok(FlowSolution {
        value: r.flow_value(),
        flow_dict,
        algorithm: r.algorithm().expect("a solver always tags its run").as_str(),
    })
}

/// Computes only the maximum flow value, skipping flow-dict
/// reconstruction entirely.
///
/// # Errors
///
/// Same as [`maximum_flow`].
pub fn maximum_flow_value<N, C, G>(g: &G, s: &N, t: &N, options: &FlowOptions<C>) -> FlowResult<C, N>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    C: Capacity,
    G: CapacityGraph<N, C>,
{
    let r = build_and_run(g, s, t, options)?;
    Ok(r.flow_value())
}

/// Computes a minimum `s`-`t` cut in `g`.
///
/// # Errors
///
/// Same as [`maximum_flow`], plus [`FlowError::CutoffNotAllowedForMinCut`]
/// if `options` carries a `cutoff` — a cutoff-bounded flow is not
/// necessarily maximum, so its residual graph would not yield an actual
/// minimum cut.
pub fn minimum_cut<N, C, G>(
    g: &G,
    s: &N,
    t: &N,
    options: &FlowOptions<C>,
) -> FlowResult<MinCutSolution<N, C>, N>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    C: Capacity,
    G: CapacityGraph<N, C>,
{
    if options.cutoff.is_some() {
        return Err(FlowError::CutoffNotAllowedForMinCut);
    }
    let r = build_and_run(g, s, t, options)?;
    let partition = extract_cut(&r);
    let value = cut_value(&r, &partition);
    Ok(MinCutSolution { value, partition })
}

/// Computes only the minimum cut's value.
///
/// # Errors
///
/// Same as [`minimum_cut`].
pub fn minimum_cut_value<N, C, G>(g: &G, s: &N, t: &N, options: &FlowOptions<C>) -> FlowResult<C, N>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    C: Capacity,
    G: CapacityGraph<N, C>,
{
    if options.cutoff.is_some() {
        return Err(FlowError::CutoffNotAllowedForMinCut);
    }
    let r = build_and_run(g, s, t, options)?;
    let partition = extract_cut(&r);
    Ok(cut_value(&r, &partition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn default_options_use_preflow_push() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 3);
        g.add_edge("a", "t", 3);
        let solution = maximum_flow(&g, &"s", &"t", &FlowOptions::new()).unwrap();
        assert_eq!(solution.value, 3);
        assert_eq!(solution.algorithm, "preflow_push");
    }

    #[test]
    fn all_four_algorithms_agree() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 3);
        g.add_edge("a", "t", 3);
        g.add_edge("s", "b", 2);
        g.add_edge("b", "t", 2);
        g.add_edge("a", "b", 1);
        for flow_func in [
            FlowFunc::EdmondsKarp,
            FlowFunc::FordFulkerson,
            FlowFunc::ShortestAugmentingPath,
            FlowFunc::PreflowPush,
        ] {
            let options = FlowOptions::new().flow_func(flow_func);
            let value = maximum_flow_value(&g, &"s", &"t", &options).unwrap();
            assert_eq!(value, 5, "{flow_func:?} disagreed");
        }
    }

    #[test]
    fn min_cut_rejects_cutoff() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 5);
        let options = FlowOptions::new().cutoff(3);
        assert_eq!(
            minimum_cut(&g, &"s", &"t", &options).unwrap_err(),
            FlowError::CutoffNotAllowedForMinCut
        );
    }

    #[test]
    fn min_cut_value_equals_max_flow_value() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "a", 3);
        g.add_edge("a", "t", 1);
        g.add_edge("s", "t", 2);
        let flow = maximum_flow_value(&g, &"s", &"t", &FlowOptions::new()).unwrap();
        let cut = minimum_cut_value(&g, &"s", &"t", &FlowOptions::new()).unwrap();
        assert_eq!(flow, cut);
    }

    #[test]
    fn negative_global_relabel_freq_is_rejected() {
        let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
        g.add_edge("s", "t", 5);
        let options = FlowOptions::new().global_relabel_freq(-1);
        assert_eq!(
            maximum_flow_value(&g, &"s", &"t", &options).unwrap_err(),
            FlowError::NegativeGlobalRelabelFreq
        );
    }
}
