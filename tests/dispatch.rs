//! Contract tests for the `FlowOptions` builder surface itself, as
//! opposed to the solvers' numerical behavior.

use maxflow_graph::{maximum_flow, FlowOptions, SimpleGraph};

#[test]
fn value_only_skips_flow_dict_reconstruction() {
    let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
    g.add_edge("s", "t", 5);
    let solution = maximum_flow(&g, &"s", &"t", &FlowOptions::new().value_only(true)).unwrap();
    assert_eq!(solution.value, 5);
    assert!(solution.flow_dict.is_empty());
}

#[test]
fn custom_capacity_attribute_is_honored() {
    use std::collections::HashMap;
    let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
    let mut attrs = HashMap::new();
    attrs.insert("bandwidth".to_string(), 9i64);
    g.add_edge_with_attrs("s", "t", attrs);
    let solution = maximum_flow(
        &g,
        &"s",
        &"t",
        &FlowOptions::new().capacity_attr("bandwidth"),
    )
    .unwrap();
    assert_eq!(solution.value, 9);
}

#[test]
fn unrecognized_capacity_attribute_is_treated_as_infinite() {
    use std::collections::HashMap;
    let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
    // "s" -> "a" carries only "capacity", so under the "latency" attribute
    // it has no entry and is treated as infinite; "a" -> "t" does carry
    // "latency", so the s-t path is not purely infinite and the flow is
    // bounded by that one finite arc.
    g.add_edge("s", "a", 3);
    let mut latency = HashMap::new();
    latency.insert("latency".to_string(), 4i64);
    g.add_edge_with_attrs("a", "t", latency);
    let solution = maximum_flow(
        &g,
        &"s",
        &"t",
        &FlowOptions::new().capacity_attr("latency"),
    )
    .unwrap();
    assert_eq!(solution.value, 4);
}

#[test]
fn all_infinite_path_under_an_unrecognized_attribute_is_unbounded() {
    use maxflow_graph::FlowError;
    let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
    g.add_edge("s", "a", 3);
    g.add_edge("a", "t", 4);
    // Both edges carry "capacity" but not "latency", so both arcs become
    // infinite under that attribute and the whole s-t path is unbounded.
    let err = maxflow_graph::maximum_flow_value(
        &g,
        &"s",
        &"t",
        &FlowOptions::new().capacity_attr("latency"),
    )
    .unwrap_err();
    assert_eq!(err, FlowError::Unbounded);
}

#[test]
fn ford_fulkerson_tag_differs_from_other_solvers() {
    use maxflow_graph::FlowFunc;
    let mut g: SimpleGraph<&str, i64> = SimpleGraph::directed();
    g.add_edge("s", "t", 3);
    let legacy = maximum_flow(
        &g,
        &"s",
        &"t",
        &FlowOptions::new().flow_func(FlowFunc::FordFulkerson),
    )
    .unwrap();
    assert_eq!(legacy.algorithm, "ford_fulkerson_legacy");

    let default = maximum_flow(&g, &"s", &"t", &FlowOptions::new()).unwrap();
    assert_eq!(default.algorithm, "preflow_push");
}
