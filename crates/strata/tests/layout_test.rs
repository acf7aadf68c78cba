use std::collections::BTreeMap;
use strata::graphlib::{EdgeKey, Graph, GraphOptions};
use strata::{EdgeLabel, GraphLabel, LayoutError, MAX_MINLEN, NodeLabel, Point, RankDir, layout};

type G = Graph<NodeLabel, EdgeLabel, GraphLabel>;

fn new_graph() -> G {
    Graph::new(GraphOptions::multigraph())
}

fn node(width: f64, height: f64) -> NodeLabel {
    NodeLabel {
        width,
        height,
        ..Default::default()
    }
}

fn coords(g: &G) -> BTreeMap<String, (f64, f64)> {
    g.node_entries()
        .map(|(id, n)| (id.to_string(), (n.x.unwrap(), n.y.unwrap())))
        .collect()
}

#[test]
fn layout_can_layout_a_single_node() {
    let mut g = new_graph();
    g.set_node("a", node(50.0, 100.0));

    layout(&mut g).unwrap();

    assert_eq!(coords(&g), [("a".to_string(), (25.0, 50.0))].into());
    assert_eq!(g.node("a").unwrap().rank, Some(0));
    assert_eq!(g.node("a").unwrap().order, Some(0));
    assert_eq!(g.graph().width, Some(50.0));
    assert_eq!(g.graph().height, Some(100.0));
}

#[test]
fn layout_can_layout_two_nodes_on_the_same_rank() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 200.0;
    g.set_node("a", node(50.0, 100.0));
    g.set_node("b", node(75.0, 200.0));

    layout(&mut g).unwrap();

    assert_eq!(
        coords(&g),
        [
            ("a".to_string(), (25.0, 100.0)),
            ("b".to_string(), (50.0 + 200.0 + 75.0 / 2.0, 100.0)),
        ]
        .into()
    );
}

#[test]
fn layout_can_layout_two_nodes_connected_by_an_edge() {
    let mut g = new_graph();
    g.graph_mut().ranksep = 300.0;
    g.set_node("a", node(50.0, 100.0));
    g.set_node("b", node(75.0, 200.0));
    g.set_edge("a", "b", EdgeLabel::default());

    layout(&mut g).unwrap();

    assert_eq!(
        coords(&g),
        [
            ("a".to_string(), (75.0 / 2.0, 100.0 / 2.0)),
            ("b".to_string(), (75.0 / 2.0, 100.0 + 300.0 + 200.0 / 2.0)),
        ]
        .into()
    );
    assert_eq!(
        g.edge("a", "b", None).unwrap().points,
        vec![
            Point::new(37.5, 100.0),
            Point::new(37.5, 250.0),
            Point::new(37.5, 400.0),
        ]
    );
    assert_eq!(g.edge("a", "b", None).unwrap().x, None);
}

#[test]
fn layout_places_ranks_left_to_right_for_lr() {
    let mut g = new_graph();
    g.graph_mut().rankdir = RankDir::LR;
    g.set_node("a", node(50.0, 100.0));
    g.set_node("b", node(75.0, 200.0));
    g.set_edge("a", "b", EdgeLabel::default());

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    assert_eq!(a.y, b.y);
    assert!(a.x.unwrap() < b.x.unwrap());
}

#[test]
fn layout_places_ranks_bottom_to_top_for_bt() {
    let mut g = new_graph();
    g.graph_mut().rankdir = RankDir::BT;
    g.set_node("a", node(50.0, 50.0));
    g.set_node("b", node(50.0, 50.0));
    g.set_edge("a", "b", EdgeLabel::default());

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    assert_eq!(a.x, b.x);
    assert!(b.y.unwrap() < a.y.unwrap());
}

#[test]
fn layout_places_a_sized_edge_label_between_its_endpoints() {
    let mut g = new_graph();
    g.set_node("a", node(50.0, 50.0));
    g.set_node("b", node(50.0, 50.0));
    g.set_edge(
        "a",
        "b",
        EdgeLabel {
            width: 60.0,
            height: 20.0,
            ..EdgeLabel::labeled("edge")
        },
    );

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap();
    let b = g.node("b").unwrap();
    let edge = g.edge("a", "b", None).unwrap();
    let (x, y) = (edge.x.unwrap(), edge.y.unwrap());
    assert!(a.y.unwrap() < y && y < b.y.unwrap());
    // Labels default to the right of their edge.
    assert!(x > a.x.unwrap());
}

#[test]
fn layout_routes_self_loops_around_their_node() {
    let mut g = new_graph();
    g.set_node("a", node(100.0, 100.0));
    g.set_edge("a", "a", EdgeLabel::default());

    layout(&mut g).unwrap();

    let edge = g.edge("a", "a", None).unwrap();
    assert_eq!(edge.points.len(), 7);
    let a = g.node("a").unwrap();
    assert!(edge.points.iter().all(|p| p.x >= a.x.unwrap()));
}

#[test]
fn layout_restores_edges_reversed_to_break_cycles() {
    let mut g = new_graph();
    for v in ["a", "b", "c"] {
        g.set_node(v, node(50.0, 50.0));
    }
    g.set_edge("a", "b", EdgeLabel::default());
    g.set_edge("b", "c", EdgeLabel::default());
    g.set_edge("c", "a", EdgeLabel::default());

    layout(&mut g).unwrap();

    assert_eq!(
        g.edge_keys(),
        vec![
            EdgeKey::new("a", "b"),
            EdgeKey::new("b", "c"),
            EdgeKey::new("c", "a"),
        ]
    );
    let c = g.node("c").unwrap();
    let a = g.node("a").unwrap();
    let back = g.edge("c", "a", None).unwrap();
    // The route still starts at `c` and ends at `a`.
    let first = back.points.first().unwrap();
    let last = back.points.last().unwrap();
    assert!((first.y - c.y.unwrap()).abs() <= 25.0);
    assert!((last.y - a.y.unwrap()).abs() <= 25.0);
}

#[test]
fn layout_keeps_x_increasing_with_order() {
    let mut g = new_graph();
    g.set_node("root", node(40.0, 40.0));
    for v in ["x", "y", "z"] {
        g.set_node(v, node(30.0, 40.0));
        g.set_edge("root", v, EdgeLabel::default());
    }

    layout(&mut g).unwrap();

    let mut row: Vec<(usize, f64)> = ["x", "y", "z"]
        .iter()
        .map(|v| {
            let n = g.node(v).unwrap();
            (n.order.unwrap(), n.x.unwrap())
        })
        .collect();
    row.sort_by_key(|(order, _)| *order);
    assert!(row.windows(2).all(|pair| pair[0].1 < pair[1].1));
}

#[test]
fn layout_lays_out_disconnected_components() {
    let mut g = new_graph();
    g.set_node("a", node(20.0, 20.0));
    g.set_node("b", node(20.0, 20.0));
    g.set_node("c", node(20.0, 20.0));
    g.set_edge("a", "b", EdgeLabel::default());

    layout(&mut g).unwrap();

    assert_eq!(g.node("a").unwrap().rank, Some(0));
    assert_eq!(g.node("b").unwrap().rank, Some(2));
    assert_eq!(g.node("c").unwrap().rank, Some(0));
    assert_ne!(g.node("a").unwrap().x, g.node("c").unwrap().x);
}

#[test]
fn layout_accepts_an_empty_graph() {
    let mut g = new_graph();
    layout(&mut g).unwrap();
    assert_eq!(g.graph().width, None);
}

#[test]
fn layout_rejects_negative_node_sizes_without_touching_the_graph() {
    let mut g = new_graph();
    g.set_node("a", node(50.0, 50.0));
    g.set_node("b", node(-1.0, 50.0));
    g.set_edge("a", "b", EdgeLabel::default());

    let err = layout(&mut g).unwrap_err();

    assert_eq!(
        err,
        LayoutError::InvalidNodeSize {
            node: "b".to_string(),
            width: -1.0,
            height: 50.0,
        }
    );
    assert_eq!(g.node("a").unwrap().x, None);
    assert!(g.edge("a", "b", None).unwrap().points.is_empty());
}

#[test]
fn layout_rejects_non_finite_edge_weights() {
    let mut g = new_graph();
    g.set_edge(
        "a",
        "b",
        EdgeLabel {
            weight: f64::NAN,
            ..Default::default()
        },
    );

    let err = layout(&mut g).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidEdgeWeight { ref v, ref w, .. } if v == "a" && w == "b"));
    assert!(err.to_string().contains("`a` -> `b`"));
}

#[test]
fn layout_rejects_negative_spacing() {
    let mut g = new_graph();
    g.graph_mut().ranksep = -5.0;
    g.set_node("a", node(10.0, 10.0));

    assert_eq!(
        layout(&mut g),
        Err(LayoutError::InvalidSpacing {
            field: "ranksep",
            value: -5.0,
        })
    );
}

#[test]
fn layout_rejects_minlen_that_would_overflow_ranks() {
    let mut g = new_graph();
    let long = EdgeLabel {
        minlen: 1 << 30,
        ..Default::default()
    };
    g.set_edge("a", "b", long.clone());
    g.set_edge("b", "c", long);

    let err = layout(&mut g).unwrap_err();

    assert_eq!(
        err,
        LayoutError::InvalidMinlen {
            v: "a".to_string(),
            w: "b".to_string(),
            minlen: 1 << 30,
        }
    );
    assert_eq!(g.node("a").unwrap().rank, None);
}

#[test]
fn layout_accepts_the_largest_minlen() {
    let mut g = new_graph();
    g.set_edge(
        "a",
        "b",
        EdgeLabel {
            minlen: MAX_MINLEN,
            ..Default::default()
        },
    );

    layout(&mut g).unwrap();

    let a = g.node("a").unwrap().rank.unwrap();
    let b = g.node("b").unwrap().rank.unwrap();
    assert_eq!(b - a, 2 * MAX_MINLEN as i32);
}
