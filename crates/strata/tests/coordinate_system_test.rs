use strata::coordinate_system::{adjust, undo};
use strata::graphlib::{Graph, GraphOptions};
use strata::layout_graph::{LayoutEdge, LayoutGraph, LayoutNode};
use strata::{Point, RankDir};

fn graph(rankdir: RankDir) -> LayoutGraph {
    let mut g: LayoutGraph = Graph::new(GraphOptions::multigraph());
    g.graph_mut().rankdir = rankdir;
    g.set_node(
        "a",
        LayoutNode {
            x: 20.0,
            y: 40.0,
            ..LayoutNode::sized(100.0, 200.0)
        },
    );
    g.set_edge(
        "a",
        "b",
        LayoutEdge {
            width: 30.0,
            height: 10.0,
            x: Some(1.0),
            y: Some(2.0),
            points: vec![Point::new(3.0, 4.0)],
            ..Default::default()
        },
    );
    g
}

#[test]
fn adjust_leaves_vertical_layouts_alone() {
    for rankdir in [RankDir::TB, RankDir::BT] {
        let mut g = graph(rankdir);
        adjust(&mut g);
        let a = g.node("a").unwrap();
        assert_eq!((a.width, a.height), (100.0, 200.0));
    }
}

#[test]
fn adjust_swaps_sizes_for_horizontal_layouts() {
    for rankdir in [RankDir::LR, RankDir::RL] {
        let mut g = graph(rankdir);
        adjust(&mut g);
        let a = g.node("a").unwrap();
        assert_eq!((a.width, a.height), (200.0, 100.0));
        let e = g.edge("a", "b", None).unwrap();
        assert_eq!((e.width, e.height), (10.0, 30.0));
    }
}

#[test]
fn undo_flips_y_for_bt() {
    let mut g = graph(RankDir::BT);
    undo(&mut g);

    let a = g.node("a").unwrap();
    assert_eq!((a.x, a.y), (20.0, -40.0));
    let e = g.edge("a", "b", None).unwrap();
    assert_eq!(e.points, vec![Point::new(3.0, -4.0)]);
    assert_eq!(e.y, Some(-2.0));
}

#[test]
fn undo_swaps_axes_for_lr() {
    let mut g = graph(RankDir::LR);
    adjust(&mut g);
    undo(&mut g);

    let a = g.node("a").unwrap();
    assert_eq!((a.x, a.y), (40.0, 20.0));
    assert_eq!((a.width, a.height), (100.0, 200.0));
    let e = g.edge("a", "b", None).unwrap();
    assert_eq!(e.points, vec![Point::new(4.0, 3.0)]);
    assert_eq!((e.x, e.y), (Some(2.0), Some(1.0)));
}

#[test]
fn undo_flips_then_swaps_for_rl() {
    let mut g = graph(RankDir::RL);
    adjust(&mut g);
    undo(&mut g);

    let a = g.node("a").unwrap();
    assert_eq!((a.x, a.y), (-40.0, 20.0));
}
