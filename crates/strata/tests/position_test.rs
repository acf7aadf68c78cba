use strata::graphlib::{Graph, GraphOptions};
use strata::layout_graph::{Dummy, LayoutEdge, LayoutGraph, LayoutNode};
use strata::position::bk::{
    Alignment, Conflicts, Xs, add_conflict, align_coordinates, balance,
    find_smallest_width_alignment, find_type1_conflicts, has_conflict, horizontal_compaction,
    position_x, vertical_alignment,
};
use strata::position::position_y;
use strata::{Align, LabelPos};

fn new_graph() -> LayoutGraph {
    Graph::new(GraphOptions::multigraph())
}

fn layering(layers: &[&[&str]]) -> Vec<Vec<String>> {
    layers
        .iter()
        .map(|layer| layer.iter().map(|v| v.to_string()).collect())
        .collect()
}

fn xs(pairs: &[(&str, f64)]) -> Xs {
    pairs.iter().map(|(v, x)| (v.to_string(), *x)).collect()
}

fn alignment(root: &[(&str, &str)], align: &[(&str, &str)]) -> Alignment {
    let pairs = |ps: &[(&str, &str)]| {
        ps.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    Alignment {
        root: pairs(root),
        align: pairs(align),
    }
}

fn predecessors_in(g: &LayoutGraph) -> impl Fn(&str) -> Vec<String> + '_ {
    move |v: &str| g.predecessors(v).into_iter().map(str::to_string).collect()
}

/// Two ranks `[a, b]` over `[c, d]` with edges `a -> d` and `b -> c`.
fn crossed(dummies: &[&str]) -> LayoutGraph {
    let mut g = new_graph();
    for (v, rank, order) in [("a", 0, 0), ("b", 0, 1), ("c", 1, 0), ("d", 1, 1)] {
        g.set_node(
            v,
            LayoutNode {
                rank: Some(rank),
                order: Some(order),
                dummy: dummies.contains(&v).then_some(Dummy::Edge),
                ..Default::default()
            },
        );
    }
    g.set_edge("a", "d", LayoutEdge::default());
    g.set_edge("b", "c", LayoutEdge::default());
    g
}

// ---- y ----------------------------------------------------------------------------------------

#[test]
fn position_y_centers_each_rank_on_its_tallest_node() {
    let mut g = new_graph();
    g.graph_mut().ranksep = 50.0;
    for (v, rank, height) in [("a", 0, 100.0), ("b", 0, 40.0), ("c", 1, 50.0), ("d", 3, 20.0)] {
        g.set_node(
            v,
            LayoutNode {
                rank: Some(rank),
                ..LayoutNode::sized(10.0, height)
            },
        );
    }

    position_y(&mut g);

    let y = |v: &str| g.node(v).unwrap().y;
    assert_eq!(y("a"), 50.0);
    assert_eq!(y("b"), 50.0);
    assert_eq!(y("c"), 100.0 + 50.0 + 25.0);
    // Rank 2 is empty and only contributes its separation.
    assert_eq!(y("d"), 250.0 + 50.0 + 10.0);
}

// ---- conflicts --------------------------------------------------------------------------------

#[test]
fn conflicts_are_symmetric() {
    let mut conflicts = Conflicts::default();
    add_conflict(&mut conflicts, "b", "a");

    assert!(has_conflict(&conflicts, "a", "b"));
    assert!(has_conflict(&conflicts, "b", "a"));
    assert!(!has_conflict(&conflicts, "a", "c"));
}

#[test]
fn find_type1_conflicts_ignores_crossings_between_real_nodes() {
    let g = crossed(&[]);
    let conflicts = find_type1_conflicts(&g, &layering(&[&["a", "b"], &["c", "d"]]));
    assert!(conflicts.is_empty());
}

#[test]
fn find_type1_conflicts_marks_segments_crossing_an_inner_segment() {
    let g = crossed(&["a", "d"]);
    let conflicts = find_type1_conflicts(&g, &layering(&[&["a", "b"], &["c", "d"]]));

    assert!(has_conflict(&conflicts, "b", "c"));
    assert!(!has_conflict(&conflicts, "a", "d"));
}

#[test]
fn find_type1_conflicts_ignores_crossing_inner_segments() {
    let g = crossed(&["a", "b", "c", "d"]);
    let conflicts = find_type1_conflicts(&g, &layering(&[&["a", "b"], &["c", "d"]]));
    assert!(conflicts.is_empty());
}

// ---- vertical alignment -----------------------------------------------------------------------

#[test]
fn vertical_alignment_keeps_isolated_nodes_in_their_own_block() {
    let g = new_graph();
    let result = vertical_alignment(
        &layering(&[&["a"], &["b"]]),
        &Conflicts::default(),
        predecessors_in(&g),
    );
    assert_eq!(
        result,
        alignment(&[("a", "a"), ("b", "b")], &[("a", "a"), ("b", "b")])
    );
}

#[test]
fn vertical_alignment_joins_a_node_with_its_sole_neighbor() {
    let mut g = new_graph();
    g.set_edge("a", "b", LayoutEdge::default());

    let result = vertical_alignment(
        &layering(&[&["a"], &["b"]]),
        &Conflicts::default(),
        predecessors_in(&g),
    );

    assert_eq!(
        result,
        alignment(&[("a", "a"), ("b", "a")], &[("a", "b"), ("b", "a")])
    );
}

#[test]
fn vertical_alignment_prefers_the_left_median() {
    let mut g = new_graph();
    g.set_edge("a", "c", LayoutEdge::default());
    g.set_edge("b", "c", LayoutEdge::default());

    let result = vertical_alignment(
        &layering(&[&["a", "b"], &["c"]]),
        &Conflicts::default(),
        predecessors_in(&g),
    );

    assert_eq!(
        result,
        alignment(
            &[("a", "a"), ("b", "b"), ("c", "a")],
            &[("a", "c"), ("b", "b"), ("c", "a")]
        )
    );
}

#[test]
fn vertical_alignment_falls_back_to_the_right_median_on_conflict() {
    let mut g = new_graph();
    g.set_edge("a", "c", LayoutEdge::default());
    g.set_edge("b", "c", LayoutEdge::default());
    let mut conflicts = Conflicts::default();
    add_conflict(&mut conflicts, "a", "c");

    let result = vertical_alignment(
        &layering(&[&["a", "b"], &["c"]]),
        &conflicts,
        predecessors_in(&g),
    );

    assert_eq!(
        result,
        alignment(
            &[("a", "a"), ("b", "b"), ("c", "b")],
            &[("a", "a"), ("b", "c"), ("c", "b")]
        )
    );
}

// ---- horizontal compaction --------------------------------------------------------------------

fn sized(width: f64) -> LayoutNode {
    LayoutNode::sized(width, 10.0)
}

#[test]
fn horizontal_compaction_places_a_single_node_at_the_origin() {
    let mut g = new_graph();
    g.set_node("a", sized(100.0));

    let result = horizontal_compaction(
        &g,
        &layering(&[&["a"]]),
        &alignment(&[("a", "a")], &[("a", "a")]),
        false,
    );

    assert_eq!(result, xs(&[("a", 0.0)]));
}

#[test]
fn horizontal_compaction_separates_adjacent_nodes_by_nodesep() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 100.0;
    g.set_node("a", sized(100.0));
    g.set_node("b", sized(200.0));

    let result = horizontal_compaction(
        &g,
        &layering(&[&["a", "b"]]),
        &alignment(&[("a", "a"), ("b", "b")], &[("a", "a"), ("b", "b")]),
        false,
    );

    assert_eq!(result, xs(&[("a", 0.0), ("b", 100.0 / 2.0 + 100.0 + 200.0 / 2.0)]));
}

#[test]
fn horizontal_compaction_separates_dummies_by_edgesep() {
    let mut g = new_graph();
    g.graph_mut().edgesep = 20.0;
    for (v, width) in [("a", 100.0), ("b", 200.0)] {
        g.set_node(
            v,
            LayoutNode {
                dummy: Some(Dummy::Edge),
                ..sized(width)
            },
        );
    }

    let result = horizontal_compaction(
        &g,
        &layering(&[&["a", "b"]]),
        &alignment(&[("a", "a"), ("b", "b")], &[("a", "a"), ("b", "b")]),
        false,
    );

    assert_eq!(result, xs(&[("a", 0.0), ("b", 100.0 / 2.0 + 20.0 + 200.0 / 2.0)]));
}

#[test]
fn horizontal_compaction_accounts_for_label_position() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 100.0;
    g.set_node(
        "a",
        LayoutNode {
            labelpos: Some(LabelPos::L),
            ..sized(100.0)
        },
    );
    g.set_node(
        "b",
        LayoutNode {
            labelpos: Some(LabelPos::R),
            ..sized(200.0)
        },
    );

    let result = horizontal_compaction(
        &g,
        &layering(&[&["a", "b"]]),
        &alignment(&[("a", "a"), ("b", "b")], &[("a", "a"), ("b", "b")]),
        false,
    );

    // `a` extends left of its x and `b` right of its x, so only nodesep is left between them.
    assert_eq!(result, xs(&[("a", 0.0), ("b", 100.0)]));
}

#[test]
fn horizontal_compaction_moves_a_block_as_one() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    g.set_node("a", sized(100.0));
    g.set_node("b", sized(200.0));
    g.set_node("c", sized(50.0));

    let result = horizontal_compaction(
        &g,
        &layering(&[&["a"], &["b", "c"]]),
        &alignment(
            &[("a", "a"), ("b", "a"), ("c", "c")],
            &[("a", "b"), ("b", "a"), ("c", "c")],
        ),
        false,
    );

    assert_eq!(
        result,
        xs(&[("a", 0.0), ("b", 0.0), ("c", 200.0 / 2.0 + 75.0 + 50.0 / 2.0)])
    );
}

// ---- combining the four alignments ------------------------------------------------------------

#[test]
fn find_smallest_width_alignment_measures_node_extents() {
    let mut g = new_graph();
    g.set_node("a", sized(50.0));
    g.set_node("b", sized(100.0));
    let xss = vec![
        xs(&[("a", 0.0), ("b", 1000.0)]),
        xs(&[("a", -5.0), ("b", 1000.0)]),
        xs(&[("a", 5.0), ("b", 2000.0)]),
        xs(&[("a", 0.0), ("b", 200.0)]),
    ];

    assert_eq!(find_smallest_width_alignment(&g, &xss), Align::DR.index());
}

#[test]
fn align_coordinates_shifts_left_and_right_scans_differently() {
    let mut xss = vec![
        xs(&[("a", 50.0), ("b", 1000.0)]),
        xs(&[("a", 100.0), ("b", 900.0)]),
        xs(&[("a", 150.0), ("b", 800.0)]),
        xs(&[("a", 200.0), ("b", 700.0)]),
    ];

    align_coordinates(&mut xss, Align::UL.index());

    assert_eq!(
        xss,
        vec![
            xs(&[("a", 50.0), ("b", 1000.0)]),
            xs(&[("a", 200.0), ("b", 1000.0)]),
            xs(&[("a", 50.0), ("b", 700.0)]),
            xs(&[("a", 500.0), ("b", 1000.0)]),
        ]
    );
}

#[test]
fn balance_averages_the_two_medians() {
    let xss = vec![
        xs(&[("a", 0.0), ("b", 50.0)]),
        xs(&[("a", 20.0), ("b", 200.0)]),
        xs(&[("a", 30.0), ("b", 300.0)]),
        xs(&[("a", 100.0), ("b", 400.0)]),
    ];

    assert_eq!(balance(&xss, None), xs(&[("a", 25.0), ("b", 250.0)]));
}

#[test]
fn balance_uses_the_requested_alignment() {
    let xss = vec![
        xs(&[("a", 0.0)]),
        xs(&[("a", 20.0)]),
        xs(&[("a", 30.0)]),
        xs(&[("a", 100.0)]),
    ];

    assert_eq!(balance(&xss, Some(Align::UR)), xs(&[("a", 20.0)]));
    assert_eq!(balance(&xss, Some(Align::DR)), xs(&[("a", 100.0)]));
}

#[test]
fn position_x_keeps_a_straight_chain_vertical() {
    let mut g = new_graph();
    for (v, rank) in [("a", 0), ("b", 1), ("c", 2)] {
        g.set_node(
            v,
            LayoutNode {
                rank: Some(rank),
                order: Some(0),
                ..sized(40.0 + 10.0 * rank as f64)
            },
        );
    }
    g.set_path(&["a", "b", "c"]);

    let result = position_x(&g);

    assert_eq!(result["a"], result["b"]);
    assert_eq!(result["b"], result["c"]);
}
