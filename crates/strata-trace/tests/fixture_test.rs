use std::collections::BTreeMap;
use strata_trace::fixture::{EDGES, NODE_HEIGHT, NODE_WIDTH, NODES, complex_graph};
use strata_trace::report::{nodes_by_rank, render};

fn laid_out() -> strata::graphlib::Graph<strata::NodeLabel, strata::EdgeLabel, strata::GraphLabel> {
    let mut g = complex_graph();
    strata::layout(&mut g).unwrap();
    g
}

#[test]
fn fixture_matches_the_example_flowchart() {
    let g = complex_graph();

    assert!(g.is_multigraph());
    assert_eq!(g.node_ids(), NODES.map(|(id, _)| id).to_vec());
    assert_eq!(g.node("D").unwrap().label, "Error Handler");
    assert_eq!(g.edge_count(), EDGES.len());
    assert_eq!(
        g.edge("B", "C", None).unwrap().label.as_deref(),
        Some("valid")
    );
    assert_eq!(g.edge("A", "B", None).unwrap().label, None);
    assert!(
        g.node_entries()
            .all(|(_, n)| n.width == NODE_WIDTH && n.height == NODE_HEIGHT)
    );
}

#[test]
fn fixture_ranks_follow_the_longest_path_with_doubled_minlen() {
    let g = laid_out();

    let ranks: BTreeMap<&str, i32> = g
        .node_entries()
        .map(|(id, n)| (id, n.rank.unwrap()))
        .collect();
    let expected: BTreeMap<&str, i32> = [
        ("A", 0),
        ("B", 2),
        ("C", 4),
        ("D", 4),
        ("E", 6),
        ("F", 10),
        ("G", 6),
        ("H", 6),
        ("I", 8),
    ]
    .into();
    assert_eq!(ranks, expected);
}

#[test]
fn fixture_orders_increase_within_each_rank() {
    let g = laid_out();

    // Dummy nodes of long edges share the layers, so real nodes may skip slots.
    for (rank, nodes) in nodes_by_rank(&g) {
        let orders: Vec<usize> = nodes.iter().map(|n| n.order.unwrap()).collect();
        assert!(orders.windows(2).all(|w| w[0] < w[1]), "rank {rank}: {orders:?}");
    }

    let orders: BTreeMap<&str, usize> = g
        .node_entries()
        .map(|(id, n)| (id, n.order.unwrap()))
        .collect();
    let expected: BTreeMap<&str, usize> = [
        ("A", 0),
        ("B", 0),
        ("C", 0),
        ("D", 2),
        ("E", 0),
        ("F", 0),
        ("G", 1),
        ("H", 2),
        ("I", 1),
    ]
    .into();
    assert_eq!(orders, expected);
}

#[test]
fn fixture_report_matches_the_expected_layout() {
    let expected = "
=== Final node positions ===
  A (Input): x=55, y=15, rank=0, order=0
  B (Validate): x=25, y=95, rank=2, order=0
  C (Process): x=25, y=175, rank=4, order=0
  D (Error Handler): x=215, y=175, rank=4, order=2
  E (More Data?): x=55, y=255, rank=6, order=0
  F (Output): x=155, y=415, rank=10, order=0
  G (Log Error): x=165, y=255, rank=6, order=1
  H (Notify Admin): x=265, y=255, rank=6, order=2
  I (Cleanup): x=215, y=335, rank=8, order=1

=== Nodes by rank (sorted by order) ===
  rank 0: [A(Input)=0]
  rank 2: [B(Validate)=0]
  rank 4: [C(Process)=0, D(Error Handler)=2]
  rank 6: [E(More Data?)=0, G(Log Error)=1, H(Notify Admin)=2]
  rank 8: [I(Cleanup)=1]
  rank 10: [F(Output)=0]
";
    let g = laid_out();

    assert_eq!(render(&g), expected);
    assert_eq!(g.graph().width, Some(290.0));
}

#[test]
fn fixture_rows_are_evenly_spaced() {
    let g = laid_out();

    // Every odd rank holds only zero-height dummies, so a rank step is ranksep / 2 + 15.
    for (id, n) in g.node_entries() {
        let rank = f64::from(n.rank.unwrap());
        assert_eq!(n.y, Some(15.0 + 40.0 * rank), "node {id}");
    }
    assert_eq!(g.graph().height, Some(430.0));
}

#[test]
fn fixture_is_translated_to_the_origin() {
    let g = laid_out();

    let left = g
        .node_entries()
        .map(|(_, n)| n.x.unwrap() - n.width / 2.0)
        .fold(f64::INFINITY, f64::min);
    let right = g
        .node_entries()
        .map(|(_, n)| n.x.unwrap() + n.width / 2.0)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(left, 0.0);
    assert_eq!(g.graph().width, Some(right));
}

#[test]
fn fixture_same_rank_nodes_do_not_overlap() {
    let g = laid_out();

    for nodes in nodes_by_rank(&g).values() {
        for pair in nodes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                b.x.unwrap() - a.x.unwrap() >= NODE_WIDTH,
                "{} and {} overlap",
                a.id,
                b.id
            );
        }
    }
}

#[test]
fn fixture_restores_the_loop_edge_direction() {
    let g = laid_out();

    let back = g.edge("E", "A", None).unwrap();
    let e = g.node("E").unwrap();
    let a = g.node("A").unwrap();
    let first = back.points.first().unwrap();
    let last = back.points.last().unwrap();
    assert!(first.y <= e.y.unwrap() + NODE_HEIGHT / 2.0);
    assert!(first.y >= e.y.unwrap() - NODE_HEIGHT / 2.0);
    assert!(last.y >= a.y.unwrap() - NODE_HEIGHT / 2.0);
    assert!(last.y <= a.y.unwrap() + NODE_HEIGHT / 2.0);
}
