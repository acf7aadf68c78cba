//! Within-rank ordering to reduce edge crossings.
//!
//! Starts from a DFS-based layering, then alternates downward sweeps (each rank ordered by the
//! barycenter of its predecessors) with upward sweeps (by successors), flipping the tie-break
//! bias every two sweeps. The layering with the fewest weighted crossings wins; the search stops
//! once four sweeps in a row, counting the last improving one, have not produced a new best.

pub mod barycenter;
pub mod cross_count;
pub mod init_order;
pub mod layer_graph;
pub mod resolve_conflicts;
pub mod sort;

use crate::graphlib::Graph;
use crate::layout_graph::LayoutGraph;
use crate::util;
use layer_graph::{LayerGraph, Relationship, build_layer_graphs};
use sort::SortResult;
use tracing::debug;

pub use cross_count::cross_count;
pub use init_order::init_order;

/// Ordering constraints between nodes of one rank (`v` must precede `w`).
pub type ConstraintGraph = Graph<(), (), ()>;

pub fn order(g: &mut LayoutGraph) {
    let Some(max_rank) = util::max_rank(g) else {
        return;
    };
    let down_layer_graphs = build_layer_graphs(g, 1..=max_rank, Relationship::InEdges);
    let up_layer_graphs = build_layer_graphs(g, (0..max_rank).rev(), Relationship::OutEdges);

    let layering = init_order(g);
    debug!(?layering, "initial order");
    assign_order(g, &layering);

    let mut best_cc = f64::INFINITY;
    let mut best = layering;
    let mut sweep = 0usize;
    let mut last_best = 0usize;
    while last_best < 4 {
        let downward = sweep % 2 == 1;
        let bias_right = sweep % 4 >= 2;
        let layer_graphs = if downward {
            &down_layer_graphs
        } else {
            &up_layer_graphs
        };
        sweep_layer_graphs(g, layer_graphs, bias_right);

        let layering = util::build_layer_matrix(g);
        let cc = cross_count(g, &layering);
        let improved = cc < best_cc;
        debug!(
            sweep,
            direction = if downward { "down" } else { "up" },
            bias_right,
            crossings = cc,
            improved,
            "order sweep"
        );
        if improved {
            last_best = 0;
            best = layering;
            best_cc = cc;
        }
        sweep += 1;
        last_best += 1;
    }

    debug!(crossings = best_cc, layering = ?best, "final order");
    assign_order(g, &best);
}

/// Orders the movable nodes of one layer graph by barycenter.
pub fn sort_layer(
    lg: &LayerGraph,
    cg: &ConstraintGraph,
    bias_right: bool,
    order_of: impl Fn(&str) -> Option<usize>,
) -> SortResult {
    let barycenters = barycenter::barycenter(&lg.edges, &lg.movable, order_of);
    let entries = resolve_conflicts::resolve_conflicts(&barycenters, cg);
    sort::sort(entries, bias_right)
}

fn sweep_layer_graphs(g: &mut LayoutGraph, layer_graphs: &[LayerGraph], bias_right: bool) {
    let cg = ConstraintGraph::default();
    for lg in layer_graphs {
        let sorted = sort_layer(lg, &cg, bias_right, |v| g.node(v).and_then(|n| n.order));
        for (i, v) in sorted.vs.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}
