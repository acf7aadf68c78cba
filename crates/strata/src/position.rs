//! Coordinate assignment: `y` per rank, `x` via Brandes-Köpf.

pub mod bk;

use crate::layout_graph::LayoutGraph;
use crate::util;

pub fn position(g: &mut LayoutGraph) {
    position_y(g);
    for (v, x) in bk::position_x(g) {
        if let Some(node) = g.node_mut(&v) {
            node.x = x;
        }
    }
}

/// Centers every rank on a row as tall as its tallest node, rows separated by `ranksep`.
pub fn position_y(g: &mut LayoutGraph) {
    let ranksep = g.graph().ranksep;
    let mut prev_y = 0.0;
    for layer in util::build_layer_matrix(g) {
        let max_height = layer
            .iter()
            .filter_map(|v| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        for v in &layer {
            if let Some(node) = g.node_mut(v) {
                node.y = prev_y + max_height / 2.0;
            }
        }
        prev_y += max_height + ranksep;
    }
}
