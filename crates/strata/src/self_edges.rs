//! Self-loops take no part in ranking or ordering. They are parked on their node, come back as
//! one dummy each right after the node during positioning, and finally turn into a five-point
//! loop on the node's right side.

use crate::Point;
use crate::graphlib::EdgeKey;
use crate::layout_graph::{Dummy, LayoutGraph, LayoutNode, SelfEdge};
use crate::util;

pub fn remove_self_edges(g: &mut LayoutGraph) {
    let loops: Vec<EdgeKey> = g.edges().filter(|k| k.is_self_loop()).cloned().collect();
    for key in loops {
        let Some(label) = g.remove_edge(&key) else {
            continue;
        };
        if let Some(node) = g.node_mut(&key.v) {
            node.self_edges.push(SelfEdge { key, label });
        }
    }
}

/// Inserts a dummy per parked self-loop immediately after its node, shifting later nodes of the
/// rank to the right.
pub fn insert_self_edges(g: &mut LayoutGraph) {
    for layer in util::build_layer_matrix(g) {
        let mut order_shift = 0;
        for (i, v) in layer.iter().enumerate() {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            node.order = Some(i + order_shift);
            let rank = node.rank;
            let self_edges = std::mem::take(&mut node.self_edges);

            for self_edge in self_edges {
                order_shift += 1;
                let dummy = LayoutNode {
                    width: self_edge.label.width,
                    height: self_edge.label.height,
                    rank,
                    order: Some(i + order_shift),
                    edge_obj: Some(self_edge.key),
                    edge_label: Some(Box::new(self_edge.label)),
                    ..Default::default()
                };
                util::add_dummy_node(g, Dummy::SelfEdge, dummy, "_se");
            }
        }
    }
}

pub fn position_self_edges(g: &mut LayoutGraph) {
    for v in g.node_ids() {
        let Some(node) = g.node(&v).filter(|n| n.dummy == Some(Dummy::SelfEdge)) else {
            continue;
        };
        let (Some(key), Some(label)) = (node.edge_obj.clone(), node.edge_label.clone()) else {
            continue;
        };
        let (dummy_x, dummy_y) = (node.x, node.y);
        let Some(self_node) = g.node(&key.v) else {
            continue;
        };

        let x = self_node.x + self_node.width / 2.0;
        let y = self_node.y;
        let dx = dummy_x - x;
        let dy = self_node.height / 2.0;

        let mut label = *label;
        label.points = vec![
            Point::new(x + 2.0 * dx / 3.0, y - dy),
            Point::new(x + 5.0 * dx / 6.0, y - dy),
            Point::new(x + dx, y),
            Point::new(x + 5.0 * dx / 6.0, y + dy),
            Point::new(x + 2.0 * dx / 3.0, y + dy),
        ];
        label.x = Some(dummy_x);
        label.y = Some(dummy_y);

        g.remove_node(&v);
        g.set_edge_key(key, label);
    }
}
