//! Splits edges that span several ranks into chains of unit-length edges through dummy nodes,
//! and folds the chains back into edge routes after positioning.

use crate::Point;
use crate::graphlib::EdgeKey;
use crate::layout_graph::{Dummy, LayoutEdge, LayoutGraph, LayoutNode};
use crate::util::add_dummy_node;

pub fn run(g: &mut LayoutGraph) {
    g.graph_mut().dummy_chains.clear();
    for key in g.edge_keys() {
        normalize_edge(g, key);
    }
}

fn normalize_edge(g: &mut LayoutGraph, key: EdgeKey) {
    let Some(mut v_rank) = g.node(&key.v).and_then(|n| n.rank) else {
        return;
    };
    let Some(w_rank) = g.node(&key.w).and_then(|n| n.rank) else {
        return;
    };
    // Unit-length edges stay as they are.
    if w_rank <= v_rank + 1 {
        return;
    }
    let Some(mut edge_label) = g.remove_edge(&key) else {
        return;
    };
    edge_label.points.clear();
    let weight = edge_label.weight;
    let label_rank = edge_label.label_rank;

    let mut v = key.v.clone();
    let mut head: Option<String> = None;
    v_rank += 1;
    while v_rank < w_rank {
        let mut node = LayoutNode {
            rank: Some(v_rank),
            edge_obj: Some(key.clone()),
            ..Default::default()
        };
        let kind = if label_rank == Some(v_rank) {
            node.width = edge_label.width;
            node.height = edge_label.height;
            node.labelpos = Some(edge_label.labelpos);
            Dummy::EdgeLabel
        } else {
            Dummy::Edge
        };
        let dummy = add_dummy_node(g, kind, node, "_d");
        g.set_edge_named(
            v,
            dummy.clone(),
            key.name.clone(),
            LayoutEdge::with_weight(weight),
        );
        if head.is_none() {
            head = Some(dummy.clone());
        }
        v = dummy;
        v_rank += 1;
    }
    g.set_edge_named(v, key.w.clone(), key.name.clone(), LayoutEdge::with_weight(weight));

    let Some(head) = head else {
        return;
    };
    if let Some(node) = g.node_mut(&head) {
        node.edge_label = Some(Box::new(edge_label));
    }
    g.graph_mut().dummy_chains.push(head);
}

/// Replaces every dummy chain with its original edge, whose `points` become the dummy
/// positions. The edge-label dummy also provides the label's center and size.
pub fn undo(g: &mut LayoutGraph) {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    for head in chains {
        let Some(first) = g.node(&head) else {
            continue;
        };
        let (Some(key), Some(label)) = (first.edge_obj.clone(), first.edge_label.clone()) else {
            continue;
        };
        let mut label = *label;

        let mut v = head;
        while let Some(node) = g.node(&v).filter(|n| n.is_dummy()).cloned() {
            let next = g.successors(&v).first().map(|w| w.to_string());
            g.remove_node(&v);
            label.points.push(Point::new(node.x, node.y));
            if node.dummy == Some(Dummy::EdgeLabel) {
                label.x = Some(node.x);
                label.y = Some(node.y);
                label.width = node.width;
                label.height = node.height;
            }
            let Some(next) = next else {
                break;
            };
            v = next;
        }
        g.set_edge_key(key, label);
    }
}
