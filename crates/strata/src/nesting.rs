//! Nesting root for ranking.
//!
//! Without clusters the nesting graph reduces to one dummy root with a zero-weight edge to every
//! node, which keeps disconnected components in a single spanning tree during ranking.

use crate::graphlib::EdgeKey;
use crate::layout_graph::{Dummy, LayoutEdge, LayoutGraph, LayoutNode};
use crate::util;

pub fn run(g: &mut LayoutGraph) {
    let nodes = g.node_ids();
    let root = util::add_dummy_node(g, Dummy::Root, LayoutNode::default(), "_root");

    // Tree height is zero when no node has children, so the separation factor is 1.
    let node_sep = 1;
    for (_, edge) in g.edge_entries_mut() {
        edge.minlen *= node_sep;
    }

    for v in nodes {
        g.set_edge(
            root.clone(),
            v,
            LayoutEdge {
                nesting_edge: true,
                ..LayoutEdge::new(node_sep, 0.0)
            },
        );
    }

    let state = g.graph_mut();
    state.nesting_root = Some(root);
    state.node_rank_factor = node_sep;
}

pub fn cleanup(g: &mut LayoutGraph) {
    if let Some(root) = g.graph_mut().nesting_root.take() {
        g.remove_node(&root);
    }
    let nesting: Vec<EdgeKey> = g
        .edge_entries()
        .filter(|(_, e)| e.nesting_edge)
        .map(|(k, _)| k.clone())
        .collect();
    for key in nesting {
        g.remove_edge(&key);
    }
}
