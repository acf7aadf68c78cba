//! Tight spanning tree construction.
//!
//! Grows a tree of tight edges (slack 0) from the first node. When the tree stalls, the
//! non-tree edge with the smallest slack that touches it is made tight by shifting every tree
//! node's rank, and growth resumes.

use super::RankGraph;
use super::util::slack;
use crate::graphlib::{EdgeKey, Graph, GraphOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub low: usize,
    pub lim: usize,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TreeEdge {
    pub cutvalue: f64,
}

/// Undirected spanning tree over the nodes of a [`RankGraph`].
pub type TreeGraph = Graph<TreeNode, TreeEdge, ()>;

pub fn feasible_tree(g: &mut RankGraph) -> TreeGraph {
    let mut t: TreeGraph = Graph::new(GraphOptions::undirected());
    let Some(start) = g.nodes().next().map(str::to_string) else {
        return t;
    };
    let size = g.node_count();
    t.set_node(start, TreeNode::default());

    while tight_tree(&mut t, g) < size {
        // Only a disconnected graph has no edge leaving the tree.
        let Some(edge) = find_min_slack_edge(&t, g) else {
            break;
        };
        let delta = if t.has_node(&edge.v) {
            slack(g, &edge)
        } else {
            -slack(g, &edge)
        };
        for v in t.nodes() {
            if let Some(node) = g.node_mut(v) {
                node.rank += delta;
            }
        }
    }
    t
}

/// Extends `t` along tight edges and returns its size.
fn tight_tree(t: &mut TreeGraph, g: &RankGraph) -> usize {
    fn dfs(t: &mut TreeGraph, g: &RankGraph, v: &str) {
        for key in g.node_edges(v) {
            let w = key.other(v);
            if !t.has_node(w) && slack(g, &key) == 0 {
                t.set_node(w, TreeNode::default());
                t.set_edge(v, w, TreeEdge::default());
                dfs(t, g, w);
            }
        }
    }

    for v in t.node_ids() {
        dfs(t, g, &v);
    }
    t.node_count()
}

/// The first edge with exactly one endpoint in the tree and the smallest slack.
fn find_min_slack_edge(t: &TreeGraph, g: &RankGraph) -> Option<EdgeKey> {
    let mut best: Option<(i32, &EdgeKey)> = None;
    for key in g.edges() {
        if t.has_node(&key.v) == t.has_node(&key.w) {
            continue;
        }
        let s = slack(g, key);
        if best.is_none_or(|(min, _)| s < min) {
            best = Some((s, key));
        }
    }
    best.map(|(_, key)| key.clone())
}
