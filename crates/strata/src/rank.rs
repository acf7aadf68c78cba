//! Rank assignment.
//!
//! Ranking runs on a simplified copy of the layout graph: parallel edges collapse into one with
//! summed weight and the largest `minlen`. The chosen ranker writes `rank` on every node of the
//! copy and the ranks are then copied back.

pub mod feasible_tree;
pub mod network_simplex;
pub mod util;

use crate::Ranker;
use crate::graphlib::{Graph, GraphOptions};
use crate::layout_graph::LayoutGraph;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankNode {
    pub rank: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankEdge {
    pub weight: f64,
    pub minlen: i32,
}

impl Default for RankEdge {
    fn default() -> Self {
        Self {
            weight: 1.0,
            minlen: 1,
        }
    }
}

impl RankEdge {
    pub fn new(minlen: i32, weight: f64) -> Self {
        Self { weight, minlen }
    }
}

pub type RankGraph = Graph<RankNode, RankEdge, ()>;

/// Collapses parallel edges of `g` into a simple directed graph.
pub fn simplify(g: &LayoutGraph) -> RankGraph {
    let mut simplified: RankGraph = Graph::new(GraphOptions::default());
    for v in g.nodes() {
        simplified.set_node(v, RankNode::default());
    }
    for (key, edge) in g.edge_entries() {
        let merged = match simplified.edge(&key.v, &key.w, None) {
            Some(prev) => RankEdge::new(prev.minlen.max(edge.minlen), prev.weight + edge.weight),
            None => RankEdge::new(edge.minlen, edge.weight),
        };
        simplified.set_edge(key.v.clone(), key.w.clone(), merged);
    }
    simplified
}

pub fn run(g: &mut RankGraph, ranker: Ranker) {
    match ranker {
        Ranker::NetworkSimplex => network_simplex::network_simplex(g),
        Ranker::TightTree => {
            util::longest_path(g);
            feasible_tree::feasible_tree(g);
        }
        Ranker::LongestPath => util::longest_path(g),
    }
}

/// Assigns `rank` to every node of the layout graph.
pub fn rank(g: &mut LayoutGraph) {
    let mut simplified = simplify(g);
    run(&mut simplified, g.graph().ranker);
    for (v, node) in simplified.node_entries() {
        if let Some(label) = g.node_mut(v) {
            label.rank = Some(node.rank);
        }
    }
}
