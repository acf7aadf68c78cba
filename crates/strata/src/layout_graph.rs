//! The working graph the pipeline mutates.
//!
//! Callers hand [`crate::layout`] a graph of public labels. The pipeline copies it into a
//! [`LayoutGraph`] whose labels also carry the bookkeeping each phase needs (dummy kinds,
//! reversed-edge names, self-loops parked on their node), then copies the results back.

use crate::graphlib::{EdgeKey, Graph, GraphOptions};
use crate::{Acyclicer, Align, EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point, RankDir, Ranker};

pub type LayoutGraph = Graph<LayoutNode, LayoutEdge, LayoutState>;

/// Kinds of nodes the pipeline inserts and later removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dummy {
    /// A segment of an edge that spans several ranks.
    Edge,
    /// The segment of a long edge that carries the edge label's box.
    EdgeLabel,
    /// Temporary marker recording the rank an edge label should sit on.
    EdgeProxy,
    /// Placeholder next to a node for one of its self-loops.
    SelfEdge,
    /// The nesting root that keeps ranking connected.
    Root,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub key: EdgeKey,
    pub label: LayoutEdge,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutNode {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub rank: Option<i32>,
    pub order: Option<usize>,

    pub dummy: Option<Dummy>,
    /// Only set on edge-label dummies.
    pub labelpos: Option<LabelPos>,
    /// The edge a dummy stands in for.
    pub edge_obj: Option<EdgeKey>,
    /// The original label of a normalized edge (head of its dummy chain) or of a self-loop.
    pub edge_label: Option<Box<LayoutEdge>>,
    pub self_edges: Vec<SelfEdge>,
}

impl LayoutNode {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub minlen: i32,
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub label_rank: Option<i32>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,

    pub reversed: bool,
    pub forward_name: Option<String>,
    pub nesting_edge: bool,
}

impl Default for LayoutEdge {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::R,
            labeloffset: 10.0,
            label_rank: None,
            x: None,
            y: None,
            points: Vec::new(),
            reversed: false,
            forward_name: None,
            nesting_edge: false,
        }
    }
}

impl LayoutEdge {
    pub fn new(minlen: i32, weight: f64) -> Self {
        Self {
            minlen,
            weight,
            ..Default::default()
        }
    }

    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub ranksep: f64,
    pub edgesep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub align: Option<Align>,
    pub ranker: Ranker,
    pub acyclicer: Acyclicer,

    pub width: f64,
    pub height: f64,

    pub nesting_root: Option<String>,
    pub node_rank_factor: i32,
    /// First dummy of every chain created by normalization.
    pub dummy_chains: Vec<String>,
    next_id: u64,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::from(&GraphLabel::default())
    }
}

impl From<&GraphLabel> for LayoutState {
    fn from(label: &GraphLabel) -> Self {
        Self {
            rankdir: label.rankdir,
            nodesep: label.nodesep,
            ranksep: label.ranksep,
            edgesep: label.edgesep,
            marginx: label.marginx,
            marginy: label.marginy,
            align: label.align,
            ranker: label.ranker,
            acyclicer: label.acyclicer,
            width: 0.0,
            height: 0.0,
            nesting_root: None,
            node_rank_factor: 1,
            dummy_chains: Vec::new(),
            next_id: 0,
        }
    }
}

impl LayoutState {
    /// Next id in a per-graph sequence, e.g. `_d3` or `rev7`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

/// Copies the caller's graph into a multigraph with working labels.
pub fn build_layout_graph(input: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> LayoutGraph {
    let mut g: LayoutGraph = Graph::new(GraphOptions::multigraph());
    g.set_graph(LayoutState::from(input.graph()));

    for (v, node) in input.node_entries() {
        g.set_node(v, LayoutNode::sized(node.width, node.height));
    }
    for (key, edge) in input.edge_entries() {
        g.set_edge_key(
            key.clone(),
            LayoutEdge {
                minlen: i32::try_from(edge.minlen).unwrap_or(i32::MAX),
                weight: edge.weight,
                width: edge.width,
                height: edge.height,
                labelpos: edge.labelpos,
                labeloffset: edge.labeloffset,
                ..Default::default()
            },
        );
    }
    g
}

/// Writes positions, ranks, orders, edge routes and the graph size back to the caller's graph.
pub fn update_input_graph(input: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, g: &LayoutGraph) {
    for (v, node) in input.node_entries_mut() {
        let Some(layout) = g.node(v) else {
            continue;
        };
        node.x = Some(layout.x);
        node.y = Some(layout.y);
        node.rank = layout.rank;
        node.order = layout.order;
    }

    for (key, edge) in input.edge_entries_mut() {
        let Some(layout) = g.edge_by_key(key) else {
            continue;
        };
        edge.points = layout.points.clone();
        edge.x = layout.x;
        edge.y = layout.y;
    }

    let state = g.graph();
    let label = input.graph_mut();
    label.width = Some(state.width);
    label.height = Some(state.height);
}
