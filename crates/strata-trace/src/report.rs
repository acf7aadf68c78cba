//! Text and JSON views of a laid-out graph.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use strata::graphlib::Graph;
use strata::{EdgeLabel, GraphLabel, NodeLabel, Point};

type LaidOut = Graph<NodeLabel, EdgeLabel, GraphLabel>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: String,
    pub label: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: f64,
    pub height: f64,
    pub rank: Option<i32>,
    pub order: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRoute {
    pub v: String,
    pub w: String,
    pub name: Option<String>,
    pub label: Option<String>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub nodes: Vec<NodePosition>,
    pub edges: Vec<EdgeRoute>,
}

/// Every node in graph insertion order.
pub fn positions(g: &LaidOut) -> Vec<NodePosition> {
    g.node_entries()
        .map(|(id, n)| NodePosition {
            id: id.to_string(),
            label: n.label.clone(),
            x: n.x,
            y: n.y,
            width: n.width,
            height: n.height,
            rank: n.rank,
            order: n.order,
        })
        .collect()
}

/// Ranked nodes grouped by rank (ascending), each group sorted by order. Nodes without a rank
/// are left out; nodes without an order sort last within their rank.
pub fn nodes_by_rank(g: &LaidOut) -> BTreeMap<i32, Vec<NodePosition>> {
    let mut by_rank: BTreeMap<i32, Vec<NodePosition>> = BTreeMap::new();
    for node in positions(g) {
        if let Some(rank) = node.rank {
            by_rank.entry(rank).or_default().push(node);
        }
    }
    for nodes in by_rank.values_mut() {
        nodes.sort_by_key(|n| n.order.unwrap_or(usize::MAX));
    }
    by_rank
}

struct Maybe<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("-"),
        }
    }
}

/// The text report: node positions in insertion order, then nodes grouped by rank.
pub struct Report<'a>(pub &'a LaidOut);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.0;
        writeln!(f)?;
        writeln!(f, "=== Final node positions ===")?;
        for n in positions(g) {
            writeln!(
                f,
                "  {} ({}): x={}, y={}, rank={}, order={}",
                n.id,
                n.label,
                Maybe(n.x),
                Maybe(n.y),
                Maybe(n.rank),
                Maybe(n.order)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "=== Nodes by rank (sorted by order) ===")?;
        for (rank, nodes) in nodes_by_rank(g) {
            let names: Vec<String> = nodes
                .iter()
                .map(|n| format!("{}({})={}", n.id, n.label, Maybe(n.order)))
                .collect();
            writeln!(f, "  rank {rank}: [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

pub fn render(g: &LaidOut) -> String {
    Report(g).to_string()
}

pub fn snapshot(g: &LaidOut) -> Snapshot {
    let edges = g
        .edge_entries()
        .map(|(key, e)| EdgeRoute {
            v: key.v.clone(),
            w: key.w.clone(),
            name: key.name.clone(),
            label: e.label.clone(),
            points: e.points.clone(),
        })
        .collect();
    Snapshot {
        width: g.graph().width,
        height: g.graph().height,
        nodes: positions(g),
        edges,
    }
}
