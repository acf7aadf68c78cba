use crate::graphlib::Graph;
use crate::layout_graph::LayoutGraph;

/// Which neighbors of a rank feed its barycenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Predecessors on the rank above (downward sweep).
    InEdges,
    /// Successors on the rank below (upward sweep).
    OutEdges,
}

/// One rank of the layout graph together with the edges to its fixed neighbor rank.
#[derive(Debug, Clone)]
pub struct LayerGraph {
    pub rank: i32,
    /// Nodes on `rank`, in graph order.
    pub movable: Vec<String>,
    /// Edges `u -> v` from a neighbor `u` to a movable `v`; parallel edges are merged and their
    /// weights summed. Points toward `v` for both relationships.
    pub edges: Graph<(), f64, ()>,
}

pub fn build_layer_graph(g: &LayoutGraph, rank: i32, relationship: Relationship) -> LayerGraph {
    let mut movable = Vec::new();
    let mut edges: Graph<(), f64, ()> = Graph::default();

    for (v, node) in g.node_entries() {
        if node.rank != Some(rank) {
            continue;
        }
        movable.push(v.to_string());
        edges.ensure_node(v);

        let incident = match relationship {
            Relationship::InEdges => g.in_edges(v),
            Relationship::OutEdges => g.out_edges(v),
        };
        for key in incident {
            let u = key.other(v);
            let weight = g.edge_by_key(&key).map_or(0.0, |e| e.weight);
            let prev = edges.edge(u, v, None).copied().unwrap_or(0.0);
            edges.set_edge(u, v, prev + weight);
        }
    }

    LayerGraph {
        rank,
        movable,
        edges,
    }
}

pub fn build_layer_graphs(
    g: &LayoutGraph,
    ranks: impl IntoIterator<Item = i32>,
    relationship: Relationship,
) -> Vec<LayerGraph> {
    ranks
        .into_iter()
        .map(|rank| build_layer_graph(g, rank, relationship))
        .collect()
}
