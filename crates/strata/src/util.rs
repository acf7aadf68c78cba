use crate::Point;
use crate::layout_graph::{Dummy, LayoutGraph, LayoutNode};
use rustc_hash::FxHashMap;

/// Inserts a dummy node under a fresh id (`prefix` plus a per-graph counter) and returns the id.
pub fn add_dummy_node(g: &mut LayoutGraph, kind: Dummy, mut node: LayoutNode, prefix: &str) -> String {
    let mut id = g.graph_mut().next_id(prefix);
    while g.has_node(&id) {
        id = g.graph_mut().next_id(prefix);
    }
    node.dummy = Some(kind);
    g.set_node(id.clone(), node);
    id
}

pub fn max_rank(g: &LayoutGraph) -> Option<i32> {
    g.node_entries().filter_map(|(_, n)| n.rank).max()
}

/// Node ids grouped by rank, each layer sorted by `order`. Nodes without a rank are skipped;
/// nodes without an order sort after the ordered ones in graph order.
pub fn build_layer_matrix(g: &LayoutGraph) -> Vec<Vec<String>> {
    let Some(max) = max_rank(g) else {
        return Vec::new();
    };
    let len = usize::try_from(max).map(|m| m + 1).unwrap_or(0);
    let mut layers: Vec<Vec<(usize, &str)>> = vec![Vec::new(); len];
    for (v, node) in g.node_entries() {
        let Some(rank) = node.rank.and_then(|r| usize::try_from(r).ok()) else {
            continue;
        };
        layers[rank].push((node.order.unwrap_or(usize::MAX), v));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(order, _)| *order);
            layer.into_iter().map(|(_, v)| v.to_string()).collect()
        })
        .collect()
}

/// Shifts ranks so the smallest one is 0.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let Some(min) = g.node_entries().filter_map(|(_, n)| n.rank).min() else {
        return;
    };
    for (_, node) in g.node_entries_mut() {
        if let Some(rank) = node.rank.as_mut() {
            *rank -= min;
        }
    }
}

/// Drops empty ranks that are not a multiple of the nesting rank factor.
pub fn remove_empty_ranks(g: &mut LayoutGraph) {
    let Some(offset) = g.node_entries().filter_map(|(_, n)| n.rank).min() else {
        return;
    };
    let factor = g.graph().node_rank_factor.max(1);

    let mut layers: FxHashMap<i32, Vec<String>> = FxHashMap::default();
    let mut top = 0;
    for (v, node) in g.node_entries() {
        let Some(rank) = node.rank else {
            continue;
        };
        top = top.max(rank - offset);
        layers.entry(rank - offset).or_default().push(v.to_string());
    }

    let mut delta = 0;
    for i in 0..=top {
        match layers.get(&i) {
            None if i % factor != 0 => delta -= 1,
            Some(vs) if delta != 0 => {
                for v in vs {
                    if let Some(rank) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
                        *rank += delta;
                    }
                }
            }
            _ => {}
        }
    }
}

/// Where the segment from the center of `rect` toward `point` leaves the rectangle.
///
/// A point at the center has no defined exit; the center itself is returned.
pub fn intersect_rect(rect: &LayoutNode, point: Point) -> Point {
    let (x, y) = (rect.x, rect.y);
    let dx = point.x - x;
    let dy = point.y - y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        return Point::new(x, y);
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };
    Point::new(x + sx, y + sy)
}
