//! Layout runs top-to-bottom internally. `adjust` rotates node sizes for left/right layouts
//! before positioning; `undo` maps coordinates back into the requested direction.

use crate::RankDir;
use crate::layout_graph::LayoutGraph;

pub fn adjust(g: &mut LayoutGraph) {
    if g.graph().rankdir.is_horizontal() {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut LayoutGraph) {
    let rankdir = g.graph().rankdir;
    if matches!(rankdir, RankDir::BT | RankDir::RL) {
        reverse_y(g);
    }
    if rankdir.is_horizontal() {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    for (_, node) in g.node_entries_mut() {
        std::mem::swap(&mut node.width, &mut node.height);
    }
    for (_, edge) in g.edge_entries_mut() {
        std::mem::swap(&mut edge.width, &mut edge.height);
    }
}

fn reverse_y(g: &mut LayoutGraph) {
    for (_, node) in g.node_entries_mut() {
        node.y = -node.y;
    }
    for (_, edge) in g.edge_entries_mut() {
        for point in &mut edge.points {
            point.y = -point.y;
        }
        if let Some(y) = edge.y.as_mut() {
            *y = -*y;
        }
    }
}

fn swap_xy(g: &mut LayoutGraph) {
    for (_, node) in g.node_entries_mut() {
        std::mem::swap(&mut node.x, &mut node.y);
    }
    for (_, edge) in g.edge_entries_mut() {
        for point in &mut edge.points {
            std::mem::swap(&mut point.x, &mut point.y);
        }
        if let (Some(x), Some(y)) = (edge.x.as_mut(), edge.y.as_mut()) {
            std::mem::swap(x, y);
        }
    }
}
