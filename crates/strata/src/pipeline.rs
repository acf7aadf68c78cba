//! The layout pipeline.
//!
//! Set `STRATA_LAYOUT_TIMING=1` to log how long each phase takes (at `info`).

use crate::error::{LayoutError, Result};
use crate::graphlib::{EdgeKey, Graph};
use crate::layout_graph::{self, Dummy, LayoutGraph, LayoutNode};
use crate::{
    EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point, acyclic, coordinate_system, nesting,
    normalize, order, position, rank, self_edges, util,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Largest `minlen` a single edge may ask for.
pub const MAX_MINLEN: u32 = 1 << 10;

/// Bound on the summed `minlen` of all edges, which bounds every rank the pipeline computes.
const MAX_TOTAL_MINLEN: u64 = 1 << 24;

/// Lays out `g` in place.
///
/// Every node gets `x`, `y` (its center), `rank` and `order`; every edge gets `points` and, if
/// its label has a size, the label center in `x`/`y`. The graph label gets the overall `width`
/// and `height`. The graph is left untouched when the input is rejected.
pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    validate(g)?;
    if g.node_count() == 0 {
        return Ok(());
    }

    debug!(nodes = g.node_count(), edges = g.edge_count(), "layout start");
    let mut layout_graph = layout_graph::build_layout_graph(g);
    run_layout(&mut layout_graph);
    layout_graph::update_input_graph(g, &layout_graph);
    debug!("layout done");
    Ok(())
}

fn validate(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let label = g.graph();
    for (field, value) in [
        ("nodesep", label.nodesep),
        ("ranksep", label.ranksep),
        ("edgesep", label.edgesep),
        ("marginx", label.marginx),
        ("marginy", label.marginy),
    ] {
        if !is_non_negative(value) {
            return Err(LayoutError::InvalidSpacing { field, value });
        }
    }

    for (v, node) in g.node_entries() {
        if !is_non_negative(node.width) || !is_non_negative(node.height) {
            return Err(LayoutError::InvalidNodeSize {
                node: v.to_string(),
                width: node.width,
                height: node.height,
            });
        }
    }

    let mut total_minlen: u64 = 0;
    for (key, edge) in g.edge_entries() {
        if !is_non_negative(edge.weight) {
            return Err(LayoutError::InvalidEdgeWeight {
                v: key.v.clone(),
                w: key.w.clone(),
                weight: edge.weight,
            });
        }
        total_minlen += u64::from(edge.minlen);
        if edge.minlen > MAX_MINLEN || total_minlen > MAX_TOTAL_MINLEN {
            return Err(LayoutError::InvalidMinlen {
                v: key.v.clone(),
                w: key.w.clone(),
                minlen: edge.minlen,
            });
        }
    }
    Ok(())
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

struct PhaseTimer {
    enabled: bool,
    phases: Vec<(&'static str, Duration)>,
}

impl PhaseTimer {
    fn from_env() -> Self {
        let enabled = std::env::var("STRATA_LAYOUT_TIMING")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            enabled,
            phases: Vec::new(),
        }
    }

    fn phase<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let start = self.enabled.then(Instant::now);
        let out = f();
        if let Some(start) = start {
            self.phases.push((name, start.elapsed()));
        }
        out
    }

    fn report(&self) {
        if !self.enabled {
            return;
        }
        let total: Duration = self.phases.iter().map(|(_, d)| *d).sum();
        for (name, elapsed) in &self.phases {
            info!(phase = *name, ?elapsed, "layout phase");
        }
        info!(?total, "layout total");
    }
}

pub fn run_layout(g: &mut LayoutGraph) {
    let mut timer = PhaseTimer::from_env();

    timer.phase("make_space_for_edge_labels", || make_space_for_edge_labels(g));
    timer.phase("remove_self_edges", || self_edges::remove_self_edges(g));
    timer.phase("acyclic", || acyclic::run(g));
    timer.phase("nesting_run", || nesting::run(g));
    timer.phase("rank", || rank::rank(g));
    timer.phase("inject_edge_label_proxies", || inject_edge_label_proxies(g));
    timer.phase("remove_empty_ranks", || util::remove_empty_ranks(g));
    timer.phase("nesting_cleanup", || nesting::cleanup(g));
    timer.phase("normalize_ranks", || util::normalize_ranks(g));
    timer.phase("remove_edge_label_proxies", || remove_edge_label_proxies(g));
    timer.phase("normalize", || normalize::run(g));
    timer.phase("order", || order::order(g));
    timer.phase("insert_self_edges", || self_edges::insert_self_edges(g));
    timer.phase("adjust_coordinate_system", || coordinate_system::adjust(g));
    timer.phase("position", || position::position(g));
    timer.phase("position_self_edges", || self_edges::position_self_edges(g));
    timer.phase("normalize_undo", || normalize::undo(g));
    timer.phase("fixup_edge_label_coords", || fixup_edge_label_coords(g));
    timer.phase("undo_coordinate_system", || coordinate_system::undo(g));
    timer.phase("translate_graph", || translate_graph(g));
    timer.phase("assign_node_intersects", || assign_node_intersects(g));
    timer.phase("reverse_points", || reverse_points_for_reversed_edges(g));
    timer.phase("acyclic_undo", || acyclic::undo(g));

    timer.report();
}

/// Doubles every `minlen` so edge labels can take the rank between two node ranks, halving
/// `ranksep` to keep the spacing unchanged. Labels not centered on their edge grow by
/// `labeloffset` across the edge.
fn make_space_for_edge_labels(g: &mut LayoutGraph) {
    let state = g.graph_mut();
    state.ranksep /= 2.0;
    let horizontal = state.rankdir.is_horizontal();

    for (_, edge) in g.edge_entries_mut() {
        edge.minlen = edge.minlen.saturating_mul(2);
        if edge.labelpos != LabelPos::C {
            if horizontal {
                edge.height += edge.labeloffset;
            } else {
                edge.width += edge.labeloffset;
            }
        }
    }
}

/// Records the rank halfway along each edge with a sized label as a temporary proxy node, so
/// rank compaction moves it together with the real nodes.
fn inject_edge_label_proxies(g: &mut LayoutGraph) {
    let proxies: Vec<(EdgeKey, i32)> = g
        .edge_entries()
        .filter(|(_, e)| e.width > 0.0 && e.height > 0.0)
        .filter_map(|(key, _)| {
            let v = g.node(&key.v)?.rank?;
            let w = g.node(&key.w)?.rank?;
            Some((key.clone(), (w - v) / 2 + v))
        })
        .collect();

    for (key, rank) in proxies {
        let proxy = LayoutNode {
            rank: Some(rank),
            edge_obj: Some(key),
            ..Default::default()
        };
        util::add_dummy_node(g, Dummy::EdgeProxy, proxy, "_ep");
    }
}

fn remove_edge_label_proxies(g: &mut LayoutGraph) {
    let proxies: Vec<String> = g
        .node_entries()
        .filter(|(_, n)| n.dummy == Some(Dummy::EdgeProxy))
        .map(|(v, _)| v.to_string())
        .collect();

    for v in proxies {
        let Some(proxy) = g.remove_node(&v) else {
            continue;
        };
        let Some(key) = proxy.edge_obj else {
            continue;
        };
        if let Some(edge) = g.edge_mut_by_key(&key) {
            edge.label_rank = proxy.rank;
        }
    }
}

/// Moves label centers from the middle of the label dummy to the side of the edge given by
/// `labelpos`, undoing the width added for the offset.
fn fixup_edge_label_coords(g: &mut LayoutGraph) {
    for (_, edge) in g.edge_entries_mut() {
        let Some(x) = edge.x.as_mut() else {
            continue;
        };
        if matches!(edge.labelpos, LabelPos::L | LabelPos::R) {
            edge.width -= edge.labeloffset;
        }
        match edge.labelpos {
            LabelPos::L => *x -= edge.width / 2.0 + edge.labeloffset,
            LabelPos::R => *x += edge.width / 2.0 + edge.labeloffset,
            LabelPos::C => {}
        }
    }
}

/// Shifts everything so the drawing starts at `(marginx, marginy)` and records its size.
fn translate_graph(g: &mut LayoutGraph) {
    let mut min_x = f64::INFINITY;
    let mut max_x: f64 = 0.0;
    let mut min_y = f64::INFINITY;
    let mut max_y: f64 = 0.0;
    let mut extend = |x: f64, y: f64, w: f64, h: f64| {
        min_x = min_x.min(x - w / 2.0);
        max_x = max_x.max(x + w / 2.0);
        min_y = min_y.min(y - h / 2.0);
        max_y = max_y.max(y + h / 2.0);
    };

    for (_, node) in g.node_entries() {
        extend(node.x, node.y, node.width, node.height);
    }
    for (_, edge) in g.edge_entries() {
        if let (Some(x), Some(y)) = (edge.x, edge.y) {
            extend(x, y, edge.width, edge.height);
        }
    }

    let state = g.graph();
    let (marginx, marginy) = (state.marginx, state.marginy);
    min_x -= marginx;
    min_y -= marginy;

    for (_, node) in g.node_entries_mut() {
        node.x -= min_x;
        node.y -= min_y;
    }
    for (_, edge) in g.edge_entries_mut() {
        for point in &mut edge.points {
            point.x -= min_x;
            point.y -= min_y;
        }
        if let Some(x) = edge.x.as_mut() {
            *x -= min_x;
        }
        if let Some(y) = edge.y.as_mut() {
            *y -= min_y;
        }
    }

    let state = g.graph_mut();
    state.width = max_x - min_x + marginx;
    state.height = max_y - min_y + marginy;
}

/// Adds the points where each edge leaves its tail and enters its head.
fn assign_node_intersects(g: &mut LayoutGraph) {
    for key in g.edge_keys() {
        let (Some(v), Some(w), Some(edge)) =
            (g.node(&key.v), g.node(&key.w), g.edge_by_key(&key))
        else {
            continue;
        };
        let (toward_v, toward_w) = match (edge.points.first(), edge.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => (Point::new(w.x, w.y), Point::new(v.x, v.y)),
        };
        let start = util::intersect_rect(v, toward_v);
        let end = util::intersect_rect(w, toward_w);

        if let Some(edge) = g.edge_mut_by_key(&key) {
            edge.points.insert(0, start);
            edge.points.push(end);
        }
    }
}

fn reverse_points_for_reversed_edges(g: &mut LayoutGraph) {
    for (_, edge) in g.edge_entries_mut() {
        if edge.reversed {
            edge.points.reverse();
        }
    }
}
