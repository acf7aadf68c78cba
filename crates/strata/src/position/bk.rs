//! Brandes-Köpf horizontal coordinate assignment ("Fast and Simple Horizontal Coordinate
//! Assignment").
//!
//! Four passes align nodes into vertical blocks (up/down neighbors, scanned left/right), compact
//! each block graph, and the results are aligned to the narrowest pass and balanced.

use crate::graphlib::Graph;
use crate::layout_graph::LayoutGraph;
use crate::{Align, LabelPos};
use rustc_hash::{FxHashMap, FxHashSet};

pub type Conflicts = FxHashMap<String, FxHashSet<String>>;
pub type Xs = FxHashMap<String, f64>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    /// Block root of every node.
    pub root: FxHashMap<String, String>,
    /// Next node of the same block, cycling back to the root.
    pub align: FxHashMap<String, String>,
}

pub fn position_x(g: &LayoutGraph) -> Xs {
    let layering = crate::util::build_layer_matrix(g);
    let conflicts = find_type1_conflicts(g, &layering);

    let mut xss: Vec<Xs> = Vec::with_capacity(4);
    for up in [true, false] {
        let mut adjusted: Vec<Vec<String>> = if up {
            layering.clone()
        } else {
            layering.iter().rev().cloned().collect()
        };
        for right in [false, true] {
            if right {
                adjusted = adjusted
                    .iter()
                    .map(|layer| layer.iter().rev().cloned().collect())
                    .collect();
            }
            let neighbors = |v: &str| -> Vec<String> {
                let ws = if up {
                    g.predecessors(v)
                } else {
                    g.successors(v)
                };
                ws.into_iter().map(str::to_string).collect()
            };
            let alignment = vertical_alignment(&adjusted, &conflicts, neighbors);
            let mut xs = horizontal_compaction(g, &adjusted, &alignment, right);
            if right {
                for x in xs.values_mut() {
                    *x = -*x;
                }
            }
            xss.push(xs);
        }
    }

    let smallest = find_smallest_width_alignment(g, &xss);
    align_coordinates(&mut xss, smallest);
    balance(&xss, g.graph().align)
}

/// Type-1 conflicts: a non-inner segment crossing an inner segment (one between two dummies).
/// Inner segments win so long edges stay straight.
pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Vec<String>]) -> Conflicts {
    let mut conflicts = Conflicts::default();
    let order = |v: &str| g.node(v).and_then(|n| n.order).unwrap_or(0);
    let is_dummy = |v: &str| g.node(v).is_some_and(|n| n.is_dummy());

    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);
        let mut k0 = 0;
        let mut scan_pos = 0;
        let Some(last_node) = layer.last() else {
            continue;
        };

        for (i, v) in layer.iter().enumerate() {
            let w = find_other_inner_segment_node(g, v);
            let k1 = w.map_or(prev_layer.len(), order);
            if w.is_none() && v != last_node {
                continue;
            }
            for scan_node in &layer[scan_pos..=i] {
                for u in g.predecessors(scan_node) {
                    let u_pos = order(u);
                    if (u_pos < k0 || k1 < u_pos) && !(is_dummy(u) && is_dummy(scan_node)) {
                        add_conflict(&mut conflicts, u, scan_node);
                    }
                }
            }
            scan_pos = i + 1;
            k0 = k1;
        }
    }
    conflicts
}

fn find_other_inner_segment_node<'a>(g: &'a LayoutGraph, v: &str) -> Option<&'a str> {
    if !g.node(v).is_some_and(|n| n.is_dummy()) {
        return None;
    }
    g.predecessors(v)
        .into_iter()
        .find(|u| g.node(u).is_some_and(|n| n.is_dummy()))
}

pub fn add_conflict(conflicts: &mut Conflicts, v: &str, w: &str) {
    let (v, w) = if v > w { (w, v) } else { (v, w) };
    conflicts
        .entry(v.to_string())
        .or_default()
        .insert(w.to_string());
}

pub fn has_conflict(conflicts: &Conflicts, v: &str, w: &str) -> bool {
    let (v, w) = if v > w { (w, v) } else { (v, w) };
    conflicts.get(v).is_some_and(|ws| ws.contains(w))
}

/// Groups nodes into blocks by aligning each node with its median neighbor(s) in the previous
/// layer, skipping conflicting or crossing alignments.
pub fn vertical_alignment(
    layering: &[Vec<String>],
    conflicts: &Conflicts,
    neighbors: impl Fn(&str) -> Vec<String>,
) -> Alignment {
    let mut root: FxHashMap<String, String> = FxHashMap::default();
    let mut align: FxHashMap<String, String> = FxHashMap::default();
    let mut pos: FxHashMap<String, usize> = FxHashMap::default();
    for layer in layering {
        for (order, v) in layer.iter().enumerate() {
            root.insert(v.clone(), v.clone());
            align.insert(v.clone(), v.clone());
            pos.insert(v.clone(), order);
        }
    }

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for v in layer {
            let mut ws = neighbors(v);
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|w| pos.get(w).copied().unwrap_or(0));
            let (lo, hi) = ((ws.len() - 1) / 2, ws.len() / 2);
            for w in &ws[lo..=hi] {
                let w_pos = pos.get(w).copied().unwrap_or(0);
                let unaligned = align.get(v) == Some(v);
                if unaligned
                    && prev_idx.is_none_or(|p| p < w_pos)
                    && !has_conflict(conflicts, v, w)
                {
                    let w_root = root.get(w).cloned().unwrap_or_else(|| w.clone());
                    align.insert(w.clone(), v.clone());
                    align.insert(v.clone(), w_root.clone());
                    root.insert(v.clone(), w_root);
                    prev_idx = Some(w_pos);
                }
            }
        }
    }

    Alignment { root, align }
}

/// Places blocks as far left as their separation constraints allow, then pulls each block
/// right toward its successors where there is room.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<String>],
    alignment: &Alignment,
    reverse_sep: bool,
) -> Xs {
    let block_g = build_block_graph(g, layering, &alignment.root, reverse_sep);
    let mut xs = Xs::default();

    for elem in finish_order(&block_g, |v| block_g.predecessors(v)) {
        let x = block_g.in_edges(&elem).iter().fold(0.0, |acc: f64, key| {
            let sep = block_g.edge_by_key(key).copied().unwrap_or(0.0);
            acc.max(xs.get(&key.v).copied().unwrap_or(0.0) + sep)
        });
        xs.insert(elem, x);
    }

    for elem in finish_order(&block_g, |v| block_g.successors(v)) {
        let min = block_g.out_edges(&elem).iter().fold(f64::INFINITY, |acc, key| {
            let sep = block_g.edge_by_key(key).copied().unwrap_or(0.0);
            acc.min(xs.get(&key.w).copied().unwrap_or(0.0) - sep)
        });
        if min.is_finite() {
            let x = xs.entry(elem).or_insert(0.0);
            *x = (*x).max(min);
        }
    }

    for v in alignment.align.keys() {
        let root = alignment.root.get(v).unwrap_or(v);
        let x = xs.get(root).copied().unwrap_or(0.0);
        xs.insert(v.clone(), x);
    }
    xs
}

/// The order in which a stack-driven walk finishes nodes: each node is finished after the nodes
/// returned by `next` for it.
fn finish_order<'a>(
    block_g: &'a Graph<(), f64, ()>,
    next: impl Fn(&str) -> Vec<&'a str>,
) -> Vec<String> {
    let mut stack: Vec<&str> = block_g.nodes().collect();
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut finished = Vec::new();
    while let Some(elem) = stack.pop() {
        if visited.contains(elem) {
            finished.push(elem.to_string());
        } else {
            visited.insert(elem);
            stack.push(elem);
            stack.extend(next(elem));
        }
    }
    finished
}

/// One node per block root; an edge between the roots of horizontally adjacent nodes, weighted
/// by the largest separation they require.
fn build_block_graph(
    g: &LayoutGraph,
    layering: &[Vec<String>],
    root: &FxHashMap<String, String>,
    reverse_sep: bool,
) -> Graph<(), f64, ()> {
    let state = g.graph();
    let mut block_g: Graph<(), f64, ()> = Graph::default();
    for layer in layering {
        let mut u: Option<&str> = None;
        for v in layer {
            let v_root = root.get(v).unwrap_or(v);
            block_g.ensure_node(v_root.as_str());
            if let Some(u) = u {
                let u_root = root.get(u).map_or(u, String::as_str);
                let prev = block_g
                    .edge(u_root, v_root, None)
                    .copied()
                    .unwrap_or(0.0);
                let gap = sep(g, state.nodesep, state.edgesep, reverse_sep, v, u);
                block_g.set_edge(u_root, v_root.as_str(), gap.max(prev));
            }
            u = Some(v.as_str());
        }
    }
    block_g
}

/// Minimum center-to-center distance between `v` and its left neighbor `w`.
fn sep(g: &LayoutGraph, nodesep: f64, edgesep: f64, reverse_sep: bool, v: &str, w: &str) -> f64 {
    let (Some(v_label), Some(w_label)) = (g.node(v), g.node(w)) else {
        return 0.0;
    };
    let spacing = |dummy: bool| if dummy { edgesep } else { nodesep };
    let flip = |delta: f64| if reverse_sep { delta } else { -delta };

    let mut sum = v_label.width / 2.0;
    sum += match v_label.labelpos {
        Some(LabelPos::L) => flip(-v_label.width / 2.0),
        Some(LabelPos::R) => flip(v_label.width / 2.0),
        _ => 0.0,
    };
    sum += spacing(v_label.is_dummy()) / 2.0;
    sum += spacing(w_label.is_dummy()) / 2.0;
    sum += w_label.width / 2.0;
    sum += match w_label.labelpos {
        Some(LabelPos::L) => flip(w_label.width / 2.0),
        Some(LabelPos::R) => flip(-w_label.width / 2.0),
        _ => 0.0,
    };
    sum
}

/// Index of the alignment with the smallest total width; the first one wins ties.
pub fn find_smallest_width_alignment(g: &LayoutGraph, xss: &[Xs]) -> usize {
    let mut best: Option<(f64, usize)> = None;
    for (i, xs) in xss.iter().enumerate() {
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for (v, x) in xs {
            let half_width = g.node(v).map_or(0.0, |n| n.width / 2.0);
            max = max.max(x + half_width);
            min = min.min(x - half_width);
        }
        let width = max - min;
        if best.is_none_or(|(w, _)| width < w) {
            best = Some((width, i));
        }
    }
    best.map_or(0, |(_, i)| i)
}

/// Shifts every alignment so left-scanned ones share the reference's minimum and right-scanned
/// ones share its maximum.
pub fn align_coordinates(xss: &mut [Xs], align_to: usize) {
    let Some(reference) = xss.get(align_to) else {
        return;
    };
    let Some((to_min, to_max)) = min_max(reference) else {
        return;
    };

    for (i, xs) in xss.iter_mut().enumerate() {
        if i == align_to {
            continue;
        }
        let Some((min, max)) = min_max(xs) else {
            continue;
        };
        // Alignments alternate left and right scans: UL, UR, DL, DR.
        let delta = if i % 2 == 0 { to_min - min } else { to_max - max };
        if delta != 0.0 {
            for x in xs.values_mut() {
                *x += delta;
            }
        }
    }
}

fn min_max(xs: &Xs) -> Option<(f64, f64)> {
    if xs.is_empty() {
        return None;
    }
    let min = xs.values().copied().fold(f64::INFINITY, f64::min);
    let max = xs.values().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Final `x`: the requested alignment, or the mean of the two median candidates.
pub fn balance(xss: &[Xs], align: Option<Align>) -> Xs {
    let Some(ul) = xss.first() else {
        return Xs::default();
    };
    ul.keys()
        .map(|v| {
            if let Some(xs) = align.and_then(|a| xss.get(a.index())) {
                return (v.clone(), xs.get(v).copied().unwrap_or(0.0));
            }
            let mut candidates: Vec<f64> = xss
                .iter()
                .map(|xs| xs.get(v).copied().unwrap_or(0.0))
                .collect();
            candidates.sort_by(f64::total_cmp);
            let x = match candidates.len() {
                0 => 0.0,
                1 => candidates[0],
                n => (candidates[n / 2 - 1] + candidates[n / 2]) / 2.0,
            };
            (v.clone(), x)
        })
        .collect()
}
