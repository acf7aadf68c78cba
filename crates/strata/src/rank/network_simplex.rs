//! Network simplex ranking (Gansner et al., "A Technique for Drawing Directed Graphs").
//!
//! Starting from a feasible tight tree, repeatedly swap a tree edge with a negative cut value
//! for the non-tree edge of minimum slack that reconnects the two components, until no cut
//! value is negative. The result minimizes the weighted sum of edge lengths.
//!
//! Tree nodes carry `low`/`lim` postorder numbers so "is `u` below this tree edge" is a range
//! check, and each tree edge carries its cut value.

use super::RankGraph;
use super::feasible_tree::{TreeEdge, TreeGraph, TreeNode, feasible_tree};
use super::util::{longest_path, slack};
use crate::graphlib::{EdgeKey, alg};
use rustc_hash::FxHashSet;

/// Ranks a simple directed acyclic graph. Expects one connected component.
pub fn network_simplex(g: &mut RankGraph) {
    longest_path(g);
    let mut t = feasible_tree(g);
    init_low_lim_values(&mut t, None);
    init_cut_values(&mut t, g);

    let mut iterations = 0usize;
    while let Some(e) = leave_edge(&t) {
        let Some(f) = enter_edge(&t, g, &e) else {
            break;
        };
        exchange_edges(&mut t, g, &e, &f);
        iterations += 1;
    }
    tracing::trace!(iterations, nodes = g.node_count(), "network simplex converged");
}

/// Numbers the tree in postorder from `root` (the first tree node by default), recording for
/// each node the lowest number in its subtree (`low`), its own number (`lim`) and its parent.
pub fn init_low_lim_values(t: &mut TreeGraph, root: Option<&str>) {
    let root = match root {
        Some(root) => root.to_string(),
        None => match t.nodes().next() {
            Some(first) => first.to_string(),
            None => return,
        },
    };
    let mut visited = FxHashSet::default();
    assign_low_lim(t, &mut visited, 1, &root, None);
}

fn assign_low_lim(
    t: &mut TreeGraph,
    visited: &mut FxHashSet<String>,
    mut next_lim: usize,
    v: &str,
    parent: Option<&str>,
) -> usize {
    let low = next_lim;
    visited.insert(v.to_string());

    let neighbors: Vec<String> = t.neighbors(v).into_iter().map(str::to_string).collect();
    for w in neighbors {
        if !visited.contains(&w) {
            next_lim = assign_low_lim(t, visited, next_lim, &w, Some(v));
        }
    }

    if let Some(label) = t.node_mut(v) {
        label.low = low;
        label.lim = next_lim;
        label.parent = parent.map(str::to_string);
    }
    next_lim + 1
}

/// Computes the cut value of every tree edge, children before parents.
pub fn init_cut_values(t: &mut TreeGraph, g: &RankGraph) {
    let nodes = t.node_ids();
    let roots: Vec<&str> = nodes.iter().map(String::as_str).collect();
    let mut vs = alg::postorder(t, &roots);
    // The last node visited is the root, which has no parent edge.
    vs.pop();
    for v in vs {
        let Some(parent) = t.node(&v).and_then(|n| n.parent.clone()) else {
            continue;
        };
        let cutvalue = calc_cut_value(t, g, &v);
        if let Some(edge) = t.edge_mut(&v, &parent, None) {
            edge.cutvalue = cutvalue;
        }
    }
}

/// Cut value of the tree edge between `child` and its parent, given that the cut values of the
/// tree edges below `child` are already known.
pub fn calc_cut_value(t: &TreeGraph, g: &RankGraph, child: &str) -> f64 {
    let Some(parent) = t.node(child).and_then(|n| n.parent.as_deref()) else {
        return 0.0;
    };
    let (child_is_tail, graph_edge) = match g.edge(child, parent, None) {
        Some(edge) => (true, edge),
        None => match g.edge(parent, child, None) {
            Some(edge) => (false, edge),
            None => return 0.0,
        },
    };

    let mut cut_value = graph_edge.weight;
    for key in g.node_edges(child) {
        let is_out_edge = key.v == child;
        let other = if is_out_edge { &key.w } else { &key.v };
        if other == parent {
            continue;
        }

        let points_to_head = is_out_edge == child_is_tail;
        let other_weight = g.edge_by_key(&key).map_or(0.0, |e| e.weight);
        cut_value += if points_to_head {
            other_weight
        } else {
            -other_weight
        };

        if let Some(tree_edge) = t.edge(child, other, None) {
            let other_cut = tree_edge.cutvalue;
            cut_value += if points_to_head { -other_cut } else { other_cut };
        }
    }
    cut_value
}

/// The first tree edge with a negative cut value.
pub fn leave_edge(t: &TreeGraph) -> Option<EdgeKey> {
    t.edge_entries()
        .find(|(_, e)| e.cutvalue < 0.0)
        .map(|(key, _)| key.clone())
}

/// The minimum-slack graph edge crossing from the head component of `edge` to its tail
/// component once `edge` leaves the tree.
pub fn enter_edge(t: &TreeGraph, g: &RankGraph, edge: &EdgeKey) -> Option<EdgeKey> {
    let (v, w) = if g.has_edge(&edge.v, &edge.w, None) {
        (&edge.v, &edge.w)
    } else {
        (&edge.w, &edge.v)
    };
    let v_label = t.node(v)?;
    let w_label = t.node(w)?;

    // Pick the endpoint whose subtree is cut off, and whether graph edges must point into it
    // (`flip == false`) or out of it.
    let (tail_label, flip) = if v_label.lim > w_label.lim {
        (w_label, true)
    } else {
        (v_label, false)
    };

    let mut best: Option<(i32, &EdgeKey)> = None;
    for key in g.edges() {
        let (Some(kv), Some(kw)) = (t.node(&key.v), t.node(&key.w)) else {
            continue;
        };
        if flip == is_descendant(kv, tail_label) && flip != is_descendant(kw, tail_label) {
            let s = slack(g, key);
            if best.is_none_or(|(min, _)| s < min) {
                best = Some((s, key));
            }
        }
    }
    best.map(|(_, key)| key.clone())
}

pub fn exchange_edges(t: &mut TreeGraph, g: &mut RankGraph, e: &EdgeKey, f: &EdgeKey) {
    t.remove_edge(&EdgeKey::new(e.v.clone(), e.w.clone()));
    t.set_edge(f.v.clone(), f.w.clone(), TreeEdge::default());
    init_low_lim_values(t, None);
    init_cut_values(t, g);
    update_ranks(t, g);
}

/// Re-derives every rank from the tree root so all tree edges are tight again.
fn update_ranks(t: &TreeGraph, g: &mut RankGraph) {
    let Some(root) = t.nodes().next() else {
        return;
    };
    for v in alg::preorder(t, &[root]).iter().skip(1) {
        let Some(parent) = t.node(v).and_then(|n| n.parent.as_deref()) else {
            continue;
        };
        let (minlen, flipped) = match g.edge(v, parent, None) {
            Some(edge) => (edge.minlen, false),
            None => match g.edge(parent, v, None) {
                Some(edge) => (edge.minlen, true),
                None => continue,
            },
        };
        let parent_rank = g.node(parent).map_or(0, |n| n.rank);
        if let Some(node) = g.node_mut(v) {
            node.rank = if flipped {
                parent_rank + minlen
            } else {
                parent_rank - minlen
            };
        }
    }
}

fn is_descendant(v_label: &TreeNode, root_label: &TreeNode) -> bool {
    root_label.low <= v_label.lim && v_label.lim <= root_label.lim
}
