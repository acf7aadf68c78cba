//! Breaks cycles by reversing a feedback arc set, and restores the edges afterwards.

use crate::Acyclicer;
use crate::graphlib::EdgeKey;
use crate::greedy_fas::greedy_fas;
use crate::layout_graph::LayoutGraph;
use rustc_hash::FxHashSet;

pub fn run(g: &mut LayoutGraph) {
    let fas = match g.graph().acyclicer {
        Acyclicer::Greedy => greedy_fas(g, |e| e.weight.round() as i64),
        Acyclicer::Dfs => dfs_fas(g),
    };

    for key in fas {
        let Some(mut label) = g.remove_edge(&key) else {
            continue;
        };
        label.forward_name = key.name.clone();
        label.reversed = true;
        let name = g.graph_mut().next_id("rev");
        g.set_edge_named(key.w, key.v, Some(name), label);
    }
}

pub fn undo(g: &mut LayoutGraph) {
    let reversed: Vec<EdgeKey> = g
        .edge_entries()
        .filter(|(_, e)| e.reversed)
        .map(|(k, _)| k.clone())
        .collect();

    for key in reversed {
        let Some(mut label) = g.remove_edge(&key) else {
            continue;
        };
        label.reversed = false;
        let name = label.forward_name.take();
        g.set_edge_named(key.w, key.v, name, label);
    }
}

/// Edges that close a cycle during a depth-first walk in node order.
pub fn dfs_fas(g: &LayoutGraph) -> Vec<EdgeKey> {
    fn visit(
        g: &LayoutGraph,
        v: &str,
        visited: &mut FxHashSet<String>,
        stack: &mut FxHashSet<String>,
        fas: &mut Vec<EdgeKey>,
    ) {
        if !visited.insert(v.to_string()) {
            return;
        }
        stack.insert(v.to_string());
        for key in g.out_edges(v) {
            if stack.contains(&key.w) {
                fas.push(key);
            } else {
                visit(g, &key.w, visited, stack, fas);
            }
        }
        stack.remove(v);
    }

    let mut visited = FxHashSet::default();
    let mut stack = FxHashSet::default();
    let mut fas = Vec::new();
    for v in g.nodes() {
        visit(g, v, &mut visited, &mut stack, &mut fas);
    }
    fas
}
