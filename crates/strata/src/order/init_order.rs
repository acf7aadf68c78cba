use crate::layout_graph::LayoutGraph;
use rustc_hash::FxHashSet;

/// Initial layering: a depth-first walk along successors, starting from nodes in rank order,
/// appends each node to its rank as it is first reached.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<String>> {
    let Some(max_rank) = g.node_entries().filter_map(|(_, n)| n.rank).max() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<String>> =
        vec![Vec::new(); usize::try_from(max_rank).map_or(0, |m| m + 1)];

    let mut ordered: Vec<(i32, &str)> = g
        .node_entries()
        .filter_map(|(v, n)| n.rank.map(|r| (r, v)))
        .collect();
    ordered.sort_by_key(|(rank, _)| *rank);

    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut stack: Vec<String> = Vec::new();
    for (_, start) in ordered {
        stack.push(start.to_string());
        while let Some(v) = stack.pop() {
            if !visited.insert(v.clone()) {
                continue;
            }
            if let Some(layer) = g
                .node(&v)
                .and_then(|n| n.rank)
                .and_then(|r| usize::try_from(r).ok())
                .and_then(|r| layers.get_mut(r))
            {
                layer.push(v.clone());
            }
            // Reverse so the first successor is visited first.
            stack.extend(g.successors(&v).into_iter().rev().map(str::to_string));
        }
    }
    layers
}
