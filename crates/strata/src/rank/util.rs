use super::RankGraph;
use crate::graphlib::EdgeKey;
use rustc_hash::FxHashSet;

/// Initial ranking: every node goes as high as its successors allow, sinks land on rank 0 and
/// everything else gets a non-positive rank.
pub fn longest_path(g: &mut RankGraph) {
    fn dfs(g: &mut RankGraph, v: &str, visited: &mut FxHashSet<String>) -> i32 {
        if !visited.insert(v.to_string()) {
            return g.node(v).map_or(0, |n| n.rank);
        }

        let mut rank: Option<i32> = None;
        for key in g.out_edges(v) {
            let minlen = g.edge_by_key(&key).map_or(1, |e| e.minlen);
            let candidate = dfs(g, &key.w, visited) - minlen;
            rank = Some(rank.map_or(candidate, |r| r.min(candidate)));
        }
        let rank = rank.unwrap_or(0);
        if let Some(node) = g.node_mut(v) {
            node.rank = rank;
        }
        rank
    }

    let sources: Vec<String> = g.sources().into_iter().map(str::to_string).collect();
    let mut visited = FxHashSet::default();
    for v in sources {
        dfs(g, &v, &mut visited);
    }
}

/// How much longer the edge is than its `minlen`.
pub fn slack(g: &RankGraph, key: &EdgeKey) -> i32 {
    let rank = |v: &str| g.node(v).map_or(0, |n| n.rank);
    let minlen = g.edge_by_key(key).map_or(1, |e| e.minlen);
    rank(&key.w) - rank(&key.v) - minlen
}
