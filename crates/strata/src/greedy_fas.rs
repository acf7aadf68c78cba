//! Greedy feedback arc set (Eades, Lin and Smyth), used when `acyclicer` is `Greedy`.
//!
//! Nodes sit in buckets keyed by `out - in` weight. Sinks and sources are peeled off first; when
//! neither exists, the node with the largest `out - in` is removed and its incoming edges join
//! the arc set.

use crate::graphlib::{EdgeKey, Graph};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    inw: i64,
    outw: i64,
}

struct Buckets {
    queues: Vec<IndexSet<String, FxBuildHasher>>,
    bucket_of: FxHashMap<String, usize>,
    zero_idx: i64,
}

impl Buckets {
    fn assign(&mut self, v: &str, entry: Entry) {
        let last = self.queues.len() - 1;
        let idx = if entry.outw == 0 {
            0
        } else if entry.inw == 0 {
            last
        } else {
            usize::try_from(entry.outw - entry.inw + self.zero_idx)
                .unwrap_or(0)
                .min(last)
        };
        if let Some(prev) = self.bucket_of.insert(v.to_string(), idx) {
            self.queues[prev].shift_remove(v);
        }
        self.queues[idx].insert(v.to_string());
    }

    fn dequeue(&mut self, idx: usize) -> Option<String> {
        let v = self.queues[idx].shift_remove_index(0)?;
        self.bucket_of.remove(&v);
        Some(v)
    }
}

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>, weight_fn: impl Fn(&E) -> i64) -> Vec<EdgeKey> {
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let mut fas_graph: Graph<Entry, i64, ()> = Graph::default();
    for v in g.nodes() {
        fas_graph.set_node(v, Entry::default());
    }
    let mut max_in = 0;
    let mut max_out = 0;
    for (key, label) in g.edge_entries() {
        let weight = weight_fn(label).max(0);
        let prev = fas_graph.edge(&key.v, &key.w, None).copied().unwrap_or(0);
        fas_graph.set_edge(key.v.clone(), key.w.clone(), prev + weight);
        if let Some(tail) = fas_graph.node_mut(&key.v) {
            tail.outw += weight;
            max_out = max_out.max(tail.outw);
        }
        if let Some(head) = fas_graph.node_mut(&key.w) {
            head.inw += weight;
            max_in = max_in.max(head.inw);
        }
    }

    let len = usize::try_from(max_out + max_in + 3).unwrap_or(3);
    let mut buckets = Buckets {
        queues: (0..len).map(|_| IndexSet::default()).collect(),
        bucket_of: FxHashMap::default(),
        zero_idx: max_in + 1,
    };
    for (v, entry) in fas_graph.node_entries() {
        buckets.assign(v, *entry);
    }

    let mut cut: Vec<(String, String)> = Vec::new();
    let sinks = 0;
    let sources = len - 1;
    while fas_graph.node_count() > 0 {
        while let Some(v) = buckets.dequeue(sinks) {
            remove_node(&mut fas_graph, &mut buckets, &v, None);
        }
        while let Some(v) = buckets.dequeue(sources) {
            remove_node(&mut fas_graph, &mut buckets, &v, None);
        }
        if fas_graph.node_count() == 0 {
            break;
        }
        for idx in (1..sources).rev() {
            if let Some(v) = buckets.dequeue(idx) {
                remove_node(&mut fas_graph, &mut buckets, &v, Some(&mut cut));
                break;
            }
        }
    }

    cut.into_iter()
        .flat_map(|(v, w)| {
            g.out_edges(&v)
                .into_iter()
                .filter(move |key| key.w == w)
        })
        .collect()
}

fn remove_node(
    g: &mut Graph<Entry, i64, ()>,
    buckets: &mut Buckets,
    v: &str,
    mut cut: Option<&mut Vec<(String, String)>>,
) {
    for key in g.in_edges(v) {
        let weight = g.edge_by_key(&key).copied().unwrap_or(0);
        if let Some(cut) = cut.as_deref_mut() {
            cut.push((key.v.clone(), key.w.clone()));
        }
        if let Some(u) = g.node_mut(&key.v) {
            u.outw -= weight;
            let entry = *u;
            buckets.assign(&key.v, entry);
        }
    }
    for key in g.out_edges(v) {
        let weight = g.edge_by_key(&key).copied().unwrap_or(0);
        if let Some(w) = g.node_mut(&key.w) {
            w.inw -= weight;
            let entry = *w;
            buckets.assign(&key.w, entry);
        }
    }
    g.remove_node(v);
}
