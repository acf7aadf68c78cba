//! Merges barycenter entries that violate ordering constraints.
//!
//! Entries are visited in topological order of the constraint graph. When a constrained
//! predecessor would sort at or after its successor, the two are coalesced into one entry whose
//! barycenter is their weighted mean (Forster, "A Fast and Simple Heuristic for Constrained
//! Two-Level Crossing Reduction").

use super::ConstraintGraph;
use super::barycenter::BarycenterEntry;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictEntry {
    pub vs: Vec<String>,
    /// Smallest original index among the merged nodes.
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone)]
struct Working {
    entry: ConflictEntry,
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    merged: bool,
}

pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &ConstraintGraph) -> Vec<ConflictEntry> {
    let mut index_of: FxHashMap<&str, usize> = FxHashMap::default();
    let mut work: Vec<Working> = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        index_of.insert(entry.v.as_str(), i);
        work.push(Working {
            entry: ConflictEntry {
                vs: vec![entry.v.clone()],
                i,
                barycenter: entry.barycenter,
                weight: entry.weight,
            },
            indegree: 0,
            ins: Vec::new(),
            outs: Vec::new(),
            merged: false,
        });
    }

    for key in cg.edges() {
        let (Some(&v), Some(&w)) = (index_of.get(key.v.as_str()), index_of.get(key.w.as_str()))
        else {
            continue;
        };
        work[w].indegree += 1;
        work[v].outs.push(w);
    }

    let mut source_set: Vec<usize> = (0..work.len()).filter(|&i| work[i].indegree == 0).collect();
    let mut visited: Vec<usize> = Vec::new();
    while let Some(v) = source_set.pop() {
        visited.push(v);

        let ins: Vec<usize> = work[v].ins.iter().rev().copied().collect();
        for u in ins {
            if work[u].merged {
                continue;
            }
            let should_merge = match (work[u].entry.barycenter, work[v].entry.barycenter) {
                (Some(ub), Some(vb)) => ub >= vb,
                _ => true,
            };
            if should_merge {
                merge_entries(&mut work, v, u);
            }
        }

        let outs = work[v].outs.clone();
        for w in outs {
            work[w].ins.push(v);
            work[w].indegree -= 1;
            if work[w].indegree == 0 {
                source_set.push(w);
            }
        }
    }

    visited
        .into_iter()
        .filter(|&i| !work[i].merged)
        .map(|i| work[i].entry.clone())
        .collect()
}

fn merge_entries(work: &mut [Working], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for entry in [&work[target].entry, &work[source].entry] {
        if let (Some(b), Some(w)) = (entry.barycenter, entry.weight) {
            if w != 0.0 {
                sum += b * w;
                weight += w;
            }
        }
    }

    let mut vs = work[source].entry.vs.clone();
    vs.extend(work[target].entry.vs.iter().cloned());
    let i = work[source].entry.i.min(work[target].entry.i);

    let target = &mut work[target].entry;
    target.vs = vs;
    target.i = i;
    if weight != 0.0 {
        target.barycenter = Some(sum / weight);
        target.weight = Some(weight);
    }
    work[source].merged = true;
}
