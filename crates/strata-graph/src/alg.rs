//! Traversal helpers over [`Graph`].

use crate::Graph;
use rustc_hash::{FxHashMap, FxHashSet};

/// Depth-first preorder from each of `roots`. Directed graphs follow successors; undirected
/// graphs follow neighbors. Unknown roots are skipped.
pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String> {
    walk(g, roots, false)
}

/// Depth-first postorder; see [`preorder`] for the navigation rules.
pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String> {
    walk(g, roots, true)
}

fn walk<N, E, G>(g: &Graph<N, E, G>, roots: &[&str], post: bool) -> Vec<String> {
    fn visit<'g, N, E, G>(
        g: &'g Graph<N, E, G>,
        v: &'g str,
        post: bool,
        visited: &mut FxHashSet<&'g str>,
        acc: &mut Vec<String>,
    ) {
        if !visited.insert(v) {
            return;
        }
        if !post {
            acc.push(v.to_string());
        }
        let next = if g.is_directed() {
            g.successors(v)
        } else {
            g.neighbors(v)
        };
        for w in next {
            visit(g, w, post, visited, acc);
        }
        if post {
            acc.push(v.to_string());
        }
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut acc: Vec<String> = Vec::with_capacity(g.node_count());
    for root in roots {
        // Re-borrow the id from the graph so the visited set only holds graph-owned strings.
        let Some(v) = g.nodes().find(|id| id == root) else {
            continue;
        };
        visit(g, v, post, &mut visited, &mut acc);
    }
    acc
}

/// Strongly connected components that form cycles: components with more than one node, plus
/// single nodes carrying a self-loop. Nodes inside a cycle are listed in insertion order and
/// cycles are ordered by their first node's insertion index.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>> {
    struct Tarjan<'g> {
        next_index: usize,
        index: FxHashMap<&'g str, usize>,
        lowlink: FxHashMap<&'g str, usize>,
        stack: Vec<&'g str>,
        on_stack: FxHashSet<&'g str>,
        components: Vec<Vec<&'g str>>,
    }

    fn connect<'g, N, E, G>(g: &'g Graph<N, E, G>, v: &'g str, t: &mut Tarjan<'g>) {
        t.index.insert(v, t.next_index);
        t.lowlink.insert(v, t.next_index);
        t.next_index += 1;
        t.stack.push(v);
        t.on_stack.insert(v);

        for w in g.successors(v) {
            if !t.index.contains_key(w) {
                connect(g, w, t);
                let low = t.lowlink[v].min(t.lowlink[w]);
                t.lowlink.insert(v, low);
            } else if t.on_stack.contains(w) {
                let low = t.lowlink[v].min(t.index[w]);
                t.lowlink.insert(v, low);
            }
        }

        if t.lowlink[v] == t.index[v] {
            let mut component = Vec::new();
            while let Some(w) = t.stack.pop() {
                t.on_stack.remove(w);
                component.push(w);
                if w == v {
                    break;
                }
            }
            t.components.push(component);
        }
    }

    let mut t = Tarjan {
        next_index: 0,
        index: FxHashMap::default(),
        lowlink: FxHashMap::default(),
        stack: Vec::new(),
        on_stack: FxHashSet::default(),
        components: Vec::new(),
    };
    for v in g.nodes() {
        if !t.index.contains_key(v) {
            connect(g, v, &mut t);
        }
    }

    let position: FxHashMap<&str, usize> = g.nodes().enumerate().map(|(i, v)| (v, i)).collect();
    let mut cycles: Vec<Vec<&str>> = t
        .components
        .into_iter()
        .filter(|c| c.len() > 1 || has_self_loop(g, c[0]))
        .collect();
    for cycle in &mut cycles {
        cycle.sort_by_key(|v| position[v]);
    }
    cycles.sort_by_key(|c| position[c[0]]);
    cycles
        .into_iter()
        .map(|c| c.into_iter().map(str::to_string).collect())
        .collect()
}

fn has_self_loop<N, E, G>(g: &Graph<N, E, G>, v: &str) -> bool {
    g.out_edges(v).iter().any(|e| e.is_self_loop())
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool {
    find_cycles(g).is_empty()
}
