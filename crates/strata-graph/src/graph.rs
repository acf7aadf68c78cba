//! The [`Graph`] container.
//!
//! Storage is two insertion-ordered maps: nodes (each with its incident edge sets) and edges.
//! Layered layout relies on iteration order for tie-breaking, so every query that returns
//! several nodes or edges reports them in the order they were first inserted.

use crate::edge_key::{EdgeKey, EdgeKeyRef};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

type OrderedMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type OrderedSet<T> = IndexSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    pub directed: bool,
    pub multigraph: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: true,
            multigraph: false,
        }
    }
}

impl GraphOptions {
    pub fn multigraph() -> Self {
        Self {
            multigraph: true,
            ..Default::default()
        }
    }

    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    label: N,
    ins: OrderedSet<EdgeKey>,
    outs: OrderedSet<EdgeKey>,
}

impl<N> NodeEntry<N> {
    fn new(label: N) -> Self {
        Self {
            label,
            ins: OrderedSet::default(),
            outs: OrderedSet::default(),
        }
    }
}

/// A labeled graph with node labels `N`, edge labels `E` and a graph-level label `G`.
#[derive(Debug, Clone)]
pub struct Graph<N, E, G = ()> {
    options: GraphOptions,
    label: G,
    nodes: OrderedMap<String, NodeEntry<N>>,
    edges: OrderedMap<EdgeKey, E>,
}

impl<N, E, G: Default> Graph<N, E, G> {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            label: G::default(),
            nodes: OrderedMap::default(),
            edges: OrderedMap::default(),
        }
    }
}

impl<N, E, G: Default> Default for Graph<N, E, G> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    // ---- nodes ------------------------------------------------------------------------------

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts `id` with `label`, or replaces the label of an existing node in place.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        match self.nodes.get_mut(&id) {
            Some(entry) => entry.label = label,
            None => {
                self.nodes.insert(id, NodeEntry::new(label));
            }
        }
        self
    }

    /// Inserts `id` with a default label unless it already exists.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self
    where
        N: Default,
    {
        let id = id.into();
        if !self.nodes.contains_key(&id) {
            self.nodes.insert(id, NodeEntry::new(N::default()));
        }
        self
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id).map(|entry| &entry.label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id).map(|entry| &mut entry.label)
    }

    /// Removes a node and every edge incident to it, returning the node label.
    pub fn remove_node(&mut self, id: &str) -> Option<N> {
        let entry = self.nodes.shift_remove(id)?;
        for key in entry.ins.iter().chain(entry.outs.iter()) {
            self.edges.shift_remove(key);
            if key.v != id {
                if let Some(tail) = self.nodes.get_mut(&key.v) {
                    tail.outs.shift_remove(key);
                }
            }
            if key.w != id {
                if let Some(head) = self.nodes.get_mut(&key.w) {
                    head.ins.shift_remove(key);
                }
            }
        }
        Some(entry.label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn node_entries(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|(id, entry)| (id.as_str(), &entry.label))
    }

    pub fn node_entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut N)> {
        self.nodes
            .iter_mut()
            .map(|(id, entry)| (id.as_str(), &mut entry.label))
    }

    /// Nodes without incoming edges.
    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.ins.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Nodes without outgoing edges.
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.outs.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    // ---- edges ------------------------------------------------------------------------------

    fn key_ref<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyRef<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyRef { v, w, name }
    }

    fn key_ref_of<'a>(&self, key: &'a EdgeKey) -> EdgeKeyRef<'a> {
        self.key_ref(&key.v, &key.w, key.name.as_deref())
    }

    /// Inserts or relabels `v -> w`. Missing endpoints are created with default labels.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>, label: E) -> &mut Self
    where
        N: Default,
    {
        self.set_edge_key(EdgeKey::new(v, w), label)
    }

    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<String>,
        label: E,
    ) -> &mut Self
    where
        N: Default,
    {
        let mut key = EdgeKey::new(v, w);
        key.name = name;
        self.set_edge_key(key, label)
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self
    where
        N: Default,
    {
        let key = self.key_ref_of(&key).to_owned_key();
        if let Some(existing) = self.edges.get_mut(&key) {
            *existing = label;
            return self;
        }
        self.ensure_node(key.v.clone());
        self.ensure_node(key.w.clone());
        if let Some(tail) = self.nodes.get_mut(&key.v) {
            tail.outs.insert(key.clone());
        }
        if let Some(head) = self.nodes.get_mut(&key.w) {
            head.ins.insert(key.clone());
        }
        self.edges.insert(key, label);
        self
    }

    /// Connects consecutive nodes of `path` with default-labeled edges.
    pub fn set_path(&mut self, path: &[&str]) -> &mut Self
    where
        N: Default,
        E: Default,
    {
        for pair in path.windows(2) {
            self.set_edge(pair[0], pair[1], E::default());
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edges.contains_key(&self.key_ref(v, w, name))
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edges.get(&self.key_ref(v, w, name))
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let key = self.key_ref(v, w, name);
        self.edges.get_mut(&key)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edges.get(&self.key_ref_of(key))
    }

    pub fn edge_mut_by_key(&mut self, key: &EdgeKey) -> Option<&mut E> {
        let key = self.key_ref_of(key);
        self.edges.get_mut(&key)
    }

    pub fn remove_edge(&mut self, key: &EdgeKey) -> Option<E> {
        let lookup = self.key_ref_of(key);
        let (_, key, label) = self.edges.shift_remove_full(&lookup)?;
        if let Some(tail) = self.nodes.get_mut(&key.v) {
            tail.outs.shift_remove(&key);
        }
        if let Some(head) = self.nodes.get_mut(&key.w) {
            head.ins.shift_remove(&key);
        }
        Some(label)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.keys().cloned().collect()
    }

    pub fn edge_entries(&self) -> impl Iterator<Item = (&EdgeKey, &E)> {
        self.edges.iter()
    }

    pub fn edge_entries_mut(&mut self) -> impl Iterator<Item = (&EdgeKey, &mut E)> {
        self.edges.iter_mut()
    }

    // ---- adjacency --------------------------------------------------------------------------

    /// Edges whose head is `v`. For undirected graphs these are the edges stored with `v` as
    /// the lexicographically larger endpoint.
    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.nodes
            .get(v)
            .map(|entry| entry.ins.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.nodes
            .get(v)
            .map(|entry| entry.outs.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All edges incident to `v`: incoming first, then outgoing.
    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(entry) = self.nodes.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<EdgeKey> = entry.ins.iter().cloned().collect();
        out.extend(entry.outs.iter().filter(|k| !k.is_self_loop()).cloned());
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(entry) = self.nodes.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::with_capacity(entry.ins.len());
        for key in &entry.ins {
            if !out.contains(&key.v.as_str()) {
                out.push(&key.v);
            }
        }
        out
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(entry) = self.nodes.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::with_capacity(entry.outs.len());
        for key in &entry.outs {
            if !out.contains(&key.w.as_str()) {
                out.push(&key.w);
            }
        }
        out
    }

    /// Predecessors followed by successors, without duplicates.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out = self.predecessors(v);
        for w in self.successors(v) {
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }
}
