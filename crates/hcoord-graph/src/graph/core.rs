//! The `Graph` container itself.
//!
//! Nodes and edges live in flat arenas (`Vec<NodeEntry<N>>` / `Vec<EdgeEntry<E>>`) addressed by
//! `usize` index; string ids are resolved to indices through a side map. Predecessor/successor
//! queries are served from a CSR-style adjacency cache (see [`adj_cache`](super::adj_cache)) that
//! is rebuilt lazily whenever the arena's generation counter has moved past the cache's.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use super::adj_cache::{DirectedAdjCache, UndirectedAdjCache};
use super::entries::{EdgeEntry, NodeEntry};
use super::options::GraphOptions;
use super::EdgeKey;
use super::edge_key::EdgeKeyView;

#[derive(Default)]
struct Caches {
    generation: u64,
    directed: Option<DirectedAdjCache>,
    undirected: Option<UndirectedAdjCache>,
}

pub struct Graph<N, E, G> {
    options: GraphOptions,
    graph_label: Option<G>,
    nodes: Vec<NodeEntry<N>>,
    node_index: FxHashMap<String, usize>,
    edges: Vec<EdgeEntry<E>>,
    edge_index: hashbrown::HashMap<EdgeKey, usize>,
    generation: u64,
    caches: RefCell<Caches>,
}

impl<N, E, G> Graph<N, E, G> {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: None,
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            edges: Vec::new(),
            edge_index: hashbrown::HashMap::new(),
            generation: 0,
            caches: RefCell::new(Caches::default()),
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn graph(&self) -> &G {
        self.graph_label
            .as_ref()
            .expect("graph label accessed before set_graph")
    }

    pub fn graph_mut(&mut self) -> &mut G {
        self.graph_label
            .as_mut()
            .expect("graph label accessed before set_graph")
    }

    pub fn set_graph(&mut self, label: G) {
        self.graph_label = Some(label);
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    // -- nodes ----------------------------------------------------------

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        let ix = *self.node_index.get(id)?;
        Some(&self.nodes[ix].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        let ix = *self.node_index.get(id)?;
        Some(&mut self.nodes[ix].label)
    }

    pub fn set_node(&mut self, id: &str, label: N) {
        if let Some(&ix) = self.node_index.get(id) {
            self.nodes[ix].label = label;
            return;
        }
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.to_string(),
            label,
        });
        self.node_index.insert(id.to_string(), ix);
        self.touch();
    }

    /// Inserts `id` with a default label if it does not already exist; a no-op otherwise.
    pub fn ensure_node(&mut self, id: impl Into<String>)
    where
        N: Default,
    {
        let id = id.into();
        if !self.node_index.contains_key(&id) {
            let ix = self.nodes.len();
            self.nodes.push(NodeEntry {
                id: id.clone(),
                label: N::default(),
            });
            self.node_index.insert(id, ix);
            self.touch();
        }
    }

    /// All node ids, in insertion order, borrowed from the arena.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// All node ids, in insertion order, as an owned collection.
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn for_each_node<F: FnMut(&str, &N)>(&self, mut f: F) {
        for n in &self.nodes {
            f(&n.id, &n.label);
        }
    }

    pub fn for_each_node_mut<F: FnMut(&str, &mut N)>(&mut self, mut f: F) {
        for n in &mut self.nodes {
            f(&n.id, &mut n.label);
        }
    }

    // -- edges ------------------------------------------------------------

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.find_edge_ix(v, w, name).is_some()
            || (!self.options.directed && self.find_edge_ix(w, v, name).is_some())
    }

    fn find_edge_ix(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        self.edge_index
            .get(&EdgeKeyView { v, w, name })
            .copied()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        if let Some(ix) = self.find_edge_ix(v, w, name) {
            return Some(&self.edges[ix].label);
        }
        if !self.options.directed {
            if let Some(ix) = self.find_edge_ix(w, v, name) {
                return Some(&self.edges[ix].label);
            }
        }
        None
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        if let Some(ix) = self.find_edge_ix(v, w, name) {
            return Some(&mut self.edges[ix].label);
        }
        if !self.options.directed {
            if let Some(ix) = self.find_edge_ix(w, v, name) {
                return Some(&mut self.edges[ix].label);
            }
        }
        None
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w, key.name.as_deref())
    }

    pub fn edges(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges()
    }

    pub fn set_edge(&mut self, v: &str, w: &str)
    where
        E: Default,
    {
        self.set_edge_with_label(v, w, E::default());
    }

    pub fn set_edge_with_label(&mut self, v: impl Into<String>, w: impl Into<String>, label: E)
    where
        N: Default,
    {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        if let Some(&ix) = self.edge_index.get(&EdgeKeyView {
            v: &v,
            w: &w,
            name: None,
        }) {
            self.edges[ix].label = label;
            return;
        }

        let v_ix = self.node_index[&v];
        let w_ix = self.node_index[&w];
        let key = EdgeKey::new(v.clone(), w.clone(), None::<String>);
        let ix = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label,
        });
        self.edge_index.insert(key, ix);
        self.touch();
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) {
        let Some(ix) = self.find_edge_ix(v, w, name) else {
            return;
        };
        self.edges.remove(ix);
        self.rebuild_edge_index();
        self.touch();
    }

    fn rebuild_edge_index(&mut self) {
        self.edge_index.clear();
        for (ix, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key.clone(), ix);
        }
    }

    // -- topology queries ---------------------------------------------------

    fn ensure_directed_cache(&self) -> std::cell::Ref<'_, Caches> {
        {
            let mut caches = self.caches.borrow_mut();
            if caches.generation != self.generation || caches.directed.is_none() {
                caches.directed = Some(self.build_directed_cache());
                caches.generation = self.generation;
            }
        }
        self.caches.borrow()
    }

    fn ensure_undirected_cache(&self) -> std::cell::Ref<'_, Caches> {
        {
            let mut caches = self.caches.borrow_mut();
            if caches.generation != self.generation || caches.undirected.is_none() {
                caches.undirected = Some(self.build_undirected_cache());
                caches.generation = self.generation;
            }
        }
        self.caches.borrow()
    }

    fn build_directed_cache(&self) -> DirectedAdjCache {
        let n = self.nodes.len();
        let mut out_counts = vec![0usize; n];
        let mut in_counts = vec![0usize; n];
        for e in &self.edges {
            out_counts[e.v_ix] += 1;
            in_counts[e.w_ix] += 1;
        }

        let out_offsets = prefix_sums(&out_counts);
        let in_offsets = prefix_sums(&in_counts);

        let mut out_edges = vec![0usize; self.edges.len()];
        let mut in_edges = vec![0usize; self.edges.len()];
        let mut out_cursor = out_offsets.clone();
        let mut in_cursor = in_offsets.clone();
        for (ix, e) in self.edges.iter().enumerate() {
            out_edges[out_cursor[e.v_ix]] = ix;
            out_cursor[e.v_ix] += 1;
            in_edges[in_cursor[e.w_ix]] = ix;
            in_cursor[e.w_ix] += 1;
        }

        DirectedAdjCache {
            generation: self.generation,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        }
    }

    fn build_undirected_cache(&self) -> UndirectedAdjCache {
        let n = self.nodes.len();
        let mut counts = vec![0usize; n];
        for e in &self.edges {
            counts[e.v_ix] += 1;
            if e.v_ix != e.w_ix {
                counts[e.w_ix] += 1;
            }
        }

        let offsets = prefix_sums(&counts);
        let total: usize = counts.iter().sum();
        let mut edges = vec![0usize; total];
        let mut cursor = offsets.clone();
        for (ix, e) in self.edges.iter().enumerate() {
            edges[cursor[e.v_ix]] = ix;
            cursor[e.v_ix] += 1;
            if e.v_ix != e.w_ix {
                edges[cursor[e.w_ix]] = ix;
                cursor[e.w_ix] += 1;
            }
        }

        UndirectedAdjCache {
            generation: self.generation,
            offsets,
            edges,
        }
    }

    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        let Some(&ix) = self.node_index.get(id) else {
            return Vec::new();
        };
        if self.options.directed {
            let caches = self.ensure_directed_cache();
            let cache = caches.directed.as_ref().unwrap();
            cache
                .in_edges(ix)
                .iter()
                .map(|&e| self.nodes[self.edges[e].v_ix].id.as_str())
                .collect()
        } else {
            self.neighbors(id)
        }
    }

    pub fn successors(&self, id: &str) -> Vec<&str> {
        let Some(&ix) = self.node_index.get(id) else {
            return Vec::new();
        };
        if self.options.directed {
            let caches = self.ensure_directed_cache();
            let cache = caches.directed.as_ref().unwrap();
            cache
                .out_edges(ix)
                .iter()
                .map(|&e| self.nodes[self.edges[e].w_ix].id.as_str())
                .collect()
        } else {
            self.neighbors(id)
        }
    }

    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let Some(&ix) = self.node_index.get(id) else {
            return Vec::new();
        };
        if self.options.directed {
            let mut seen: FxHashMap<&str, ()> = FxHashMap::default();
            let mut out = Vec::new();
            for s in self.predecessors(id).into_iter().chain(self.successors(id)) {
                if seen.insert(s, ()).is_none() {
                    out.push(s);
                }
            }
            out
        } else {
            let caches = self.ensure_undirected_cache();
            let cache = caches.undirected.as_ref().unwrap();
            cache
                .edges(ix)
                .iter()
                .map(|&e| {
                    let entry = &self.edges[e];
                    let other = if entry.v_ix == ix { entry.w_ix } else { entry.v_ix };
                    self.nodes[other].id.as_str()
                })
                .collect()
        }
    }

    pub fn in_edges(&self, id: &str, other: Option<&str>) -> Vec<EdgeKey> {
        let Some(&ix) = self.node_index.get(id) else {
            return Vec::new();
        };
        let raw: Vec<usize> = if self.options.directed {
            let caches = self.ensure_directed_cache();
            caches.directed.as_ref().unwrap().in_edges(ix).to_vec()
        } else {
            let caches = self.ensure_undirected_cache();
            caches.undirected.as_ref().unwrap().edges(ix).to_vec()
        };
        raw.into_iter()
            .map(|e| self.edges[e].key.clone())
            .filter(|k| other.is_none_or(|o| k.v == o || k.w == o))
            .collect()
    }

    pub fn out_edges(&self, id: &str, other: Option<&str>) -> Vec<EdgeKey> {
        let Some(&ix) = self.node_index.get(id) else {
            return Vec::new();
        };
        let raw: Vec<usize> = if self.options.directed {
            let caches = self.ensure_directed_cache();
            caches.directed.as_ref().unwrap().out_edges(ix).to_vec()
        } else {
            let caches = self.ensure_undirected_cache();
            caches.undirected.as_ref().unwrap().edges(ix).to_vec()
        };
        raw.into_iter()
            .map(|e| self.edges[e].key.clone())
            .filter(|k| other.is_none_or(|o| k.v == o || k.w == o))
            .collect()
    }

    pub fn node_edges(&self, id: &str, other: Option<&str>) -> Vec<EdgeKey> {
        if self.options.directed {
            let mut out = self.in_edges(id, other);
            out.extend(self.out_edges(id, other));
            out
        } else {
            self.in_edges(id, other)
        }
    }
}

fn prefix_sums(counts: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(counts.len() + 1);
    let mut acc = 0;
    offsets.push(0);
    for &c in counts {
        acc += c;
        offsets.push(acc);
    }
    offsets
}
