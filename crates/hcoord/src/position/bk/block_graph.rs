//! The block graph: a dense-indexed DAG of vertical-block roots, used as the substrate for
//! horizontal compaction's two sweeps.
//!
//! Block roots are interned into a contiguous `usize` index space rather than kept as a
//! string-keyed graph, so the compaction sweeps (run once per `(vert, horiz)` bias) walk plain
//! index arrays instead of hashing vertex ids on every edge traversal.

use rustc_hash::FxHashMap;

use super::sep::sep;
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

pub(super) struct BlockGraph {
    ids: Vec<String>,
    index: FxHashMap<String, usize>,
    out_edges: Vec<Vec<(usize, f64)>>,
    in_edges: Vec<Vec<(usize, f64)>>,
}

impl BlockGraph {
    fn intern(&mut self, id: &str) -> usize {
        if let Some(&ix) = self.index.get(id) {
            return ix;
        }
        let ix = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), ix);
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        ix
    }

    fn raise_edge(&mut self, u: usize, v: usize, weight: f64) {
        match self.out_edges[u].iter_mut().find(|(t, _)| *t == v) {
            Some(entry) => entry.1 = entry.1.max(weight),
            None => self.out_edges[u].push((v, weight)),
        }
        match self.in_edges[v].iter_mut().find(|(s, _)| *s == u) {
            Some(entry) => entry.1 = entry.1.max(weight),
            None => self.in_edges[v].push((u, weight)),
        }
    }

    pub(super) fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub(super) fn id(&self, ix: usize) -> &str {
        &self.ids[ix]
    }

    pub(super) fn index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(super) fn out_edges(&self, ix: usize) -> &[(usize, f64)] {
        &self.out_edges[ix]
    }

    pub(super) fn in_edges(&self, ix: usize) -> &[(usize, f64)] {
        &self.in_edges[ix]
    }
}

/// For each oriented layer, walks consecutive vertex pairs `(u, v)`; every `v` gets a block
/// node for `root[v]`, and a left neighbor `u` raises the edge `root[u] -> root[v]` to the
/// maximum separation required between them (`sep` takes the right-hand vertex first).
pub(super) fn build_block_graph(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &[Vec<String>],
    root: &FxHashMap<String, String>,
    reverse_sep: bool,
) -> BlockGraph {
    let mut bg = BlockGraph {
        ids: Vec::new(),
        index: FxHashMap::default(),
        out_edges: Vec::new(),
        in_edges: Vec::new(),
    };

    for layer in layering {
        let mut prev: Option<&str> = None;
        for v in layer {
            let v_root = root.get(v).map(String::as_str).unwrap_or(v.as_str());
            bg.intern(v_root);

            if let Some(u) = prev {
                let u_root = root.get(u).map(String::as_str).unwrap_or(u);
                let weight = sep(g, v, u, reverse_sep);
                let u_ix = bg.intern(u_root);
                let v_ix = bg.intern(v_root);
                bg.raise_edge(u_ix, v_ix, weight);
            }

            prev = Some(v);
        }
    }

    bg
}
