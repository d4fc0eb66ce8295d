//! Vertical alignment: greedily groups each layer's vertices into single-column blocks with
//! their median neighbor on the adjacent layer, skipping any pairing the conflict set vetoes.

use rustc_hash::FxHashMap as HashMap;

use super::conflict::{has_conflict, Conflicts};
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

/// The block structure produced by [`vertical_alignment`]: `root` maps each vertex to its
/// block's representative, `align` threads each block into a single cycle (follow `align`
/// repeatedly from any member to visit the whole block and return to the start).
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub root: HashMap<String, String>,
    pub align: HashMap<String, String>,
}

/// `layering` must already be oriented for the bias being computed (layers reversed for the
/// "down" vertical bias, each layer reversed in place for the "right" horizontal bias) and
/// `neighbor_fn` must look up the matching side (predecessors for "up", successors for "down").
pub fn vertical_alignment<F>(
    _g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &[Vec<String>],
    conflicts: &Conflicts,
    neighbor_fn: F,
) -> Alignment
where
    F: Fn(&str) -> Vec<String>,
{
    let mut root: HashMap<String, String> = HashMap::default();
    let mut align: HashMap<String, String> = HashMap::default();
    let mut pos: HashMap<String, usize> = HashMap::default();

    for layer in layering {
        for (order, v) in layer.iter().enumerate() {
            root.insert(v.clone(), v.clone());
            align.insert(v.clone(), v.clone());
            pos.insert(v.clone(), order);
        }
    }

    for layer in layering {
        let mut prev_idx: isize = -1;
        for v in layer {
            let mut ws = neighbor_fn(v);
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|w| pos.get(w).copied().unwrap_or(usize::MAX));

            let mid = (ws.len() - 1) as f64 / 2.0;
            let lo = mid.floor() as usize;
            let hi = mid.ceil() as usize;

            for w in &ws[lo..=hi] {
                let w_pos = pos.get(w).copied().unwrap_or(usize::MAX) as isize;
                if align[v] == *v && prev_idx < w_pos && !has_conflict(conflicts, v, w) {
                    let w_root = root[w].clone();
                    align.insert(w.clone(), v.clone());
                    align.insert(v.clone(), w_root.clone());
                    root.insert(v.clone(), w_root);
                    prev_idx = w_pos;
                }
            }
        }
    }

    Alignment { root, align }
}
