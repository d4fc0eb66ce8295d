//! Horizontal compaction: two sweeps over the block graph that assign each block an x-coordinate.
//!
//! Pass 1 pushes every block as far left as its in-edges allow (minimizing). Pass 2 then pulls
//! each block as far right as its out-edges allow (reclaiming slack), except on the side a
//! subgraph border is protecting from widening. Both sweeps run over an explicit stack rather
//! than native recursion, since a block-graph chain can be as long as the input's rank count.

use rustc_hash::FxHashMap as HashMap;
use tracing::debug;

use super::block_graph::{build_block_graph, BlockGraph};
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel, Side};

pub fn horizontal_compaction(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &[Vec<String>],
    root: &HashMap<String, String>,
    align: &HashMap<String, String>,
    reverse_sep: bool,
) -> HashMap<String, f64> {
    let block_g = build_block_graph(g, layering, root, reverse_sep);
    let avoid_side = if reverse_sep { Side::Left } else { Side::Right };

    debug!(blocks = block_g.node_count(), "compaction: pass 1 (push left)");
    let mut xs = vec![0.0f64; block_g.node_count()];
    sweep_minimize(&block_g, &mut xs);

    debug!(blocks = block_g.node_count(), "compaction: pass 2 (pull right)");
    sweep_maximize(g, &block_g, &mut xs, avoid_side);

    let mut out = HashMap::default();
    for v in align.keys() {
        let r = root.get(v).map(String::as_str).unwrap_or(v.as_str());
        let x = block_g.index(r).map(|ix| xs[ix]).unwrap_or(0.0);
        out.insert(v.clone(), x);
    }
    out
}

/// Pass 1: push-left. A block with no in-edges settles at 0; otherwise at the tightest bound
/// any in-edge demands.
fn sweep_minimize(block_g: &BlockGraph, xs: &mut [f64]) {
    let n = block_g.node_count();
    let mut visited = vec![false; n];

    for start in 0..n {
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if visited[v] {
                let mut best = 0.0f64;
                for &(p, w) in block_g.in_edges(v) {
                    best = best.max(xs[p] + w);
                }
                xs[v] = best;
                continue;
            }
            visited[v] = true;
            stack.push(v);
            for &(p, _) in block_g.in_edges(v) {
                stack.push(p);
            }
        }
    }
}

/// Pass 2: pull-right. Raises each block to the loosest bound its out-edges allow, unless the
/// block is a subgraph border on the side this sweep is meant to leave alone.
fn sweep_maximize(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    block_g: &BlockGraph,
    xs: &mut [f64],
    avoid_side: Side,
) {
    let n = block_g.node_count();
    let mut visited = vec![false; n];

    for start in 0..n {
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if visited[v] {
                let mut min = f64::INFINITY;
                for &(q, w) in block_g.out_edges(v) {
                    min = min.min(xs[q] - w);
                }
                if min.is_finite() {
                    let border_side = g.node(block_g.id(v)).and_then(|n| n.border_side);
                    if border_side != Some(avoid_side) {
                        xs[v] = xs[v].max(min);
                    }
                }
                continue;
            }
            visited[v] = true;
            stack.push(v);
            for &(q, _) in block_g.out_edges(v) {
                stack.push(q);
            }
        }
    }
}
