//! Brandes & Köpf horizontal coordinate assignment.
//!
//! [`position_x`] is the entry point: it runs conflict detection once, then vertical alignment
//! and horizontal compaction for each of the four `(vertical, horizontal)` biases, picks the
//! narrowest result, aligns the remaining three to it, and balances the four into a single map.

mod align;
mod block_graph;
mod compaction;
mod conflict;
mod sep;

pub use align::{vertical_alignment, Alignment};
pub use compaction::horizontal_compaction;
pub use conflict::{
    add_conflict, find_other_inner_segment_node, find_type1_conflicts, find_type2_conflicts,
    has_conflict, Conflicts,
};
pub use sep::{sep, width};

use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, info_span};

use crate::error::{InvalidGraphError, Result};
use crate::graphlib::Graph;
use crate::{Alignment as BiasAlignment, EdgeLabel, GraphLabel, NodeLabel};

const BIASES: [(&str, &str); 4] = [("u", "l"), ("u", "r"), ("d", "l"), ("d", "r")];

/// Among the four biased alignments, the one with the smallest overall width
/// (`max(x + width/2) - min(x - width/2)` over all vertices), in `ul, ur, dl, dr` tie-break order.
pub fn find_smallest_width_alignment(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    xss: &HashMap<String, HashMap<String, f64>>,
) -> HashMap<String, f64> {
    let mut best_width = f64::INFINITY;
    let mut best = HashMap::default();

    for key in ["ul", "ur", "dl", "dr"] {
        let Some(xs) = xss.get(key) else {
            continue;
        };
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for (v, x) in xs {
            let half_w = width(g, v) / 2.0;
            max = max.max(x + half_w);
            min = min.min(x - half_w);
        }
        let w = max - min;
        if w < best_width {
            best_width = w;
            best = xs.clone();
        }
    }

    best
}

/// Shifts each of the four alignments so it shares `align_to`'s leftmost (for `l` biases) or
/// rightmost (for `r` biases) extent, making the four directly comparable for balancing.
pub fn align_coordinates(
    xss: &mut HashMap<String, HashMap<String, f64>>,
    align_to: &HashMap<String, f64>,
) {
    let align_to_min = align_to.values().copied().fold(f64::INFINITY, f64::min);
    let align_to_max = align_to
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    for (vert, horiz) in BIASES {
        let key = format!("{vert}{horiz}");
        let Some(xs) = xss.get(&key).cloned() else {
            continue;
        };

        let xs_min = xs.values().copied().fold(f64::INFINITY, f64::min);
        let xs_max = xs.values().copied().fold(f64::NEG_INFINITY, f64::max);

        let delta = if horiz == "l" {
            align_to_min - xs_min
        } else {
            align_to_max - xs_max
        };

        if delta != 0.0 {
            xss.insert(key, xs.into_iter().map(|(v, x)| (v, x + delta)).collect());
        }
    }
}

/// Collapses the four aligned maps into one. With `align` set, returns that single biased
/// alignment unchanged; otherwise averages the two middle values of each vertex's four x's.
pub fn balance(
    xss: &HashMap<String, HashMap<String, f64>>,
    align: Option<BiasAlignment>,
) -> HashMap<String, f64> {
    let Some(xs_ul) = xss.get("ul") else {
        return HashMap::default();
    };

    let mut out = HashMap::default();
    for v in xs_ul.keys() {
        if let Some(align) = align {
            let x = xss
                .get(align.key())
                .and_then(|xs| xs.get(v))
                .copied()
                .unwrap_or(0.0);
            out.insert(v.clone(), x);
            continue;
        }

        let mut vals: Vec<f64> = xss.values().filter_map(|xs| xs.get(v).copied()).collect();
        vals.sort_by(f64::total_cmp);
        out.insert(v.clone(), (vals[1] + vals[2]) / 2.0);
    }
    out
}

fn validate(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) -> Result<()> {
    let graph_label = g.graph();
    if !graph_label.nodesep.is_finite() || graph_label.nodesep < 0.0 {
        return Err(InvalidGraphError::InvalidNodesep(graph_label.nodesep).into());
    }
    if !graph_label.edgesep.is_finite() || graph_label.edgesep < 0.0 {
        return Err(InvalidGraphError::InvalidEdgesep(graph_label.edgesep).into());
    }

    for (rank, layer) in layering.iter().enumerate() {
        for (expected, id) in layer.iter().enumerate() {
            let node = g
                .node(id)
                .ok_or_else(|| InvalidGraphError::MissingNode(id.clone()))?;
            let actual = node.order.unwrap_or(usize::MAX);
            if actual != expected {
                return Err(InvalidGraphError::OrderMismatch {
                    id: id.clone(),
                    rank,
                    expected,
                    actual,
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Assigns every vertex in `g` an x-coordinate. `g`'s nodes must already carry a `rank` and
/// `order` consistent with a layer-by-layer ordering (see [`crate::util::build_layer_matrix`]).
pub fn position_x(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<HashMap<String, f64>> {
    let span = info_span!("position_x");
    let _enter = span.enter();

    let layering = crate::util::build_layer_matrix(g);
    validate(g, &layering)?;

    let mut conflicts = find_type1_conflicts(g, &layering);
    let type2 = find_type2_conflicts(g, &layering);
    for (v, ws) in type2 {
        for w in ws {
            add_conflict(&mut conflicts, &v, &w);
        }
    }

    let mut xss: HashMap<String, HashMap<String, f64>> = HashMap::default();

    for vert in ["u", "d"] {
        let mut adjusted_layering = if vert == "u" {
            layering.clone()
        } else {
            layering.iter().cloned().rev().collect::<Vec<_>>()
        };

        for horiz in ["l", "r"] {
            if horiz == "r" {
                adjusted_layering = adjusted_layering
                    .iter()
                    .map(|layer| layer.iter().cloned().rev().collect())
                    .collect();
            }

            let neighbor_fn = |v: &str| -> Vec<String> {
                if vert == "u" {
                    g.predecessors(v)
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                } else {
                    g.successors(v).into_iter().map(str::to_string).collect()
                }
            };

            let aligned = vertical_alignment(g, &adjusted_layering, &conflicts, neighbor_fn);
            let mut xs = horizontal_compaction(
                g,
                &adjusted_layering,
                &aligned.root,
                &aligned.align,
                horiz == "r",
            );
            if horiz == "r" {
                for x in xs.values_mut() {
                    *x = -*x;
                }
            }

            debug!(vert, horiz, nodes = xs.len(), "computed biased alignment");
            xss.insert(format!("{vert}{horiz}"), xs);
        }
    }

    let smallest = find_smallest_width_alignment(g, &xss);
    align_coordinates(&mut xss, &smallest);
    Ok(balance(&xss, g.graph().align))
}
