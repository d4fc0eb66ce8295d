//! The separation function: minimum center-to-center distance between layer-adjacent vertices.

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, LabelPos, NodeLabel};

/// Minimum horizontal distance required between `v` and `w`, with `v` to the right of `w`.
///
/// `reverse_sep` flips the sign of the label-position correction; it is set when the caller is
/// traversing layers right-to-left (the `horiz == r` bias in [`super::position_x`]).
pub fn sep(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    v: &str,
    w: &str,
    reverse_sep: bool,
) -> f64 {
    let GraphLabel {
        nodesep, edgesep, ..
    } = *g.graph();

    let v_node = g.node(v);
    let w_node = g.node(w);
    let v_width = v_node.map(|n| n.width).unwrap_or(0.0);
    let w_width = w_node.map(|n| n.width).unwrap_or(0.0);
    let v_dummy = v_node.is_some_and(|n| n.is_dummy());
    let w_dummy = w_node.is_some_and(|n| n.is_dummy());

    let mut sum = v_width / 2.0
        + if v_dummy { edgesep } else { nodesep } / 2.0
        + if w_dummy { edgesep } else { nodesep } / 2.0
        + w_width / 2.0;

    let v_delta = match v_node.and_then(|n| n.labelpos) {
        Some(LabelPos::L) => -v_width / 2.0,
        Some(LabelPos::R) => v_width / 2.0,
        _ => 0.0,
    };
    sum += if reverse_sep { v_delta } else { -v_delta };

    let w_delta = match w_node.and_then(|n| n.labelpos) {
        Some(LabelPos::L) => w_width / 2.0,
        Some(LabelPos::R) => -w_width / 2.0,
        _ => 0.0,
    };
    sum += if reverse_sep { w_delta } else { -w_delta };

    sum
}

pub fn width(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str) -> f64 {
    g.node(v).map(|n| n.width).unwrap_or(0.0)
}
