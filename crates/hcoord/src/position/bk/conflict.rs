//! Conflict detection: crossings that would force a non-straight inner segment.
//!
//! A conflict vetoes a candidate vertical alignment between two same-layer-adjacent vertices so
//! that long edges through dummy vertices ("inner segments") never bend to dodge a shorter edge.

use std::collections::{BTreeMap, BTreeSet};

use crate::graphlib::Graph;
use crate::{Dummy, EdgeLabel, GraphLabel, NodeLabel};

/// A symmetric relation over vertex ids, canonicalized by storing each pair under the
/// lexicographically smaller id so `has_conflict(a, b) == has_conflict(b, a)` always holds.
pub type Conflicts = BTreeMap<String, BTreeSet<String>>;

pub fn add_conflict(conflicts: &mut Conflicts, v: &str, w: &str) {
    let (lo, hi) = if v <= w { (v, w) } else { (w, v) };
    conflicts
        .entry(lo.to_string())
        .or_default()
        .insert(hi.to_string());
}

pub fn has_conflict(conflicts: &Conflicts, v: &str, w: &str) -> bool {
    let (lo, hi) = if v <= w { (v, w) } else { (w, v) };
    conflicts.get(lo).is_some_and(|ws| ws.contains(hi))
}

/// If `v` is a dummy, its unique dummy predecessor — the other end of the inner segment `v` sits
/// on. `None` for real vertices, and for dummies with no dummy predecessor.
pub fn find_other_inner_segment_node(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    v: &str,
) -> Option<String> {
    if !g.node(v).is_some_and(|n| n.is_dummy()) {
        return None;
    }
    g.predecessors(v)
        .into_iter()
        .find(|u| g.node(u).is_some_and(|n| n.is_dummy()))
        .map(str::to_string)
}

/// Crossings between a non-inner segment and an inner segment. The inner segment must stay
/// straight, so any predecessor landing outside the bracketing interval of the current inner
/// segment conflicts with it.
pub fn find_type1_conflicts(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &[Vec<String>],
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    if layering.len() < 2 {
        return conflicts;
    }

    for i in 1..layering.len() {
        let prev_layer = &layering[i - 1];
        let layer = &layering[i];

        let mut k0 = 0usize;
        let mut scan_pos = 0usize;
        let prev_layer_len = prev_layer.len();
        let last = layer.last().map(String::as_str);

        for (idx, v) in layer.iter().enumerate() {
            let w = find_other_inner_segment_node(g, v);
            let k1 = w
                .as_deref()
                .and_then(|w| g.node(w))
                .and_then(|n| n.order)
                .unwrap_or(prev_layer_len);

            if w.is_some() || last == Some(v.as_str()) {
                for s in &layer[scan_pos..=idx] {
                    let s_dummy = g.node(s).is_some_and(|n| n.is_dummy());
                    for u in g.predecessors(s) {
                        let Some(u_node) = g.node(u) else {
                            continue;
                        };
                        let u_pos = u_node.order.unwrap_or(0);
                        if (u_pos < k0 || u_pos > k1) && !(u_node.is_dummy() && s_dummy) {
                            add_conflict(&mut conflicts, u, s);
                        }
                    }
                }
                scan_pos = idx + 1;
                k0 = k1;
            }
        }
    }

    conflicts
}

/// Crossings between two inner segments. `"border"` dummies act as waypoints that reset the
/// bracketing window as soon as they're encountered on the south layer.
pub fn find_type2_conflicts(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &[Vec<String>],
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    if layering.len() < 2 {
        return conflicts;
    }

    fn scan(
        g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
        conflicts: &mut Conflicts,
        south: &[String],
        lo: usize,
        hi: usize,
        nb_l: isize,
        nb_r: isize,
    ) {
        for v in &south[lo..hi] {
            if !g.node(v).is_some_and(|n| n.is_dummy()) {
                continue;
            }
            for u in g.predecessors(v) {
                let Some(u_node) = g.node(u) else {
                    continue;
                };
                if u_node.is_dummy() {
                    let u_order = u_node.order.unwrap_or(0) as isize;
                    if u_order < nb_l || u_order > nb_r {
                        add_conflict(conflicts, u, v);
                    }
                }
            }
        }
    }

    for i in 1..layering.len() {
        let north = &layering[i - 1];
        let south = &layering[i];

        let mut prev_north_pos: isize = -1;
        let mut next_north_pos: isize = -1;
        let mut south_pos = 0usize;

        for (south_lookahead, v) in south.iter().enumerate() {
            let is_border = g.node(v).is_some_and(|n| n.dummy == Some(Dummy::Border));
            if is_border {
                if let Some(u) = g.predecessors(v).first() {
                    next_north_pos = g
                        .node(u)
                        .and_then(|n| n.order)
                        .map(|o| o as isize)
                        .unwrap_or(-1);
                    scan(
                        g,
                        &mut conflicts,
                        south,
                        south_pos,
                        south_lookahead,
                        prev_north_pos,
                        next_north_pos,
                    );
                    south_pos = south_lookahead;
                    prev_north_pos = next_north_pos;
                }
            }
            scan(
                g,
                &mut conflicts,
                south,
                south_pos,
                south.len(),
                next_north_pos,
                north.len() as isize,
            );
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphlib::GraphOptions;

    fn new_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
        let mut g = Graph::new(GraphOptions::default());
        g.set_graph(GraphLabel::default());
        g
    }

    fn set_node(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, id: &str, rank: i32, order: usize) {
        g.set_node(
            id,
            NodeLabel {
                rank: Some(rank),
                order: Some(order),
                ..Default::default()
            },
        );
    }

    #[test]
    fn has_conflict_is_symmetric() {
        let mut conflicts = Conflicts::default();
        add_conflict(&mut conflicts, "b", "a");
        assert!(has_conflict(&conflicts, "a", "b"));
        assert!(has_conflict(&conflicts, "b", "a"));
    }

    #[test]
    fn inner_segments_are_never_type1_conflicts() {
        let mut g = new_graph();
        set_node(&mut g, "a", 0, 0);
        set_node(&mut g, "b", 0, 1);
        set_node(&mut g, "c", 1, 0);
        set_node(&mut g, "d", 1, 1);
        g.set_edge("a", "d");
        g.set_edge("b", "c");
        let layering = crate::util::build_layer_matrix(&g);

        for v in ["a", "b", "c", "d"] {
            g.node_mut(v).unwrap().dummy = Some(Dummy::Edge);
        }

        let conflicts = find_type1_conflicts(&g, &layering);
        assert!(!has_conflict(&conflicts, "a", "d"));
        assert!(!has_conflict(&conflicts, "b", "c"));
    }

    #[test]
    fn crossing_a_real_edge_over_an_inner_segment_is_a_type1_conflict() {
        let mut g = new_graph();
        set_node(&mut g, "a", 0, 0);
        set_node(&mut g, "b", 0, 1);
        set_node(&mut g, "c", 1, 0);
        set_node(&mut g, "d", 1, 1);
        g.set_edge("a", "d");
        g.set_edge("b", "c");
        let layering = crate::util::build_layer_matrix(&g);

        for v in ["b", "c", "d"] {
            g.node_mut(v).unwrap().dummy = Some(Dummy::Edge);
        }

        let conflicts = find_type1_conflicts(&g, &layering);
        assert!(has_conflict(&conflicts, "a", "d"));
        assert!(!has_conflict(&conflicts, "b", "c"));
    }

    #[test]
    fn crossing_inner_segments_favor_the_border_segment() {
        let mut g = new_graph();
        set_node(&mut g, "a", 0, 0);
        set_node(&mut g, "b", 0, 1);
        set_node(&mut g, "c", 1, 0);
        set_node(&mut g, "d", 1, 1);
        g.set_edge("a", "d");
        g.set_edge("b", "c");
        let layering = crate::util::build_layer_matrix(&g);

        for v in ["a", "d"] {
            g.node_mut(v).unwrap().dummy = Some(Dummy::Edge);
        }
        for v in ["b", "c"] {
            g.node_mut(v).unwrap().dummy = Some(Dummy::Border);
        }

        let conflicts = find_type2_conflicts(&g, &layering);
        assert!(has_conflict(&conflicts, "a", "d"));
        assert!(!has_conflict(&conflicts, "b", "c"));
    }
}
