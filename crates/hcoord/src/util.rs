//! Small helpers shared by the coordinate-assignment core.

use crate::graphlib::Graph;
use crate::NodeLabel;

/// Builds the layering matrix `L` from each node's cached `rank`/`order`: `L[r][i]` is the id of
/// the node at layer `r`, position `i`. Nodes without a rank are omitted (they have not been
/// placed by rank assignment yet and fall outside this crate's preconditions).
pub fn build_layer_matrix<E, G>(g: &Graph<NodeLabel, E, G>) -> Vec<Vec<String>> {
    let mut min_rank: i32 = i32::MAX;
    let mut max_rank: i32 = i32::MIN;
    let mut entries: Vec<(i32, usize, String)> = Vec::new();

    for id in g.nodes() {
        let Some(node) = g.node(id) else {
            continue;
        };
        let Some(rank) = node.rank else {
            continue;
        };
        min_rank = min_rank.min(rank);
        max_rank = max_rank.max(rank);
        entries.push((rank, node.order.unwrap_or(0), id.to_string()));
    }

    if max_rank == i32::MIN {
        return Vec::new();
    }

    let shift = if min_rank < 0 { -min_rank } else { 0 };
    let len = (max_rank + shift + 1).max(0) as usize;
    let mut layers: Vec<Vec<(usize, String)>> = vec![Vec::new(); len];

    for (rank, order, id) in entries {
        let idx = (rank + shift).max(0) as usize;
        if idx < layers.len() {
            layers[idx].push((order, id));
        }
    }

    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(o, _)| *o);
            layer.into_iter().map(|(_, id)| id).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphlib::GraphOptions;
    use crate::EdgeLabel;

    #[test]
    fn build_layer_matrix_creates_a_matrix_based_on_rank_and_order_of_nodes_in_the_graph() {
        let mut g: Graph<NodeLabel, EdgeLabel, ()> = Graph::new(GraphOptions::default());
        g.set_node("a", NodeLabel::new(0, 0, 0.0));
        g.set_node("b", NodeLabel::new(0, 1, 0.0));
        g.set_node("c", NodeLabel::new(1, 0, 0.0));
        g.set_node("d", NodeLabel::new(1, 1, 0.0));
        g.set_node("e", NodeLabel::new(2, 0, 0.0));

        assert_eq!(
            build_layer_matrix(&g),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string()],
            ]
        );
    }

    #[test]
    fn build_layer_matrix_shifts_negative_ranks_to_start_at_zero() {
        let mut g: Graph<NodeLabel, EdgeLabel, ()> = Graph::new(GraphOptions::default());
        g.set_node("a", NodeLabel::new(-1, 0, 0.0));
        g.set_node("b", NodeLabel::new(0, 0, 0.0));

        assert_eq!(
            build_layer_matrix(&g),
            vec![vec!["a".to_string()], vec!["b".to_string()]]
        );
    }

    #[test]
    fn build_layer_matrix_is_empty_for_a_graph_with_no_ranked_nodes() {
        let g: Graph<NodeLabel, EdgeLabel, ()> = Graph::new(GraphOptions::default());
        assert!(build_layer_matrix(&g).is_empty());
    }
}
