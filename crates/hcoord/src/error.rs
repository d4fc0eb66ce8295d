//! Error types returned by [`crate::position::position_x`].

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraphError),
}

/// A precondition `position_x` requires of its input graph was violated.
#[derive(Debug, thiserror::Error)]
pub enum InvalidGraphError {
    #[error(
        "node `{id}` has order {actual} but appears at position {expected} in layer {rank}"
    )]
    OrderMismatch {
        id: String,
        rank: usize,
        expected: usize,
        actual: usize,
    },
    #[error("nodesep must be finite and non-negative, got {0}")]
    InvalidNodesep(f64),
    #[error("edgesep must be finite and non-negative, got {0}")]
    InvalidEdgesep(f64),
    #[error("node `{0}` referenced by the layering is missing from the graph")]
    MissingNode(String),
}
