//! Horizontal coordinate assignment for layered graph drawings.
//!
//! Implements Brandes & Köpf's "Fast and Simple Horizontal Coordinate Assignment": given a graph
//! whose vertices already carry a rank, a per-rank order and a width, [`position::position_x`]
//! assigns every vertex an x-coordinate so that same-layer vertices respect `nodesep`/`edgesep`
//! and long edges through dummy vertices run as straight as the layering allows.
//!
//! Rank assignment, cross-minimization, edge routing and rank-direction transforms are the
//! caller's responsibility; this crate only consumes an already-layered [`graphlib::Graph`].

pub use hcoord_graph as graphlib;

pub mod error;
pub mod position;
pub mod util;

pub use error::{Error, InvalidGraphError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLabel {
    pub nodesep: f64,
    pub edgesep: f64,
    /// Forces `position_x`'s [`position::bk::balance`] to return one specific biased alignment
    /// instead of averaging the four candidates.
    pub align: Option<Alignment>,
}

impl GraphLabel {
    pub fn new(nodesep: f64, edgesep: f64) -> Self {
        Self {
            nodesep,
            edgesep,
            align: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Alignment {
    pub fn key(self) -> &'static str {
        match self {
            Alignment::UpLeft => "ul",
            Alignment::UpRight => "ur",
            Alignment::DownLeft => "dl",
            Alignment::DownRight => "dr",
        }
    }
}

/// How a node participates in the layering: an ordinary node, an inserted dummy on a long edge,
/// or a dummy capping a compound-subgraph border.
///
/// Upstream Dagre represents this with a four-way stringly-typed `dummy` attribute (`false`, a
/// truthy edge-label string, `"border"`, `"borderLeft"`/`"borderRight"`); this splits it into a
/// typed enum plus the separate [`Side`] carried on [`NodeLabel::border_side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dummy {
    /// A node inserted to split a long edge across intermediate ranks.
    Edge,
    /// A node capping a compound-subgraph boundary, consulted only by type-2 conflict detection.
    Border,
}

/// Which side of a compound subgraph a border node caps. Consulted by horizontal compaction's
/// second (maximizing) sweep to decide whether a node's position may be pulled rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPos {
    #[default]
    C,
    L,
    R,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub width: f64,
    pub dummy: Option<Dummy>,
    pub border_side: Option<Side>,
    pub labelpos: Option<LabelPos>,
}

impl NodeLabel {
    pub fn new(rank: i32, order: usize, width: f64) -> Self {
        Self {
            rank: Some(rank),
            order: Some(order),
            width,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

/// Edge payload. The coordinate-assignment core only consumes edges as adjacency, never reading
/// this label; it exists so the host graph carries a concrete, non-unit edge type end to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLabel {
    pub weight: f64,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}
