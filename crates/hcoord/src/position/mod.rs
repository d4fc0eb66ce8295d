//! Horizontal coordinate assignment, staged the way the algorithm itself is staged: a pure
//! separation function, conflict detection, vertical alignment, block-graph compaction, and the
//! orchestrator that runs all four biased alignments and balances them.

pub mod bk;

pub use bk::position_x;
