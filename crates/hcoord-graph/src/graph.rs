//! Graph container APIs used by `hcoord`.
//!
//! Baseline: `@dagrejs/graphlib`.
//!
//! This module contains the core `Graph` container plus a small set of helper algorithms
//! re-exported as `hcoord_graph::alg` for Dagre compatibility.

mod adj_cache;
pub mod alg;
mod core;
mod edge_key;
mod entries;
mod options;

pub use core::Graph;
pub use edge_key::EdgeKey;
pub use options::GraphOptions;
