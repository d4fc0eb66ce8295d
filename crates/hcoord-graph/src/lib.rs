//! Graph container APIs used by `hcoord`.
//!
//! Baseline: `@dagrejs/graphlib`.

mod graph;

pub use graph::alg;
pub use graph::{EdgeKey, Graph, GraphOptions};
