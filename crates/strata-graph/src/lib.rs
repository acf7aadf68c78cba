//! Graph container APIs used by `strata`.
//!
//! The container follows the shape of dagre's graphlib: string node ids, optional edge names for
//! multigraphs, and labels attached to nodes, edges and the graph itself. Iteration always follows
//! insertion order.

mod edge_key;
mod graph;

pub mod alg;

pub use edge_key::EdgeKey;
pub use graph::{Graph, GraphOptions};
