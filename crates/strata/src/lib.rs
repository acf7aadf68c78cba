//! Layered (Sugiyama-style) graph layout following dagre's pipeline.
//!
//! [`layout`] takes a [`graphlib::Graph`] of [`NodeLabel`]s and [`EdgeLabel`]s and annotates it
//! with ranks, within-rank orders, coordinates and edge routes. The individual phases are public
//! so they can be exercised on their own against a [`layout_graph::LayoutGraph`].

pub use strata_graph as graphlib;

pub mod acyclic;
pub mod coordinate_system;
pub mod error;
pub mod greedy_fas;
pub mod layout_graph;
pub mod model;
pub mod nesting;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod self_edges;
pub mod util;

pub use error::{LayoutError, Result};
pub use model::{
    Acyclicer, Align, EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point, RankDir, Ranker,
};
pub use pipeline::{MAX_MINLEN, layout};
