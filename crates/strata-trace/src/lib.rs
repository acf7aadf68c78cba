//! Layout trace harness.
//!
//! Builds the example flowchart from [`fixture`], lays it out with `strata`, and reports where
//! every node landed: its coordinates, its rank, and its order within the rank.

pub mod error;
pub mod fixture;
pub mod report;

pub use error::TraceError;

use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Lays out the example graph and writes the report in `format` to `out`.
pub fn run(format: OutputFormat, out: &mut impl Write) -> Result<(), TraceError> {
    let mut g = fixture::complex_graph();
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "laying out example graph"
    );
    strata::layout(&mut g)?;

    match format {
        OutputFormat::Text => write!(out, "{}", report::Report(&g))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report::snapshot(&g))?;
            writeln!(out)?;
        }
    }
    Ok(())
}
