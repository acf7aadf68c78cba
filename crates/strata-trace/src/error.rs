use strata::LayoutError;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("{0}")]
    Usage(String),
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
