use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("node `{node}` has invalid size {width}x{height}")]
    InvalidNodeSize {
        node: String,
        width: f64,
        height: f64,
    },

    #[error("edge `{v}` -> `{w}` has invalid weight {weight}")]
    InvalidEdgeWeight { v: String, w: String, weight: f64 },

    #[error("edge `{v}` -> `{w}` has minlen {minlen}, which would push ranks out of range")]
    InvalidMinlen { v: String, w: String, minlen: u32 },

    #[error("graph option `{field}` has invalid value {value}")]
    InvalidSpacing { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
