//! Error types for ovfkit

use thiserror::Error;

/// Top-level error type for ovfkit operations
#[derive(Debug, Error)]
pub enum OvfError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors during OVF/OMF decoding
///
/// Only structural and allocation failures live here. Content-level
/// anomalies (unknown header keys, binary sentinel mismatches) are
/// reported as [`crate::diag::Warning`]s and never abort a read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unrecognized first line: {0:?}")]
    InvalidMagicLine(String),

    #[error("Missing structural marker: expected {expected:?}, found {found:?}")]
    MissingMarker {
        expected: &'static str,
        found: String,
    },

    #[error("Unexpected end of stream")]
    UnexpectedEof,

    #[error("Truncated data section: expected {expected}, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("Invalid node count: {axis}nodes = {value}")]
    InvalidNodeCount { axis: char, value: i64 },

    #[error("Invalid value dimension: {0} (expected 1 or 3)")]
    InvalidValueDim(i64),

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors during OVF/OMF encoding
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Header declares {header:?} nodes but field shape is {field:?}")]
    ShapeMismatch {
        header: (i64, i64, i64),
        field: (usize, usize, usize),
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
