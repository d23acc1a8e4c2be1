//! Non-fatal decode diagnostics.
//!
//! Real-world OVF files are frequently imperfect: stray trailing markers,
//! corrupted binary sentinels, keys from newer writers. The reader keeps
//! decoding through all of these and reports them here, so callers decide
//! for themselves how suspicious a file has to be before they drop it.

use serde::Serialize;
use std::fmt;

/// One content-level anomaly observed while decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Warning {
    /// Binary sentinel did not match the expected constant.
    BadMagicValue { expected: f64, found: f64 },
    /// Header key this reader does not know; recorded and skipped.
    UnknownHeaderKey { key: String, value: String },
    /// A trailing `End:` marker was absent at end of stream.
    MissingEndMarker { marker: String },
    /// Non-comment line inside the header block, skipped.
    SkippedHeaderLine { line: String },
    /// `Segment count` other than 1; only the first segment is read.
    SegmentCountNotOne { count: i64 },
    /// ASCII data arity disagreed with the declared `valuedim`.
    ValueDimMismatch { declared: usize, observed: usize },
    /// Decoded samples contain NaN or infinite components.
    NonFiniteValues { count: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::BadMagicValue { expected, found } => {
                write!(f, "wrong magic value: expected {expected}, found {found}")
            }
            Warning::UnknownHeaderKey { key, value } => {
                write!(f, "unknown header key {key:?} with value {value:?}")
            }
            Warning::MissingEndMarker { marker } => {
                write!(f, "missing trailing marker {marker:?}")
            }
            Warning::SkippedHeaderLine { line } => {
                write!(f, "skipped erroneous header line {line:?}")
            }
            Warning::SegmentCountNotOne { count } => {
                write!(f, "segment count is {count}, only the first segment is read")
            }
            Warning::ValueDimMismatch { declared, observed } => {
                write!(
                    f,
                    "header declares valuedim {declared} but data lines hold {observed} value(s)"
                )
            }
            Warning::NonFiniteValues { count } => {
                write!(f, "{count} non-finite sample component(s)")
            }
        }
    }
}

/// Ordered collection of warnings from one decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, mirroring it onto the log facade.
    pub fn record(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
