//! ovf-codec — reader/writer for the OVF/OMF vector-field file format
//!
//! Supports structural versions 1.0 and 2.0 and all three data encodings
//! (`Text`, `Binary 4`, `Binary 8`). The decode is deliberately tolerant
//! of the irregularities real simulator output exhibits: stray bytes after
//! binary blocks, missing trailing `End:` markers, mixed line terminators,
//! and unknown header keys all surface as diagnostics instead of failures.
//!
//! ## File layout
//!
//! ```text
//! # OOMMF: OVF 2.0                (or "# OOMMF: rectangular mesh v1.0")
//! # Segment count: 1
//! # Begin: Segment
//! # Begin: Header
//! # <Key>: <Value>                (one per line)
//! # End: Header
//! # Begin: Data <Text|Binary 4|Binary 8>
//! <data, encoding-specific>
//! # End: Data <Text|Binary 4|Binary 8>
//! # End: Segment
//! ```
//!
//! Binary blocks open with a fixed sentinel value (1234567.0 at 4-byte
//! width, 123456789012345.0 at 8-byte width), big-endian for version 1 and
//! little-endian for version 2, followed by the flattened sample block with
//! x varying fastest.

pub mod cursor;
pub mod data;
pub mod header;
pub mod reader;
pub mod writer;

// Re-export main types
pub use cursor::LineCursor;
pub use data::{BINARY_4_MAGIC, BINARY_8_MAGIC};
pub use reader::{read, read_file, OvfData};
pub use writer::{write, write_file};
