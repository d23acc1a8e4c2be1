//! Top-level OVF/OMF reader.
//!
//! Runs the header state machine, dispatches on the declared data-section
//! kind, and hands back header, field, and diagnostics together. The
//! decode is best-effort where the wild files demand it: stray bytes
//! before trailing markers are skipped and missing `End:` markers are
//! warnings, but structural header damage and truncated data abort.

use crate::cursor::LineCursor;
use crate::data;
use crate::header::{split_comment_line, HeaderParser};
use ovf_core::{DataFormat, Diagnostics, Field, Header, OvfError, ParseError, Warning};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One decoded OVF/OMF segment.
#[derive(Debug, Clone)]
pub struct OvfData {
    pub header: Header,
    pub field: Field,
    /// Content-level anomalies tolerated during the decode.
    pub warnings: Diagnostics,
}

/// Decode one OVF/OMF segment from a byte stream.
pub fn read<R: Read>(stream: R) -> Result<OvfData, ParseError> {
    let mut cursor = LineCursor::new(stream);
    let mut diag = Diagnostics::default();

    let header = HeaderParser::new().parse(&mut cursor, &mut diag)?;
    let format = expect_data_begin(&mut cursor)?;

    let field = match format {
        DataFormat::Ascii => data::decode_ascii(&mut cursor, &header, &mut diag)?,
        DataFormat::Binary4 => data::decode_binary::<f32, _>(&mut cursor, &header, &mut diag)?,
        DataFormat::Binary8 => data::decode_binary::<f64, _>(&mut cursor, &header, &mut diag)?,
    };

    consume_trailing_markers(&mut cursor, format, &mut diag)?;

    let non_finite = field.non_finite_count();
    if non_finite > 0 {
        diag.record(Warning::NonFiniteValues { count: non_finite });
    }

    Ok(OvfData {
        header,
        field,
        warnings: diag,
    })
}

/// Decode an OVF/OMF file from disk.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<OvfData, OvfError> {
    let file = File::open(path)?;
    read(BufReader::new(file)).map_err(OvfError::from)
}

fn expect_data_begin<R: Read>(cursor: &mut LineCursor<R>) -> Result<DataFormat, ParseError> {
    cursor.accept_line()?;
    let parsed = split_comment_line(cursor.current_line());
    let Some((key, value)) = parsed else {
        return Err(ParseError::MissingMarker {
            expected: "Begin: Data <kind>",
            found: cursor.current_line().to_string(),
        });
    };
    if key != "begin" {
        return Err(ParseError::MissingMarker {
            expected: "Begin: Data <kind>",
            found: cursor.current_line().to_string(),
        });
    }
    match value.as_str() {
        "data text" => Ok(DataFormat::Ascii),
        "data binary 4" => Ok(DataFormat::Binary4),
        "data binary 8" => Ok(DataFormat::Binary8),
        other => Err(ParseError::Malformed(format!(
            "unrecognized data section kind: {other:?}"
        ))),
    }
}

/// Consume `End: Data <kind>` and `End: Segment`, skipping stray bytes
/// sloppy writers leave after binary blocks. Missing trailing markers are
/// warnings, not failures.
fn consume_trailing_markers<R: Read>(
    cursor: &mut LineCursor<R>,
    format: DataFormat,
    diag: &mut Diagnostics,
) -> Result<(), ParseError> {
    let end_data = format!("data {}", format.marker().to_lowercase());
    let mut segment_seen = false;
    loop {
        if !cursor.try_accept_line()? {
            diag.record(Warning::MissingEndMarker {
                marker: format!("End: Data {}", format.marker()),
            });
            diag.record(Warning::MissingEndMarker {
                marker: "End: Segment".to_string(),
            });
            return Ok(());
        }
        match split_comment_line(cursor.current_line()) {
            Some((key, value)) if key == "end" && value == end_data => break,
            Some((key, value)) if key == "end" && value == "segment" => {
                diag.record(Warning::MissingEndMarker {
                    marker: format!("End: Data {}", format.marker()),
                });
                segment_seen = true;
                break;
            }
            // Stray byte fragments or unexpected lines; keep scanning.
            _ => continue,
        }
    }
    while !segment_seen {
        if !cursor.try_accept_line()? {
            diag.record(Warning::MissingEndMarker {
                marker: "End: Segment".to_string(),
            });
            return Ok(());
        }
        if let Some((key, value)) = split_comment_line(cursor.current_line()) {
            if key == "end" && value == "segment" {
                segment_seen = true;
            }
        }
    }
    Ok(())
}
