//! Header block parser.
//!
//! A tagged state machine over `# Key: Value` comment lines. The `Header`
//! is a pure output value: the machine consumes lines from the cursor,
//! dispatches keys through one static `match`, and hands back the finished
//! record once `End: Header` has been seen.

use crate::cursor::LineCursor;
use ovf_core::{Diagnostics, Header, OvfVersion, ParseError, Warning};
use std::io::Read;

/// Accepted first lines, with the version each one selects.
///
/// The colon-less `# OOMMF OVF 2.0` spelling appears in files written by
/// at least one simulator and is accepted alongside the canonical forms.
const MAGIC_LINES: [(&str, OvfVersion); 3] = [
    ("# OOMMF: OVF 2.0", OvfVersion::V2),
    ("# OOMMF: rectangular mesh v1.0", OvfVersion::V1),
    ("# OOMMF OVF 2.0", OvfVersion::V2),
];

/// Parser position within the comment shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectMagic,
    ExpectSegmentCount,
    ExpectBeginSegment,
    ExpectBeginHeader,
    InHeader,
    Done,
}

/// Split a comment line into normalized key and value.
///
/// The key is everything between the leading `#` and the first `:`, the
/// value everything after; both are lower-cased, trimmed, and have internal
/// whitespace collapsed. Returns `None` for non-comment lines; a missing
/// `:` yields an empty value.
pub(crate) fn split_comment_line(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix('#')?;
    match rest.split_once(':') {
        Some((key, value)) => Some((normalize(key), normalize(value))),
        None => Some((normalize(rest), String::new())),
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Permissive numeric coercion: unparseable text reads as zero, matching
/// the legacy reader. Callers wanting strict validation must post-check.
fn parse_float(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

fn parse_int(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

fn missing(expected: &'static str, found: &str) -> ParseError {
    ParseError::MissingMarker {
        expected,
        found: found.to_string(),
    }
}

pub(crate) struct HeaderParser {
    state: ParseState,
    header: Header,
}

impl HeaderParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::ExpectMagic,
            header: Header::default(),
        }
    }

    /// Drive the state machine until `End: Header` has been consumed.
    pub fn parse<R: Read>(
        mut self,
        cursor: &mut LineCursor<R>,
        diag: &mut Diagnostics,
    ) -> Result<Header, ParseError> {
        while self.state != ParseState::Done {
            cursor.accept_line()?;
            self.step(cursor.current_line(), diag)?;
        }
        // Version-1 files never carry valuedim; they are always 3-vector.
        if self.header.version == OvfVersion::V1 {
            self.header.valuedim = 3;
        }
        Ok(self.header)
    }

    fn step(&mut self, line: &str, diag: &mut Diagnostics) -> Result<(), ParseError> {
        match self.state {
            ParseState::ExpectMagic => {
                match MAGIC_LINES.iter().find(|(text, _)| *text == line) {
                    Some((_, version)) => {
                        self.header.version = *version;
                        self.state = ParseState::ExpectSegmentCount;
                        Ok(())
                    }
                    None => Err(ParseError::InvalidMagicLine(line.to_string())),
                }
            }
            ParseState::ExpectSegmentCount => {
                let (key, value) =
                    split_comment_line(line).ok_or_else(|| missing("Segment count", line))?;
                if key != "segment count" {
                    return Err(missing("Segment count", line));
                }
                let count = parse_int(&value);
                if count != 1 {
                    diag.record(Warning::SegmentCountNotOne { count });
                }
                self.state = ParseState::ExpectBeginSegment;
                Ok(())
            }
            ParseState::ExpectBeginSegment => {
                self.expect_marker(line, "begin", "segment", "Begin: Segment")?;
                self.state = ParseState::ExpectBeginHeader;
                Ok(())
            }
            ParseState::ExpectBeginHeader => {
                self.expect_marker(line, "begin", "header", "Begin: Header")?;
                self.state = ParseState::InHeader;
                Ok(())
            }
            ParseState::InHeader => {
                let Some((key, value)) = split_comment_line(line) else {
                    diag.record(Warning::SkippedHeaderLine {
                        line: line.to_string(),
                    });
                    return Ok(());
                };
                if key == "end" && value == "header" {
                    self.state = ParseState::Done;
                    return Ok(());
                }
                self.apply_key(&key, &value, diag);
                Ok(())
            }
            ParseState::Done => unreachable!("parser resumed after End: Header"),
        }
    }

    fn expect_marker(
        &self,
        line: &str,
        key: &str,
        value: &str,
        expected: &'static str,
    ) -> Result<(), ParseError> {
        match split_comment_line(line) {
            Some((k, v)) if k == key && v == value => Ok(()),
            _ => Err(missing(expected, line)),
        }
    }

    /// Key dispatch. The match arm set is the static key table; unknown
    /// keys fall through to a diagnostic and are otherwise skipped, so
    /// files from newer writers stay readable.
    fn apply_key(&mut self, key: &str, value: &str, diag: &mut Diagnostics) {
        let header = &mut self.header;
        match key {
            "title" => header.title = value.to_string(),
            "desc" => header.desc.push(value.to_string()),
            "meshunit" => header.mesh_unit = value.to_string(),
            "valueunit" => header.value_unit = value.to_string(),
            "valuemultiplier" => header.value_multiplier = parse_float(value),
            "xmin" => header.xmin = parse_float(value),
            "ymin" => header.ymin = parse_float(value),
            "zmin" => header.zmin = parse_float(value),
            "xmax" => header.xmax = parse_float(value),
            "ymax" => header.ymax = parse_float(value),
            "zmax" => header.zmax = parse_float(value),
            "valuedim" => header.valuedim = parse_int(value),
            "valueunits" => header.value_units.push(value.to_string()),
            "valuelabels" => header.value_labels.push(value.to_string()),
            "valuerangeminmag" => header.value_range_min_mag = parse_float(value),
            "valuerangemaxmag" => header.value_range_max_mag = parse_float(value),
            "meshtype" => header.mesh_type = value.to_string(),
            "xbase" => header.xbase = parse_float(value),
            "ybase" => header.ybase = parse_float(value),
            "zbase" => header.zbase = parse_float(value),
            "xstepsize" => header.xstepsize = parse_float(value),
            "ystepsize" => header.ystepsize = parse_float(value),
            "zstepsize" => header.zstepsize = parse_float(value),
            "xnodes" => header.xnodes = parse_int(value),
            "ynodes" => header.ynodes = parse_int(value),
            "znodes" => header.znodes = parse_int(value),
            _ => diag.record(Warning::UnknownHeaderKey {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}
