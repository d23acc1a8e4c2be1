//! Data-section codecs.
//!
//! Three encodings share one contract: consume exactly the samples the
//! header's shape declares, apply the version's byte-order and scaling
//! rules, and check the magic sentinel at the head of binary blocks. The
//! 4-byte and 8-byte decoders are one generic implementation over
//! [`DataScalar`]; only the element width and sentinel differ.

use crate::cursor::LineCursor;
use ovf_core::endian::{EndianScalar, Endianness};
use ovf_core::{Diagnostics, Field, Header, OvfVersion, ParseError, Warning};
use std::io::{Read, Write};

/// Sentinel written as the first value of every Binary 4 block.
pub const BINARY_4_MAGIC: f32 = 1_234_567.0;

/// Sentinel written as the first value of every Binary 8 block.
pub const BINARY_8_MAGIC: f64 = 123_456_789_012_345.0;

/// Binary element width paired with its magic sentinel.
pub(crate) trait DataScalar: EndianScalar {
    const MAGIC: Self;
}

impl DataScalar for f32 {
    const MAGIC: Self = BINARY_4_MAGIC;
}

impl DataScalar for f64 {
    const MAGIC: Self = BINARY_8_MAGIC;
}

/// Byte order of binary blocks for a structural version.
pub(crate) fn byte_order(version: OvfVersion) -> Endianness {
    match version {
        OvfVersion::V1 => Endianness::Big,
        OvfVersion::V2 => Endianness::Little,
    }
}

/// Version-1 samples are stored pre-multiplier; version 2 stores them as-is.
fn sample_scale(header: &Header) -> f64 {
    match header.version {
        OvfVersion::V1 => header.value_multiplier,
        OvfVersion::V2 => 1.0,
    }
}

fn validated_shape(header: &Header) -> Result<(usize, usize, usize), ParseError> {
    for (axis, nodes) in header.node_counts() {
        if nodes <= 0 {
            return Err(ParseError::InvalidNodeCount { axis, value: nodes });
        }
    }
    Ok((
        header.xnodes as usize,
        header.ynodes as usize,
        header.znodes as usize,
    ))
}

fn declared_valuedim(header: &Header) -> Result<usize, ParseError> {
    match header.valuedim {
        1 => Ok(1),
        3 => Ok(3),
        other => Err(ParseError::InvalidValueDim(other)),
    }
}

/// Parse one sample line. Tokens that fail to parse read as zero, and a
/// line with fewer tokens than components keeps the missing ones at zero,
/// matching the legacy reader.
fn parse_sample(line: &str, dim: usize, out: &mut [f64; 3]) {
    out.fill(0.0);
    for (slot, token) in out[..dim].iter_mut().zip(line.split_whitespace()) {
        *slot = token.parse().unwrap_or(0.0);
    }
}

/// Decode a `Data Text` section: one cell per line, z outermost and x
/// innermost, which coincides with flat storage order.
pub(crate) fn decode_ascii<R: Read>(
    cursor: &mut LineCursor<R>,
    header: &Header,
    diag: &mut Diagnostics,
) -> Result<Field, ParseError> {
    let declared = declared_valuedim(header)?;
    let (nx, ny, nz) = validated_shape(header)?;
    let cells = nx
        .checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .ok_or_else(|| {
            ParseError::Malformed(format!("grid {nx}x{ny}x{nz} is too large to allocate"))
        })?;

    if !cursor.try_accept_line()? {
        return Err(ParseError::TruncatedData {
            expected: cells,
            actual: 0,
        });
    }
    let first = cursor.current_line().to_string();
    if first.starts_with('#') {
        return Err(ParseError::TruncatedData {
            expected: cells,
            actual: 0,
        });
    }

    // The first sample line reveals the real cell arity. Scalar version-1
    // files exist in the wild even though v1 nominally forces valuedim 3.
    let observed = first.split_whitespace().count();
    let dim = if observed != declared && (observed == 1 || observed == 3) {
        diag.record(Warning::ValueDimMismatch { declared, observed });
        observed
    } else {
        declared
    };

    let mut field = Field::new(nx, ny, nz, dim)?;
    let scale = sample_scale(header);
    let mut sample = [0.0f64; 3];
    for index in 0..cells {
        if index > 0 {
            if !cursor.try_accept_line()? {
                return Err(ParseError::TruncatedData {
                    expected: cells,
                    actual: index,
                });
            }
            if cursor.current_line().starts_with('#') {
                // Hit a marker before the declared cell count was reached.
                return Err(ParseError::TruncatedData {
                    expected: cells,
                    actual: index,
                });
            }
        }
        let line = if index == 0 {
            first.as_str()
        } else {
            cursor.current_line()
        };
        parse_sample(line, dim, &mut sample);
        for component in &mut sample[..dim] {
            *component *= scale;
        }
        field.set_cell(index, &sample[..dim]);
    }
    Ok(field)
}

/// Decode a `Data Binary 4` or `Data Binary 8` section: magic sentinel,
/// then one contiguous block of fixed-width floats.
pub(crate) fn decode_binary<T: DataScalar, R: Read>(
    cursor: &mut LineCursor<R>,
    header: &Header,
    diag: &mut Diagnostics,
) -> Result<Field, ParseError> {
    let dim = declared_valuedim(header)?;
    let (nx, ny, nz) = validated_shape(header)?;
    let mut field = Field::new(nx, ny, nz, dim)?;
    let order = byte_order(header.version);

    let mut magic_buf = vec![0u8; T::WIDTH];
    let got = cursor.read_full(&mut magic_buf)?;
    if got < T::WIDTH {
        return Err(ParseError::TruncatedData {
            expected: T::WIDTH,
            actual: got,
        });
    }
    let magic = T::from_bytes(&magic_buf, order);
    if magic != T::MAGIC {
        // The format's own self-check; historically never enforced as
        // fatal, and real files with a clobbered sentinel still decode.
        diag.record(Warning::BadMagicValue {
            expected: T::MAGIC.to_f64(),
            found: magic.to_f64(),
        });
    }

    let count = field.component_count();
    let expected = count * T::WIDTH;
    let mut raw = vec![0u8; expected];
    let got = cursor.read_full(&mut raw)?;
    if got < expected {
        return Err(ParseError::TruncatedData {
            expected,
            actual: got,
        });
    }

    let mut values = vec![T::from_f64(0.0); count];
    T::read_slice_into(&raw, order, &mut values);

    let scale = sample_scale(header);
    for (dst, src) in field.components_mut().iter_mut().zip(&values) {
        *dst = src.to_f64() * scale;
    }
    Ok(field)
}

/// Encode a `Data Text` section. Values are written unscaled with Rust's
/// shortest round-trip float formatting, one cell per line.
pub(crate) fn encode_ascii<W: Write>(out: &mut W, field: &Field) -> std::io::Result<()> {
    for index in 0..field.cell_count() {
        match field.cell(index) {
            [v] => writeln!(out, "{v}")?,
            [x, y, z] => writeln!(out, "{x} {y} {z}")?,
            _ => unreachable!("cell arity is 1 or 3"),
        }
    }
    Ok(())
}

/// Encode a binary section: magic sentinel, then the flattened component
/// block, x fastest. A final newline separates the block from its `End:`
/// marker.
pub(crate) fn encode_binary<T: DataScalar, W: Write>(
    out: &mut W,
    field: &Field,
    order: Endianness,
) -> std::io::Result<()> {
    let mut magic = vec![0u8; T::WIDTH];
    T::MAGIC.put_bytes(&mut magic, order);
    out.write_all(&magic)?;

    let values: Vec<T> = field.components().iter().map(|&v| T::from_f64(v)).collect();
    let mut raw = vec![0u8; values.len() * T::WIDTH];
    T::write_slice_into(&values, order, &mut raw);
    out.write_all(&raw)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_by_version() {
        assert_eq!(byte_order(OvfVersion::V1), Endianness::Big);
        assert_eq!(byte_order(OvfVersion::V2), Endianness::Little);
    }

    #[test]
    fn test_parse_sample_permissive() {
        let mut out = [9.0f64; 3];
        parse_sample("1.5 bogus", 3, &mut out);
        assert_eq!(out, [1.5, 0.0, 0.0]);
        parse_sample("2.0 3.0 4.0 5.0", 3, &mut out);
        assert_eq!(out, [2.0, 3.0, 4.0]);
        parse_sample("7", 1, &mut out);
        assert_eq!(out[0], 7.0);
    }

    #[test]
    fn test_declared_valuedim_bounds() {
        let mut header = Header::default();
        header.valuedim = 2;
        assert!(matches!(
            declared_valuedim(&header),
            Err(ParseError::InvalidValueDim(2))
        ));
        header.valuedim = 3;
        assert_eq!(declared_valuedim(&header).unwrap(), 3);
    }

    #[test]
    fn test_negative_nodes_rejected_before_allocation() {
        let mut header = Header::default();
        header.xnodes = 2;
        header.ynodes = -1;
        header.znodes = 2;
        assert!(matches!(
            validated_shape(&header),
            Err(ParseError::InvalidNodeCount {
                axis: 'y',
                value: -1
            })
        ));
    }
}
