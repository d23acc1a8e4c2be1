//! Top-level OVF/OMF writer.
//!
//! Mirrors the reader in the forward direction with no ambiguity: the
//! caller picks the data format explicitly. The informational value-range
//! fields are recomputed from the field rather than trusted from the
//! caller, and version-1 headers are written with a unit `valuemultiplier`
//! because samples are emitted unscaled.

use crate::data;
use ovf_core::{DataFormat, Field, Header, OvfError, OvfVersion, SerializeError};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode a header/field pair in the requested data format.
pub fn write<W: Write>(
    mut out: W,
    header: &Header,
    field: &Field,
    format: DataFormat,
) -> Result<(), SerializeError> {
    validate(header, field)?;
    let (min_mag, max_mag) = field.min_max_magnitude();

    let magic_value = match header.version {
        OvfVersion::V1 => "rectangular mesh v1.0",
        OvfVersion::V2 => "OVF 2.0",
    };
    line(&mut out, "OOMMF", magic_value)?;
    line(&mut out, "Segment count", 1)?;
    line(&mut out, "Begin", "Segment")?;
    line(&mut out, "Begin", "Header")?;
    line(&mut out, "Title", &header.title)?;
    for desc in &header.desc {
        line(&mut out, "Desc", desc)?;
    }
    line(&mut out, "meshunit", &header.mesh_unit)?;
    line(&mut out, "valueunit", &header.value_unit)?;
    if header.version == OvfVersion::V1 {
        line(&mut out, "valuemultiplier", 1.0)?;
    }
    line(&mut out, "xmin", header.xmin)?;
    line(&mut out, "ymin", header.ymin)?;
    line(&mut out, "zmin", header.zmin)?;
    line(&mut out, "xmax", header.xmax)?;
    line(&mut out, "ymax", header.ymax)?;
    line(&mut out, "zmax", header.zmax)?;
    line(&mut out, "ValueRangeMaxMag", max_mag)?;
    line(&mut out, "ValueRangeMinMag", min_mag)?;
    line(&mut out, "meshtype", &header.mesh_type)?;
    line(&mut out, "xbase", header.xbase)?;
    line(&mut out, "ybase", header.ybase)?;
    line(&mut out, "zbase", header.zbase)?;
    line(&mut out, "xstepsize", header.xstepsize)?;
    line(&mut out, "ystepsize", header.ystepsize)?;
    line(&mut out, "zstepsize", header.zstepsize)?;
    line(&mut out, "xnodes", header.xnodes)?;
    line(&mut out, "ynodes", header.ynodes)?;
    line(&mut out, "znodes", header.znodes)?;
    if header.version == OvfVersion::V2 {
        line(&mut out, "valuedim", field.value_dim())?;
        for unit in &header.value_units {
            line(&mut out, "valueunits", unit)?;
        }
        for label in &header.value_labels {
            line(&mut out, "valuelabels", label)?;
        }
    }
    line(&mut out, "End", "Header")?;

    let marker = format.marker();
    line(&mut out, "Begin", format!("Data {marker}"))?;
    match format {
        DataFormat::Ascii => data::encode_ascii(&mut out, field)?,
        DataFormat::Binary4 => {
            data::encode_binary::<f32, _>(&mut out, field, data::byte_order(header.version))?
        }
        DataFormat::Binary8 => {
            data::encode_binary::<f64, _>(&mut out, field, data::byte_order(header.version))?
        }
    }
    line(&mut out, "End", format!("Data {marker}"))?;
    line(&mut out, "End", "Segment")?;
    Ok(())
}

/// Encode to a file on disk.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    header: &Header,
    field: &Field,
    format: DataFormat,
) -> Result<(), OvfError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write(&mut out, header, field, format)?;
    out.flush().map_err(OvfError::from)
}

fn line<W: Write>(out: &mut W, key: &str, value: impl Display) -> std::io::Result<()> {
    writeln!(out, "# {key}: {value}")
}

fn validate(header: &Header, field: &Field) -> Result<(), SerializeError> {
    let shape = field.shape();
    let declared = (header.xnodes, header.ynodes, header.znodes);
    if declared != (shape.0 as i64, shape.1 as i64, shape.2 as i64) {
        return Err(SerializeError::ShapeMismatch {
            header: declared,
            field: shape,
        });
    }
    Ok(())
}
