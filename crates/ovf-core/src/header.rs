//! OVF/OMF header record and format selectors.

use serde::{Deserialize, Serialize};

/// Structural version of an OVF/OMF file, fixed by its first line.
///
/// Everything version-dependent hangs off this value: the accepted header
/// keys, the byte order of binary blocks, and whether `valuemultiplier`
/// scales the decoded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OvfVersion {
    V1,
    V2,
}

impl OvfVersion {
    pub fn number(self) -> u32 {
        match self {
            OvfVersion::V1 => 1,
            OvfVersion::V2 => 2,
        }
    }
}

/// Data-section encoding, chosen by the writer and detected from the
/// `Begin: Data <kind>` marker by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataFormat {
    Ascii,
    Binary4,
    Binary8,
}

impl DataFormat {
    /// Marker text after `Begin: Data` / `End: Data`, as written to files.
    pub fn marker(self) -> &'static str {
        match self {
            DataFormat::Ascii => "Text",
            DataFormat::Binary4 => "Binary 4",
            DataFormat::Binary8 => "Binary 8",
        }
    }
}

/// Parsed `# Key: Value` header block of one segment.
///
/// Field names follow the file keys. Defaults mirror the legacy reader's
/// placeholder values, except `value_multiplier` which defaults to 1.0 (a
/// zero multiplier would silently zero every sample of a version-1 file
/// missing the key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub version: OvfVersion,
    pub title: String,
    /// `Desc` lines in file order.
    pub desc: Vec<String>,
    /// Per-component units, version 2 only.
    pub value_units: Vec<String>,
    /// Per-component labels, version 2 only.
    pub value_labels: Vec<String>,
    /// Spatial unit, e.g. "m".
    pub mesh_unit: String,
    /// Sample unit, e.g. "a/m".
    pub value_unit: String,
    /// Version-1 scale factor applied to every decoded sample.
    pub value_multiplier: f64,
    pub xmin: f64,
    pub ymin: f64,
    pub zmin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub zmax: f64,
    /// Informational; recomputed from the field on write.
    pub value_range_max_mag: f64,
    pub value_range_min_mag: f64,
    /// Always "rectangular" in practice.
    pub mesh_type: String,
    pub xbase: f64,
    pub ybase: f64,
    pub zbase: f64,
    pub xstepsize: f64,
    pub ystepsize: f64,
    pub zstepsize: f64,
    /// Node counts as parsed; validated strictly positive before any
    /// field allocation.
    pub xnodes: i64,
    pub ynodes: i64,
    pub znodes: i64,
    /// Components per cell; explicit in version 2, forced to 3 for
    /// version 1.
    pub valuedim: i64,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: OvfVersion::V1,
            title: "<title>".to_string(),
            desc: Vec::new(),
            value_units: Vec::new(),
            value_labels: Vec::new(),
            mesh_unit: "<meshunit>".to_string(),
            value_unit: "<valueunit>".to_string(),
            value_multiplier: 1.0,
            xmin: 0.0,
            ymin: 0.0,
            zmin: 0.0,
            xmax: 0.0,
            ymax: 0.0,
            zmax: 0.0,
            value_range_max_mag: 0.0,
            value_range_min_mag: 0.0,
            mesh_type: "rectangular".to_string(),
            xbase: 0.0,
            ybase: 0.0,
            zbase: 0.0,
            xstepsize: 0.0,
            ystepsize: 0.0,
            zstepsize: 0.0,
            xnodes: 0,
            ynodes: 0,
            znodes: 0,
            valuedim: 0,
        }
    }
}

impl Header {
    /// Declared node counts with their axis names, in x, y, z order.
    pub fn node_counts(&self) -> [(char, i64); 3] {
        [('x', self.xnodes), ('y', self.ynodes), ('z', self.znodes)]
    }

    /// Declared cell count, if the node counts are valid.
    pub fn cell_count(&self) -> Option<usize> {
        if self.xnodes <= 0 || self.ynodes <= 0 || self.znodes <= 0 {
            return None;
        }
        (self.xnodes as usize)
            .checked_mul(self.ynodes as usize)?
            .checked_mul(self.znodes as usize)
    }
}
