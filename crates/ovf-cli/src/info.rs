//! `ovfkit info` command implementation

use anyhow::{Context, Result};
use ovf_codec::read_file;
use ovf_core::Header;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct InfoReport<'a> {
    file: String,
    header: &'a Header,
    shape: (usize, usize, usize),
    value_dim: usize,
    cells: usize,
    value_range_min_mag: f64,
    value_range_max_mag: f64,
    warnings: Vec<String>,
}

pub fn run(path: &Path, json: bool) -> Result<()> {
    let data = read_file(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let (min_mag, max_mag) = data.field.min_max_magnitude();
    let warnings: Vec<String> = data
        .warnings
        .warnings()
        .iter()
        .map(|w| w.to_string())
        .collect();

    if json {
        let report = InfoReport {
            file: path.display().to_string(),
            header: &data.header,
            shape: data.field.shape(),
            value_dim: data.field.value_dim(),
            cells: data.field.cell_count(),
            value_range_min_mag: min_mag,
            value_range_max_mag: max_mag,
            warnings,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let header = &data.header;
    let (nx, ny, nz) = data.field.shape();
    println!("Vector-Field Information");
    println!("========================");
    println!();
    println!("File:        {}", path.display());
    println!("Format:      OVF {}.0", header.version.number());
    println!("Title:       {}", header.title);
    for desc in &header.desc {
        println!("Desc:        {desc}");
    }
    println!(
        "Grid:        {nx} x {ny} x {nz} nodes ({} cells)",
        data.field.cell_count()
    );
    println!(
        "Cell type:   {}",
        if data.field.value_dim() == 1 {
            "scalar"
        } else {
            "3-vector"
        }
    );
    println!("Mesh unit:   {}", header.mesh_unit);
    println!("Value unit:  {}", header.value_unit);
    println!(
        "Extent:      [{}, {}] x [{}, {}] x [{}, {}]",
        header.xmin, header.xmax, header.ymin, header.ymax, header.zmin, header.zmax
    );
    println!(
        "Step size:   {} / {} / {}",
        header.xstepsize, header.ystepsize, header.zstepsize
    );
    println!("Magnitude:   {min_mag} .. {max_mag}");

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
