//! `ovfkit convert` command implementation

use anyhow::{Context, Result};
use ovf_codec::{read_file, write_file};
use ovf_core::DataFormat;
use std::path::Path;

pub fn run(input: &Path, output: &Path, format: DataFormat) -> Result<()> {
    let data = read_file(input).with_context(|| format!("Failed to read {}", input.display()))?;

    for warning in data.warnings.warnings() {
        eprintln!("warning: {warning}");
    }

    write_file(output, &data.header, &data.field, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({} cells, Data {})",
        output.display(),
        data.field.cell_count(),
        format.marker()
    );
    Ok(())
}
