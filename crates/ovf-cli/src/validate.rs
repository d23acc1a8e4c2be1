//! `ovfkit validate` command implementation
//!
//! Decodes every file given and keeps going past failures, so one corrupt
//! file in a simulation sequence does not hide the state of the rest.

use anyhow::Result;
use ovf_codec::read_file;
use std::path::PathBuf;

pub fn run(files: &[PathBuf]) -> Result<()> {
    let mut failures = 0usize;

    for path in files {
        match read_file(path) {
            Ok(data) if data.warnings.is_clean() => {
                println!("ok    {}", path.display());
            }
            Ok(data) => {
                println!(
                    "warn  {} ({} warning(s))",
                    path.display(),
                    data.warnings.len()
                );
                for warning in data.warnings.warnings() {
                    println!("        {warning}");
                }
            }
            Err(err) => {
                failures += 1;
                println!("fail  {}: {err}", path.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} file(s) failed to decode", files.len());
    }
    Ok(())
}
