//! Dump command implementation.
//!
//! Prints the metadata record embedded in a single recording file.

use crate::core::extractor;
use crate::generators::filename;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Print the embedded metadata of `file` as JSON.
///
/// The record is printed as stored, even when its fields do not validate.
pub fn dump(file: &Path) -> Result<()> {
    let record = extractor::extract_raw(file)?;

    println!("{}", format!("{}:", file.display()).bold());
    println!("{}", serde_json::to_string_pretty(&record)?);
    println!();

    match extractor::extract(file) {
        Ok(metadata) => println!(
            "  {} {}.{}",
            "Archive name:".bold(),
            filename::derive_name(&metadata),
            filename::OUTPUT_EXTENSION
        ),
        Err(e) => println!("  {} {}", "[WARN]".yellow(), e),
    }

    Ok(())
}
