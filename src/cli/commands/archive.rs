//! Archive command implementation.
//!
//! Fetches the recording list from every record engine, matches it against
//! the raw files in the source directory and remuxes each matched recording
//! into a tagged .mkv in the destination directory.

use crate::core::{archiver, matcher};
use crate::models::config::Config;
use crate::services::hdhomerun::DvrClient;
use crate::services::mkvmerge::MuxOutcome;
use crate::utils::fs::absolute_directory;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Options for an archive run.
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Delete recordings on the device once archived.
    pub delete: bool,
    /// Let the device record deleted programs again.
    pub rerecord: bool,
    /// Override the raw recording extension.
    pub extension: Option<String>,
}

/// Archive recordings from `source` into `dest`.
pub async fn archive(
    source: &Path,
    dest: &Path,
    options: &ArchiveOptions,
    config: &Config,
) -> Result<()> {
    println!("{}", "[ARCHIVE] Archiving recordings...".bold().cyan());
    println!();

    let source = absolute_directory(source)?;
    let dest = absolute_directory(dest)?;
    let extension = options
        .extension
        .as_deref()
        .unwrap_or(&config.scan.extension);

    println!("  {} {}", "Source:".bold(), source.display());
    println!("  {} {}", "Target:".bold(), dest.display());
    println!();

    let client = DvrClient::new(&config.device)?;
    let mut recordings = client.all_recordings().await?;
    if recordings.is_empty() {
        return Err(Error::NoRecordings);
    }
    println!("[INFO] {} recordings reported by devices", recordings.len());

    let report = matcher::match_recordings(&mut recordings, &source, extension)?;
    for path in report.unmatched() {
        tracing::debug!("Not on any device: {}", path.display());
    }

    let jobs: Vec<_> = recordings
        .iter()
        .filter_map(|r| archiver::build_job(r, &dest, &config.mkvmerge).map(|job| (r, job)))
        .collect();

    println!("[INFO] {} recordings found on disk", jobs.len());
    println!();

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| Error::other(e.to_string()))?
            .progress_chars("█▓░"),
    );

    let mut archived = 0;
    let mut warned = 0;
    let mut delete_failures = 0;

    for (recording, job) in &jobs {
        pb.set_message(recording.metadata.display_name());

        let outcome = job.run()?;
        archived += 1;
        if outcome == MuxOutcome::Warnings {
            warned += 1;
            pb.println(format!(
                "{} {} (mkvmerge reported warnings)",
                "[WARN]".yellow(),
                job.output().display()
            ));
        }

        if options.delete {
            if let Err(e) = client.delete(recording, options.rerecord).await {
                tracing::warn!(
                    "Failed to delete recording {}: {}",
                    job.input().display(),
                    e
                );
                delete_failures += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    println!();

    println!("{}", "[Summary]".bold().green());
    println!("  {} {}", "Archived:".bold(), archived);
    println!("  {} {}", "With warnings:".bold(), warned);
    println!(
        "  {} {}",
        "Not on disk:".bold(),
        recordings.len() - jobs.len()
    );
    if options.delete {
        println!("  {} {}", "Delete failures:".bold(), delete_failures);
    }

    Ok(())
}
