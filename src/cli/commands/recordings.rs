//! Recordings command implementation.

use crate::core::matcher;
use crate::models::config::Config;
use crate::models::recording::RecordingDescriptor;
use crate::services::hdhomerun::DvrClient;
use crate::utils::fs::absolute_directory;
use crate::Result;
use chrono::{Local, TimeZone};
use colored::Colorize;
use std::path::Path;

/// List the recordings of every record engine, optionally matched against
/// the files in `source`.
pub async fn list_recordings(source: Option<&Path>, config: &Config) -> Result<()> {
    let client = DvrClient::new(&config.device)?;
    let mut recordings = client.all_recordings().await?;

    if recordings.is_empty() {
        println!("No recordings found.");
        return Ok(());
    }

    if let Some(source) = source {
        let source = absolute_directory(source)?;
        matcher::match_recordings(&mut recordings, &source, &config.scan.extension)?;
    }

    println!("{}", format!("{} recordings", recordings.len()).bold());
    println!();

    for recording in &recordings {
        print_recording(recording, source.is_some());
    }

    Ok(())
}

fn print_recording(recording: &RecordingDescriptor, matched: bool) {
    let metadata = &recording.metadata;

    let started = metadata
        .start_time
        .and_then(|t| Local.timestamp_opt(t, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "  {} {} {}",
        started.dimmed(),
        metadata.program_id().unwrap_or("-").cyan(),
        metadata.display_name()
    );

    if matched {
        match recording.path() {
            Some(path) => println!("      {} {}", "->".green(), path.display()),
            None => println!("      {}", "(not on disk)".yellow()),
        }
    }
}
