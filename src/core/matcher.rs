//! Recording matcher.
//!
//! Joins the recordings reported by the device with the raw recording files
//! found on disk, using the embedded ProgramID as the join key.
//!
//! A file whose metadata cannot be extracted aborts the whole scan. Skipping
//! it would leave its recording silently unmatched while the rest of the
//! pass carries on.

use crate::core::extractor;
use crate::models::recording::RecordingDescriptor;
use crate::utils::fs::{ensure_directory, has_extension, is_hidden};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Outcome of matching one file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The file belongs to the recording at `index` in the input list.
    Matched {
        program_id: String,
        path: PathBuf,
        index: usize,
    },
    /// No device recording carries this ProgramID.
    Unmatched { program_id: String, path: PathBuf },
}

/// Result of scanning a recordings directory.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Per-file outcomes, in walk order.
    pub outcomes: Vec<MatchOutcome>,
    /// Directories visited.
    pub dirs_scanned: usize,
}

impl ScanReport {
    /// Number of files matched to a recording.
    pub fn matched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MatchOutcome::Matched { .. }))
            .count()
    }

    /// Files on disk with no device recording.
    pub fn unmatched(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match o {
            MatchOutcome::Unmatched { path, .. } => Some(path.as_path()),
            _ => None,
        })
    }
}

/// Build the ProgramID lookup. Later duplicates replace earlier ones.
fn index_by_program_id(recordings: &[RecordingDescriptor]) -> Result<HashMap<String, usize>> {
    let mut by_id = HashMap::with_capacity(recordings.len());

    for (i, recording) in recordings.iter().enumerate() {
        let id = recording
            .metadata
            .program_id()
            .ok_or_else(|| Error::MissingProgramId(recording.metadata.display_name()))?;

        if let Some(previous) = by_id.insert(id.to_string(), i) {
            tracing::debug!(
                "Duplicate ProgramID {}: entry {} replaces entry {}",
                id,
                i,
                previous
            );
        }
    }

    Ok(by_id)
}

/// Hidden directories below the root are pruned with their subtree.
fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && is_hidden(entry.file_name())
}

/// Match recording files under `root` to `recordings`, setting `path` on
/// every recording that has a file.
///
/// Every recording must carry a non-empty ProgramID. Files are visited in
/// file-name order; when two files carry the same ProgramID the later one
/// wins. Recordings without a file keep `path == None` and must be treated
/// as not ready.
///
/// Hidden directories below `root` are skipped with their contents, but
/// `root` itself is always scanned, even when its own name starts with a
/// dot. `extension` is compared case-insensitively, so `mpg` also picks up
/// `.MPG` files.
pub fn match_recordings(
    recordings: &mut [RecordingDescriptor],
    root: &Path,
    extension: &str,
) -> Result<ScanReport> {
    ensure_directory(root)?;

    let by_id = index_by_program_id(recordings)?;
    let mut report = ScanReport::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            tracing::error!("Failed to access path under {}: {}", root.display(), e);
            e
        })?;

        if entry.file_type().is_dir() {
            report.dirs_scanned += 1;
            continue;
        }

        let path = entry.path();
        if !has_extension(path, extension) {
            continue;
        }

        let metadata = extractor::extract(path)?;
        let program_id = metadata
            .program_id()
            .ok_or_else(|| Error::malformed(path, "record has no ProgramID"))?
            .to_string();

        match by_id.get(&program_id) {
            Some(&index) => {
                tracing::debug!("Matched {} to ProgramID {}", path.display(), program_id);
                recordings[index].path = Some(path.to_path_buf());
                report.outcomes.push(MatchOutcome::Matched {
                    program_id,
                    path: path.to_path_buf(),
                    index,
                });
            }
            None => {
                tracing::debug!(
                    "No device recording for {} (ProgramID {})",
                    path.display(),
                    program_id
                );
                report.outcomes.push(MatchOutcome::Unmatched {
                    program_id,
                    path: path.to_path_buf(),
                });
            }
        }
    }

    tracing::info!(
        "Scanned {} directories: {} files matched, {} without a device recording",
        report.dirs_scanned,
        report.matched(),
        report.unmatched().count()
    );

    Ok(report)
}
