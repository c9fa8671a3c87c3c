//! Archive job construction.
//!
//! Turns a matched recording into the mkvmerge invocation that archives it:
//! absolute input path, slugged output path and global tags.

use crate::generators::filename;
use crate::generators::tags::TagTree;
use crate::models::config::MkvmergeConfig;
use crate::models::recording::RecordingDescriptor;
use crate::services::mkvmerge::Mkvmerge;
use std::path::Path;

/// Build the remux job for a recording, or `None` if no file was matched.
pub fn build_job(
    recording: &RecordingDescriptor,
    dest_dir: &Path,
    config: &MkvmergeConfig,
) -> Option<Mkvmerge> {
    let input = recording.path()?;
    let metadata = &recording.metadata;

    let output = filename::output_path(dest_dir, metadata);
    let mut job = Mkvmerge::new(&config.binary, input, &output)
        .with_tags(TagTree::from_metadata(metadata));
    job.quiet = config.quiet;

    Some(job)
}

