//! mkvmerge service for remuxing recordings into Matroska.

use crate::generators::tags::TagTree;
use crate::{Error, Result};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// How a successful mkvmerge run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxOutcome {
    /// Exit code 0.
    Success,
    /// Exit code 1: output written, warnings emitted.
    Warnings,
}

/// Map an exit code to an outcome.
pub fn outcome_from_code(code: Option<i32>) -> Result<MuxOutcome> {
    match code {
        Some(0) => Ok(MuxOutcome::Success),
        Some(1) => Ok(MuxOutcome::Warnings),
        code => Err(Error::ExternalTool { code }),
    }
}

/// Check if mkvmerge is installed.
pub fn is_installed(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get mkvmerge version.
pub fn get_version(binary: &str) -> Result<String> {
    let output = Command::new(binary).arg("--version").output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.to_string())
}

/// One mkvmerge invocation.
#[derive(Debug, Clone)]
pub struct Mkvmerge {
    binary: String,
    input: PathBuf,
    output: PathBuf,
    tags: Option<TagTree>,
    pub quiet: bool,
    pub verbose: bool,
}

impl Mkvmerge {
    pub fn new(binary: &str, input: &Path, output: &Path) -> Self {
        Self {
            binary: binary.to_string(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            tags: None,
            quiet: true,
            verbose: false,
        }
    }

    /// Attach global tags.
    pub fn with_tags(mut self, tags: TagTree) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn tags(&self) -> Option<&TagTree> {
        self.tags.as_ref()
    }

    /// Command line arguments, given the path of the written tags file.
    pub fn build_args(&self, tags_file: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--output".into(), self.output.clone().into()];

        if self.quiet {
            args.push("--quiet".into());
        }
        if self.verbose {
            args.push("--verbose".into());
        }
        if let Some(tags_file) = tags_file {
            args.push("--global-tags".into());
            args.push(tags_file.into());
        }

        args.push(self.input.clone().into());
        args
    }

    /// Run mkvmerge. The tags file only lives for the duration of the call.
    pub fn run(&self) -> Result<MuxOutcome> {
        let tags_file = self.tags.as_ref().map(TagTree::write_temp_file).transpose()?;
        let args = self.build_args(tags_file.as_ref().map(|f| f.path()));

        tracing::info!(
            "{} {}",
            self.binary,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let status = Command::new(&self.binary)
            .args(&args)
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::MkvmergeNotFound,
                _ => Error::Io(e),
            })?;

        outcome_from_code(status.code())
    }
}
