//! Error types for the DVR archiver.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the DVR archiver.
#[derive(Error, Debug)]
pub enum Error {
    // Preflight errors
    #[error("mkvmerge not found. Install MKVToolNix: sudo apt install mkvtoolnix")]
    MkvmergeNotFound,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    // Metadata errors
    #[error("Malformed recording metadata in {path}: {reason}")]
    MalformedMetadata { path: PathBuf, reason: String },

    #[error("Invalid episode code: {0:?}")]
    InvalidEpisodeCode(String),

    #[error("Recording has no ProgramID: {0}")]
    MissingProgramId(String),

    // Device errors
    #[error("Device is not a record engine: {0}")]
    NotRecordEngine(String),

    #[error("No recordings found")]
    NoRecordings,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Bad HTTP response from {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    // Remux errors
    #[error("mkvmerge failed with {}", exit_description(.code))]
    ExternalTool { code: Option<i32> },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // XML errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a metadata error for the given file.
    pub fn malformed<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Error::MalformedMetadata {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}
