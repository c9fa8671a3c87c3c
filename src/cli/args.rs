//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DVR Archiver - Remux network DVR recordings into tagged Matroska files
#[derive(Parser, Debug)]
#[command(name = "dvr-archiver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remux and archive recording files from SOURCE into DEST
    Archive {
        /// Directory holding the raw recordings
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Directory receiving the .mkv files
        #[arg(value_name = "DEST")]
        dest: PathBuf,

        /// Delete recordings on the device after archiving
        #[arg(long)]
        delete: bool,

        /// Allow deleted recordings to be recorded again
        #[arg(long, requires = "delete")]
        rerecord: bool,

        /// Raw recording extension (default from config: mpg)
        #[arg(long, value_name = "EXT")]
        extension: Option<String>,
    },

    /// Print the metadata embedded in a recording file
    Dump {
        /// Recording file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List devices found on the network
    Devices,

    /// List recordings stored on the record engines
    Recordings {
        /// Match against raw recordings in this directory
        #[arg(short, long, value_name = "SOURCE")]
        source: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_archive() {
        let cli = Cli::parse_from(["dvr-archiver", "archive", "/rec", "/out", "--delete"]);
        match cli.command {
            Commands::Archive {
                source,
                dest,
                delete,
                rerecord,
                extension,
            } => {
                assert_eq!(source, PathBuf::from("/rec"));
                assert_eq!(dest, PathBuf::from("/out"));
                assert!(delete);
                assert!(!rerecord);
                assert_eq!(extension, None);
            }
            other => panic!("Expected Archive, got {:?}", other),
        }
    }

    #[test]
    fn test_archive_requires_two_dirs() {
        assert!(Cli::try_parse_from(["dvr-archiver", "archive", "/rec"]).is_err());
    }

    #[test]
    fn test_rerecord_requires_delete() {
        assert!(
            Cli::try_parse_from(["dvr-archiver", "archive", "/rec", "/out", "--rerecord"]).is_err()
        );
    }
}
