//! Recording data models.
//!
//! The same record shape is reported by the device in `recorded_files.json`
//! and embedded as JSON in the private stream at the start of every
//! recording file, so both sides decode into [`RecordingMetadata`].

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Season/episode pair parsed from an `S<season>E<episode>` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EpisodeCode {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeCode {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

fn episode_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*S(\d+)E(\d+)").expect("valid episode code pattern"))
}

impl FromStr for EpisodeCode {
    type Err = Error;

    /// Parse a code like `S02E07`. Text after the episode number is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let caps = episode_code_regex()
            .captures(s)
            .ok_or_else(|| Error::InvalidEpisodeCode(s.to_string()))?;

        let season = caps[1]
            .parse()
            .map_err(|_| Error::InvalidEpisodeCode(s.to_string()))?;
        let episode = caps[2]
            .parse()
            .map_err(|_| Error::InvalidEpisodeCode(s.to_string()))?;

        Ok(Self { season, episode })
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}E{}", self.season, self.episode)
    }
}

/// Metadata describing one recording.
///
/// Every descriptive field is optional; an absent field is distinct from an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordingMetadata {
    #[serde(rename = "ProgramID", skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(rename = "SeriesID", skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_title: Option<String>,
    /// Raw episode code, e.g. `S02E07`.
    #[serde(rename = "EpisodeNumber", skip_serializing_if = "Option::is_none")]
    pub episode_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "ImageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Per-recording command endpoint used for lifecycle actions.
    #[serde(rename = "CmdURL", skip_serializing_if = "Option::is_none")]
    pub cmd_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_number: Option<String>,
    /// Scheduled start, unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Parsed form of `episode_string`, filled by [`RecordingMetadata::resolve_episode`].
    #[serde(skip)]
    pub episode: Option<EpisodeCode>,
}

impl RecordingMetadata {
    /// Parse `episode_string` into `episode`.
    ///
    /// A present but unparseable code is an error; no default season or
    /// episode is substituted.
    pub fn resolve_episode(&mut self) -> Result<()> {
        self.episode = match self.episode_string.as_deref() {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        Ok(())
    }

    /// Program ID, if present and non-empty.
    pub fn program_id(&self) -> Option<&str> {
        self.program_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Human readable label for logs and listings.
    pub fn display_name(&self) -> String {
        let title = self.title.as_deref().unwrap_or("<untitled>");
        match (&self.episode, self.episode_title.as_deref()) {
            (Some(code), Some(ep)) => format!("{} {} {}", title, code, ep),
            (None, Some(ep)) => format!("{} - {}", title, ep),
            _ => title.to_string(),
        }
    }
}

/// A recording as reported by the device, optionally matched to a file on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingDescriptor {
    pub metadata: RecordingMetadata,
    /// Absolute path of the matched raw recording; `None` until matched.
    pub path: Option<PathBuf>,
}

impl RecordingDescriptor {
    pub fn new(metadata: RecordingMetadata) -> Self {
        Self {
            metadata,
            path: None,
        }
    }

    /// Whether a file on disk has been matched to this recording.
    pub fn is_ready(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl From<RecordingMetadata> for RecordingDescriptor {
    fn from(metadata: RecordingMetadata) -> Self {
        Self::new(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_episode_code() {
        assert_eq!("S02E07".parse::<EpisodeCode>().unwrap(), EpisodeCode::new(2, 7));
        assert_eq!("S2E7".parse::<EpisodeCode>().unwrap(), EpisodeCode::new(2, 7));
        assert_eq!("S10E123".parse::<EpisodeCode>().unwrap(), EpisodeCode::new(10, 123));
    }

    #[test]
    fn test_episode_code_display_parses_back() {
        let code = EpisodeCode::new(2, 7);
        assert_eq!(code.to_string(), "S2E7");
        assert_eq!(code.to_string().parse::<EpisodeCode>().unwrap(), code);
    }

    #[test]
    fn test_parse_episode_code_rejects_garbage() {
        assert!("EP012345".parse::<EpisodeCode>().is_err());
        assert!("".parse::<EpisodeCode>().is_err());
        assert!("S-1E2".parse::<EpisodeCode>().is_err());
        assert!("SxE2".parse::<EpisodeCode>().is_err());
    }

    #[test]
    fn test_resolve_episode_propagates_failure() {
        let mut meta = RecordingMetadata {
            episode_string: Some("Special".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            meta.resolve_episode(),
            Err(Error::InvalidEpisodeCode(_))
        ));
        assert_eq!(meta.episode, None);
    }

    #[test]
    fn test_resolve_episode_absent_code() {
        let mut meta = RecordingMetadata::default();
        meta.resolve_episode().unwrap();
        assert_eq!(meta.episode, None);
    }

    #[test]
    fn test_deserialize_wire_names() {
        let json = r#"{
            "ProgramID": "EP0001",
            "SeriesID": "C123",
            "Title": "Mythbusters",
            "EpisodeTitle": "Boom",
            "EpisodeNumber": "S02E07",
            "CmdURL": "http://10.0.0.2/recorded/cmd?id=1",
            "Unknown": 42
        }"#;
        let meta: RecordingMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.program_id(), Some("EP0001"));
        assert_eq!(meta.series_id.as_deref(), Some("C123"));
        assert_eq!(meta.episode_string.as_deref(), Some("S02E07"));
        assert_eq!(meta.synopsis, None);
        assert_eq!(meta.episode, None);
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let meta: RecordingMetadata =
            serde_json::from_str(r#"{"Title": "Show", "EpisodeTitle": ""}"#).unwrap();
        assert_eq!(meta.episode_title.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_program_id_is_treated_as_missing() {
        let meta = RecordingMetadata {
            program_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(meta.program_id(), None);
    }
}
