//! Output filename generator.

use crate::models::recording::RecordingMetadata;
use deunicode::deunicode;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Extension of archived files.
pub const OUTPUT_EXTENSION: &str = "mkv";

/// Stem used when neither the display name nor the ProgramID slugs to
/// anything.
pub const FALLBACK_STEM: &str = "recording";

/// Display name for a recording, before slugging.
///
/// - no episode title: `${title}`
/// - episode title without episode code: `${episodeTitle}`
/// - otherwise: `${season2}${episode2}-${episodeTitle}`
pub fn display_name(metadata: &RecordingMetadata) -> String {
    match (metadata.episode_title.as_deref(), metadata.episode) {
        (None, _) => metadata.title.clone().unwrap_or_default(),
        (Some(episode_title), None) => episode_title.to_string(),
        (Some(episode_title), Some(code)) => {
            format!("{:02}{:02}-{}", code.season, code.episode, episode_title)
        }
    }
}

/// Filesystem-safe name for a recording, without extension.
///
/// Never empty: a display name with nothing to slug falls back to the
/// ProgramID, then to [`FALLBACK_STEM`].
pub fn derive_name(metadata: &RecordingMetadata) -> String {
    let slug = slugify(&display_name(metadata));
    if !slug.is_empty() {
        return slug;
    }

    let fallback = metadata.program_id().map(slugify).unwrap_or_default();
    if fallback.is_empty() {
        tracing::warn!("No usable name for {}", metadata.display_name());
        FALLBACK_STEM.to_string()
    } else {
        fallback
    }
}

/// Full output path for a recording inside `dest_dir`.
pub fn output_path(dest_dir: &Path, metadata: &RecordingMetadata) -> PathBuf {
    dest_dir.join(format!("{}.{}", derive_name(metadata), OUTPUT_EXTENSION))
}

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("valid separator pattern"))
}

/// Convert a display string to a lowercase ASCII slug.
///
/// Non-Latin scripts are transliterated, accents are stripped, `&` reads
/// as "and", and every run of other characters becomes a single `-`. The
/// result is empty when nothing alphanumeric survives.
pub fn slugify(s: &str) -> String {
    let composed: String = s.nfkc().collect();
    let ascii = deunicode(&composed).to_lowercase().replace('&', " and ");

    separator_regex()
        .replace_all(&ascii, "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Mythbusters"), "mythbusters");
        assert_eq!(slugify("0103-Pilot"), "0103-pilot");
        assert_eq!(slugify("  The  Simpsons: Treehouse!! "), "the-simpsons-treehouse");
        assert_eq!(slugify("Café Señor"), "cafe-senor");
        assert_eq!(slugify("Law & Order"), "law-and-order");
        assert_eq!(slugify("a--b"), "a-b");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Покемон"), "pokemon");
        assert_eq!(slugify("Ｆｕｌｌｗｉｄｔｈ"), "fullwidth");

        let slug = slugify("名探偵 Conan");
        assert!(slug.ends_with("-conan"), "{}", slug);
        assert!(slug.len() > "-conan".len());
    }

    #[test]
    fn test_slugify_punctuation_only() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(" - "), "");
    }
}
