//! Matroska global tags generator.
//!
//! Builds the `Tags` document passed to mkvmerge via `--global-tags`.
//! Groups are keyed by target level; the untargeted episode group always
//! exists and comes first.

use crate::models::recording::RecordingMetadata;
use crate::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

/// Matroska target type values. Higher values cover a broader scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetType {
    Chapter = 30,
    Episode = 50,
    Season = 60,
    Collection = 70,
}

impl TargetType {
    /// Numeric `TargetTypeValue`.
    pub fn value(self) -> u32 {
        self as u32
    }
}

/// A name/value leaf entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTag {
    pub name: String,
    pub value: String,
}

/// A group of entries sharing one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// `None` for the default group, which applies at episode level.
    pub target: Option<TargetType>,
    pub simple_tags: Vec<SimpleTag>,
}

impl Tag {
    /// Entries with the given name, in insertion order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.simple_tags
            .iter()
            .filter(move |t| t.name == name)
            .map(|t| t.value.as_str())
    }
}

/// Ordered tag groups with at most one group per target level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTree {
    tags: Vec<Tag>,
    by_level: BTreeMap<TargetType, usize>,
}

impl Default for TagTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TagTree {
    /// Create a tree holding only the empty default group.
    pub fn new() -> Self {
        let mut by_level = BTreeMap::new();
        by_level.insert(TargetType::Episode, 0);
        Self {
            tags: vec![Tag::default()],
            by_level,
        }
    }

    /// Build the tags for a recording.
    pub fn from_metadata(metadata: &RecordingMetadata) -> Self {
        let mut tree = Self::new();

        if let Some(code) = metadata.episode {
            tree.add_episode(code.episode);
            tree.add_season(code.season);
        }
        if let Some(ref subtitle) = metadata.episode_title {
            tree.add_subtitle(subtitle);
        }
        if let Some(ref synopsis) = metadata.synopsis {
            tree.add_synopsis(synopsis);
        }
        if let Some(ref title) = metadata.title {
            tree.add_title(title);
        }

        tree
    }

    /// Groups in document order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Group for a target level, if it exists.
    pub fn group(&self, level: TargetType) -> Option<&Tag> {
        self.by_level.get(&level).map(|&i| &self.tags[i])
    }

    fn group_mut(&mut self, level: TargetType) -> &mut Tag {
        let index = match self.by_level.get(&level) {
            Some(&i) => i,
            None => {
                self.tags.push(Tag {
                    target: Some(level),
                    simple_tags: Vec::new(),
                });
                let i = self.tags.len() - 1;
                self.by_level.insert(level, i);
                i
            }
        };
        &mut self.tags[index]
    }

    /// Append an entry to the group for `level`, creating the group if needed.
    pub fn add(&mut self, level: TargetType, name: &str, value: impl Into<String>) {
        self.group_mut(level).simple_tags.push(SimpleTag {
            name: name.to_string(),
            value: value.into(),
        });
    }

    pub fn add_title(&mut self, title: &str) {
        self.add(TargetType::Episode, "TITLE", title);
    }

    pub fn add_subtitle(&mut self, subtitle: &str) {
        self.add(TargetType::Episode, "SUBTITLE", subtitle);
    }

    pub fn add_synopsis(&mut self, synopsis: &str) {
        self.add(TargetType::Episode, "SYNOPSIS", synopsis);
    }

    pub fn add_episode(&mut self, episode: u32) {
        self.add(TargetType::Episode, "PART_NUMBER", episode.to_string());
    }

    pub fn add_season(&mut self, season: u32) {
        self.add(TargetType::Season, "PART_NUMBER", season.to_string());
    }

    /// Serialize as a Matroska tags XML document.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::DocType(BytesText::from_escaped(
            "Tags SYSTEM \"matroskatags.dtd\"",
        )))?;

        writer.write_event(Event::Start(BytesStart::new("Tags")))?;

        for tag in &self.tags {
            writer.write_event(Event::Start(BytesStart::new("Tag")))?;

            if let Some(target) = tag.target {
                writer.write_event(Event::Start(BytesStart::new("Targets")))?;
                write_text_element(&mut writer, "TargetTypeValue", &target.value().to_string())?;
                writer.write_event(Event::End(BytesEnd::new("Targets")))?;
            }

            for simple in &tag.simple_tags {
                writer.write_event(Event::Start(BytesStart::new("Simple")))?;
                write_text_element(&mut writer, "Name", &simple.name)?;
                write_text_element(&mut writer, "String", &simple.value)?;
                writer.write_event(Event::End(BytesEnd::new("Simple")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("Tag")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Tags")))?;

        let mut xml = writer.into_inner().into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(|e| crate::Error::other(e.to_string()))
    }

    /// Write the document to a temporary file, removed when dropped.
    pub fn write_temp_file(&self) -> Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("dvr-archiver-tags-")
            .suffix(".xml")
            .tempfile()?;
        file.write_all(self.to_xml()?.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
