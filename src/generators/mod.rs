//! Output generators: archive filenames and Matroska tags.

pub mod filename;
pub mod tags;
