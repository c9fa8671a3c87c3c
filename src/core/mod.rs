//! Core business logic modules.

pub mod archiver;
pub mod extractor;
pub mod matcher;
