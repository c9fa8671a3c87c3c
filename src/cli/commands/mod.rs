//! CLI command implementations.

pub mod archive;
pub mod devices;
pub mod dump;
pub mod recordings;
