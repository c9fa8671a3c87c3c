//! DVR Archiver Library
//!
//! Matches network DVR recordings to their files on disk using the metadata
//! embedded in each transport stream, and prepares tagged Matroska remuxes.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
