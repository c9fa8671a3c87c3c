//! Data models.

pub mod config;
pub mod device;
pub mod recording;
