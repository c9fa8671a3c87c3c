//! External services: the DVR device API and the mkvmerge remuxer.

pub mod hdhomerun;
pub mod mkvmerge;
