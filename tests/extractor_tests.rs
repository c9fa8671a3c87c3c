//! Integration tests for the transport-stream metadata extractor.
//!
//! Tests cover:
//! - Accumulation of the leading metadata run
//! - Early stop at the first non-metadata packet
//! - Skipped unreadable packets
//! - Decode and episode code failures
//! - Untyped extraction of records with bad field values

mod common;

use common::*;
use dvr_archiver::core::extractor::{
    extract, extract_raw, read_metadata_payload, trim_padding, MAX_METADATA_PACKETS, METADATA_PID,
};
use dvr_archiver::models::recording::EpisodeCode;
use dvr_archiver::Error;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

// ========== ACCUMULATION TESTS ==========

#[test]
fn test_accumulates_leading_run_exactly() {
    let payloads: Vec<Vec<u8>> = (0..5u8).map(|i| vec![b'a' + i; PAYLOAD_SIZE]).collect();

    let mut stream = Vec::new();
    for p in &payloads {
        stream.extend(packet(METADATA_PID, p));
    }
    stream.extend(packet(VIDEO_PID, &[0u8; PAYLOAD_SIZE]));
    stream.extend(packet(METADATA_PID, b"not part of the run"));

    let collected = read_metadata_payload(&mut Cursor::new(stream)).unwrap();
    assert_eq!(collected, payloads.concat());
}

#[test]
fn test_stops_at_first_foreign_packet() {
    let mut stream = packet(VIDEO_PID, &[0u8; PAYLOAD_SIZE]);
    stream.extend(packet(METADATA_PID, b"{}"));

    let collected = read_metadata_payload(&mut Cursor::new(stream)).unwrap();
    assert!(collected.is_empty());
}

#[test]
fn test_scan_is_capped() {
    let mut stream = Vec::new();
    for _ in 0..MAX_METADATA_PACKETS + 10 {
        stream.extend(packet(METADATA_PID, &[b'x'; PAYLOAD_SIZE]));
    }

    let collected = read_metadata_payload(&mut Cursor::new(stream)).unwrap();
    assert_eq!(collected.len(), MAX_METADATA_PACKETS * PAYLOAD_SIZE);
}

#[test]
fn test_bad_packet_is_skipped() {
    let mut bad = packet(METADATA_PID, b"garbage");
    bad[0] = 0x00;

    let mut stream = packet(METADATA_PID, b"{\"Title\":");
    stream.extend(bad);
    stream.extend(packet(METADATA_PID, b"\"X\"}"));
    stream.extend(packet(VIDEO_PID, &[]));

    let collected = read_metadata_payload(&mut Cursor::new(stream)).unwrap();
    assert_eq!(collected.len(), 2 * PAYLOAD_SIZE);
    assert!(collected.starts_with(b"{\"Title\":"));
    assert!(trim_padding(&collected).ends_with(b"\"X\"}"));
}

#[test]
fn test_only_bad_packets_is_io_error() {
    let mut bad = packet(METADATA_PID, b"{}");
    bad[0] = 0x00;

    let result = read_metadata_payload(&mut Cursor::new(bad));
    assert!(matches!(result, Err(Error::Io(_))));
}

// ========== EXTRACT TESTS ==========

#[test]
fn test_extract_recording() {
    let temp_dir = TempDir::new().unwrap();
    let json = r#"{"ProgramID":"EP0123","SeriesID":"C9","Title":"Mythbusters","EpisodeTitle":"Boom","EpisodeNumber":"S02E07","Synopsis":"Things explode."}"#;
    let path = write_recording(temp_dir.path(), "boom.mpg", json);

    let metadata = extract(&path).unwrap();
    assert_eq!(metadata.program_id(), Some("EP0123"));
    assert_eq!(metadata.title.as_deref(), Some("Mythbusters"));
    assert_eq!(metadata.episode_title.as_deref(), Some("Boom"));
    assert_eq!(metadata.episode, Some(EpisodeCode::new(2, 7)));
    assert_eq!(metadata.image_url, None);
}

#[test]
fn test_extract_multi_packet_record() {
    let temp_dir = TempDir::new().unwrap();
    let synopsis = "long ".repeat(200);
    let json = format!(
        r#"{{"ProgramID":"EP1","Title":"Show","Synopsis":"{}"}}"#,
        synopsis
    );
    assert!(json.len() > 4 * PAYLOAD_SIZE);
    let path = write_recording(temp_dir.path(), "long.mpg", &json);

    let metadata = extract(&path).unwrap();
    assert_eq!(metadata.synopsis.as_deref(), Some(synopsis.as_str()));
}

#[test]
fn test_extract_missing_file() {
    let result = extract(std::path::Path::new("/nonexistent/recording.mpg"));
    assert!(matches!(result, Err(Error::PathNotFound(_))));
}

#[test]
fn test_extract_undecodable_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_recording(temp_dir.path(), "bad.mpg", r#"{"ProgramID": "#);

    let result = extract(&path);
    assert!(matches!(result, Err(Error::MalformedMetadata { .. })));
}

#[test]
fn test_extract_without_metadata_stream() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plain.mpg");
    fs::write(&path, packet(VIDEO_PID, &[0u8; PAYLOAD_SIZE])).unwrap();

    let result = extract(&path);
    assert!(matches!(result, Err(Error::MalformedMetadata { .. })));
}

#[test]
fn test_extract_bad_episode_code_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_recording(
        temp_dir.path(),
        "special.mpg",
        r#"{"ProgramID":"SH1","Title":"Show","EpisodeNumber":"Special"}"#,
    );

    let result = extract(&path);
    assert!(matches!(result, Err(Error::MalformedMetadata { .. })));
}

// ========== RAW EXTRACT TESTS ==========

#[test]
fn test_extract_raw_keeps_bad_episode_code() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_recording(
        temp_dir.path(),
        "special.mpg",
        r#"{"ProgramID":"SH1","Title":"Show","EpisodeNumber":"Special"}"#,
    );

    let record = extract_raw(&path).unwrap();
    assert_eq!(record["ProgramID"], "SH1");
    assert_eq!(record["EpisodeNumber"], "Special");
}

#[test]
fn test_extract_raw_undecodable_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_recording(temp_dir.path(), "bad.mpg", r#"{"ProgramID": "#);

    let result = extract_raw(&path);
    assert!(matches!(result, Err(Error::MalformedMetadata { .. })));
}
