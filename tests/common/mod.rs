//! Shared fixtures: synthetic transport-stream recordings.

#![allow(dead_code)]

use dvr_archiver::core::extractor::{FILL_BYTE, METADATA_PID, PACKET_SIZE, SYNC_BYTE};
use std::fs;
use std::path::{Path, PathBuf};

/// Payload bytes per packet without an adaptation field.
pub const PAYLOAD_SIZE: usize = PACKET_SIZE - 4;

/// PID of the video stream following the metadata run.
pub const VIDEO_PID: u16 = 0x0100;

/// Build one payload-only packet, padding the payload with fill bytes.
pub fn packet(pid: u16, payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() <= PAYLOAD_SIZE);
    let mut pkt = vec![FILL_BYTE; PACKET_SIZE];
    pkt[0] = SYNC_BYTE;
    pkt[1] = ((pid >> 8) as u8) & 0x1F;
    pkt[2] = (pid & 0xFF) as u8;
    pkt[3] = 0x10;
    pkt[4..4 + payload.len()].copy_from_slice(payload);
    pkt
}

/// Split `data` over as many metadata packets as needed.
pub fn metadata_packets(data: &[u8]) -> Vec<Vec<u8>> {
    data.chunks(PAYLOAD_SIZE)
        .map(|chunk| packet(METADATA_PID, chunk))
        .collect()
}

/// A stream whose leading packets carry `json`, followed by video packets.
pub fn recording_stream(json: &str) -> Vec<u8> {
    let mut stream: Vec<u8> = metadata_packets(json.as_bytes()).concat();
    for _ in 0..3 {
        stream.extend(packet(VIDEO_PID, &[0u8; PAYLOAD_SIZE]));
    }
    stream
}

/// Metadata JSON as the device writes it.
pub fn metadata_json(program_id: &str, title: &str) -> String {
    format!(
        r#"{{"ProgramID":"{}","Title":"{}","Category":"series"}}"#,
        program_id, title
    )
}

/// Write a recording file carrying `json` and return its path.
pub fn write_recording(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, recording_stream(json)).unwrap();
    path
}
