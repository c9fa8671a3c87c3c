//! Transport-stream metadata extractor.
//!
//! Recordings carry a JSON copy of their metadata in a private stream
//! (PID `0x1FFA`) that occupies the first packets of the file. The extractor
//! collects the payloads of that leading run, strips the `0xFF` fill bytes
//! and decodes the JSON record.

use crate::models::recording::RecordingMetadata;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Transport stream packet length.
pub const PACKET_SIZE: usize = 188;

/// Sync byte at the start of every packet.
pub const SYNC_BYTE: u8 = 0x47;

/// PID of the private metadata stream.
pub const METADATA_PID: u16 = 0x1FFA;

/// Maximum number of leading packets inspected.
pub const MAX_METADATA_PACKETS: usize = 64;

/// Fill byte padding the metadata stream.
pub const FILL_BYTE: u8 = 0xFF;

/// A single transport stream packet.
pub struct Packet<'a> {
    bytes: &'a [u8; PACKET_SIZE],
}

impl<'a> Packet<'a> {
    /// Wrap raw bytes, checking the sync byte.
    pub fn new(bytes: &'a [u8; PACKET_SIZE]) -> std::result::Result<Self, String> {
        if bytes[0] != SYNC_BYTE {
            return Err(format!("bad sync byte 0x{:02X}", bytes[0]));
        }
        Ok(Self { bytes })
    }

    /// 13-bit packet identifier.
    pub fn pid(&self) -> u16 {
        (u16::from(self.bytes[1] & 0x1F) << 8) | u16::from(self.bytes[2])
    }

    /// Payload bytes, skipping any adaptation field.
    ///
    /// Packets without a payload, or with an adaptation field that overruns
    /// the packet, yield an empty slice.
    pub fn payload(&self) -> &'a [u8] {
        let control = (self.bytes[3] >> 4) & 0x03;
        let start = match control {
            0b01 => 4,
            0b11 => 5 + usize::from(self.bytes[4]),
            _ => return &[],
        };
        if start > PACKET_SIZE {
            return &[];
        }
        &self.bytes[start..]
    }
}

/// Collect the payloads of the leading metadata packets, untrimmed.
///
/// Scanning stops at the first packet with a different PID, at end of
/// stream, or after [`MAX_METADATA_PACKETS`] packets. A packet that cannot
/// be read (bad sync byte, I/O error) is logged and skipped. If the scan
/// ends without collecting anything and a read failure occurred, that
/// failure is returned.
pub fn read_metadata_payload<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut buf = [0u8; PACKET_SIZE];
    let mut payload = Vec::new();
    let mut last_failure: Option<std::io::Error> = None;

    for index in 0..MAX_METADATA_PACKETS {
        match reader.read_exact(&mut buf) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                tracing::debug!("End of stream after {} packets", index);
                break;
            }
            Err(e) => {
                tracing::warn!("Unable to read TS packet {}: {}", index, e);
                last_failure = Some(e);
                continue;
            }
        }

        let packet = match Packet::new(&buf) {
            Ok(packet) => packet,
            Err(reason) => {
                tracing::warn!("Unable to read TS packet {}: {}", index, reason);
                last_failure = Some(std::io::Error::new(ErrorKind::InvalidData, reason));
                continue;
            }
        };

        if packet.pid() != METADATA_PID {
            tracing::debug!(
                "Metadata run ended at packet {} (PID 0x{:04X})",
                index,
                packet.pid()
            );
            break;
        }

        payload.extend_from_slice(packet.payload());
    }

    if payload.is_empty() {
        if let Some(e) = last_failure {
            return Err(Error::Io(e));
        }
    }

    Ok(payload)
}

/// Strip trailing fill bytes.
pub fn trim_padding(buf: &[u8]) -> &[u8] {
    let end = buf
        .iter()
        .rposition(|&b| b != FILL_BYTE)
        .map(|i| i + 1)
        .unwrap_or(0);
    &buf[..end]
}

/// Decode a trimmed metadata buffer and parse its episode code.
pub fn decode_metadata(buf: &[u8], path: &Path) -> Result<RecordingMetadata> {
    if buf.is_empty() {
        return Err(Error::malformed(path, "no metadata packets"));
    }

    let mut metadata: RecordingMetadata = serde_json::from_slice(buf)
        .map_err(|e| Error::malformed(path, format!("undecodable record: {}", e)))?;

    metadata
        .resolve_episode()
        .map_err(|e| Error::malformed(path, e.to_string()))?;

    Ok(metadata)
}

/// Read the trimmed metadata payload of a recording file.
fn read_file_payload(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| {
        tracing::error!("Unable to open {}: {}", path.display(), e);
        if e.kind() == ErrorKind::NotFound {
            Error::PathNotFound(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;

    let mut reader = BufReader::new(file);
    let mut payload = read_metadata_payload(&mut reader)?;
    let len = trim_padding(&payload).len();
    payload.truncate(len);

    Ok(payload)
}

/// Extract the embedded metadata record from a recording file.
pub fn extract(path: &Path) -> Result<RecordingMetadata> {
    decode_metadata(&read_file_payload(path)?, path)
}

/// Extract the embedded record as untyped JSON.
///
/// Field values are not validated, so a record with an unparseable
/// episode code still comes back whole.
pub fn extract_raw(path: &Path) -> Result<serde_json::Value> {
    let payload = read_file_payload(path)?;
    if payload.is_empty() {
        return Err(Error::malformed(path, "no metadata packets"));
    }

    serde_json::from_slice(&payload)
        .map_err(|e| Error::malformed(path, format!("undecodable record: {}", e)))
}
