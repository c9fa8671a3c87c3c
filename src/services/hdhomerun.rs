//! HDHomeRun DVR API client.
//!
//! Covers the three calls the archiver needs: device discovery, the
//! recorded files list of a record engine, and the per-recording delete
//! command.

use crate::models::config::DeviceConfig;
use crate::models::device::Device;
use crate::models::recording::{RecordingDescriptor, RecordingMetadata};
use crate::{Error, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("dvr-archiver/", env!("CARGO_PKG_VERSION"));

/// HDHomeRun API client.
pub struct DvrClient {
    discover_url: String,
    client: reqwest::Client,
}

impl DvrClient {
    /// Create a new client from device configuration.
    pub fn new(config: &DeviceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            discover_url: config.discover_url.clone(),
            client,
        })
    }

    /// GET a URL and check for a 2xx status.
    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        tracing::debug!("GET\t{}", url);

        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    /// GET a URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.get(url).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Check that the discover endpoint answers.
    pub async fn health_check(&self) -> Result<bool> {
        let url = parse_url(&self.discover_url)?;
        match self.client.get(url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// List devices on the local network.
    pub async fn discover(&self) -> Result<Vec<Device>> {
        let url = parse_url(&self.discover_url)?;
        let devices: Vec<Device> = self.get_json(url).await?;
        tracing::debug!("Discovered {} devices", devices.len());
        Ok(devices)
    }

    /// Fetch the recordings stored on a record engine.
    ///
    /// Fails if any entry carries an episode code that does not parse.
    pub async fn recorded_files(&self, device: &Device) -> Result<Vec<RecordingDescriptor>> {
        if !device.is_record_engine() {
            return Err(Error::NotRecordEngine(device.label().to_string()));
        }

        let base = device
            .base_url
            .as_deref()
            .ok_or_else(|| Error::InvalidUrl(format!("{} has no BaseURL", device.label())))?;
        let url = recorded_files_url(base)?;

        let entries: Vec<RecordingMetadata> = self.get_json(url).await?;

        entries
            .into_iter()
            .map(|mut metadata| -> Result<RecordingDescriptor> {
                metadata.resolve_episode().map_err(|e| {
                    tracing::warn!(
                        "Error parsing EpisodeNumber of {}: {}",
                        metadata.display_name(),
                        e
                    );
                    e
                })?;
                Ok(RecordingDescriptor::new(metadata))
            })
            .collect()
    }

    /// Collect the recordings of every record engine.
    ///
    /// Discovery failure is fatal. A record engine whose list cannot be
    /// fetched is logged and skipped so the remaining devices still count.
    pub async fn all_recordings(&self) -> Result<Vec<RecordingDescriptor>> {
        let devices = self.discover().await?;
        let mut recordings = Vec::new();

        for device in devices.iter().filter(|d| d.is_record_engine()) {
            match self.recorded_files(device).await {
                Ok(found) => {
                    tracing::info!("{}: {} recordings", device.label(), found.len());
                    recordings.extend(found);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to fetch recorded files for device {}: {}",
                        device.label(),
                        e
                    );
                }
            }
        }

        Ok(recordings)
    }

    /// Delete a recording on the device, optionally allowing it to be
    /// recorded again.
    pub async fn delete(&self, recording: &RecordingDescriptor, rerecord: bool) -> Result<()> {
        let cmd_url = recording.metadata.cmd_url.as_deref().ok_or_else(|| {
            Error::InvalidUrl(format!(
                "{} has no CmdURL",
                recording.metadata.display_name()
            ))
        })?;

        self.get(delete_url(cmd_url, rerecord)?).await?;
        Ok(())
    }
}

fn parse_url(s: &str) -> Result<Url> {
    Url::parse(s).map_err(|e| Error::InvalidUrl(format!("{}: {}", s, e)))
}

/// `<base>/recorded_files.json`.
pub fn recorded_files_url(base_url: &str) -> Result<Url> {
    parse_url(base_url)?
        .join("/recorded_files.json")
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))
}

/// Command URL with `cmd=delete` and optional `rerecord=1` set.
pub fn delete_url(cmd_url: &str, rerecord: bool) -> Result<Url> {
    let mut url = parse_url(cmd_url)?;

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "cmd" && k != "rerecord")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.push(("cmd".to_string(), "delete".to_string()));
    if rerecord {
        params.push(("rerecord".to_string(), "1".to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(params);
    Ok(url)
}
