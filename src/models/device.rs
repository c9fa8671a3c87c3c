//! Device data model.

use serde::{Deserialize, Serialize};

/// A tuner/storage device as returned by the discover endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Device {
    /// Device ID (tuners only).
    #[serde(rename = "DeviceID", skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// LAN address.
    #[serde(rename = "LocalIP", skip_serializing_if = "Option::is_none")]
    pub local_ip: Option<String>,
    /// HTTP base URL of the device.
    #[serde(rename = "BaseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-device discover URL.
    #[serde(rename = "DiscoverURL", skip_serializing_if = "Option::is_none")]
    pub discover_url: Option<String>,
    /// Storage ID (record engines only).
    #[serde(rename = "StorageID", skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<String>,
    /// Storage URL (record engines only).
    #[serde(rename = "StorageURL", skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
}

impl Device {
    /// Whether this device stores recordings.
    pub fn is_record_engine(&self) -> bool {
        self.storage_id.is_some() && self.storage_url.is_some()
    }

    /// Best identifier available for logs.
    pub fn label(&self) -> &str {
        self.friendly_name
            .as_deref()
            .or(self.storage_id.as_deref())
            .or(self.device_id.as_deref())
            .or(self.local_ip.as_deref())
            .unwrap_or("unknown device")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_engine_requires_storage_fields() {
        let tuner: Device = serde_json::from_str(
            r#"{"DeviceID": "1050ABCD", "LocalIP": "10.0.0.5", "BaseURL": "http://10.0.0.5"}"#,
        )
        .unwrap();
        assert!(!tuner.is_record_engine());

        let engine: Device = serde_json::from_str(
            r#"{"StorageID": "ABCD-1", "StorageURL": "http://10.0.0.9/recorded_files.json",
                "BaseURL": "http://10.0.0.9"}"#,
        )
        .unwrap();
        assert!(engine.is_record_engine());
        assert_eq!(engine.label(), "ABCD-1");
    }
}
