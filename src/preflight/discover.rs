//! Device discovery preflight check.

use super::CheckResult;
use crate::models::config::DeviceConfig;
use crate::services::hdhomerun::DvrClient;

/// Check if the discover endpoint is reachable.
pub async fn check(config: &DeviceConfig) -> CheckResult {
    let client = match DvrClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::fail(
                "Discovery",
                &format!("client setup failed: {}", e),
                "Check the [device] section of your config",
            )
        }
    };

    match client.health_check().await {
        Ok(true) => CheckResult::ok("Discovery", &format!("reachable ({})", config.discover_url)),
        Ok(false) | Err(_) => CheckResult::fail(
            "Discovery",
            &format!("{} not reachable", config.discover_url),
            "Check your network connection or set DVR_DISCOVER_URL",
        ),
    }
}
