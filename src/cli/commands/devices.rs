//! Devices command implementation.

use crate::models::config::Config;
use crate::services::hdhomerun::DvrClient;
use crate::Result;
use colored::Colorize;

/// List discovered devices.
pub async fn list_devices(config: &Config) -> Result<()> {
    let client = DvrClient::new(&config.device)?;
    let devices = client.discover().await?;

    if devices.is_empty() {
        println!("No devices found.");
        return Ok(());
    }

    println!("{}", format!("Found {} devices", devices.len()).bold());
    println!();

    for device in &devices {
        let kind = if device.is_record_engine() {
            "[RECORD]".green()
        } else {
            "[TUNER]".normal()
        };
        println!(
            "  {} {} {}",
            kind,
            device.label().bold(),
            device.base_url.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
