//! mkvmerge preflight check.

use super::CheckResult;
use crate::models::config::MkvmergeConfig;
use crate::services::mkvmerge;

/// Check if mkvmerge is installed.
pub fn check(config: &MkvmergeConfig) -> CheckResult {
    if mkvmerge::is_installed(&config.binary) {
        match mkvmerge::get_version(&config.binary) {
            Ok(version) => CheckResult::ok("mkvmerge", &format!("installed ({})", version)),
            Err(_) => CheckResult::ok("mkvmerge", "installed"),
        }
    } else {
        CheckResult::fail(
            "mkvmerge",
            "not found",
            "Install MKVToolNix: sudo apt install mkvtoolnix, or set MKVMERGE_BIN",
        )
    }
}
