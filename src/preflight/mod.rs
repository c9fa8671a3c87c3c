//! Preflight checks module.

mod discover;
mod mkvmerge;

use crate::models::config::Config;
use colored::Colorize;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Run all preflight checks.
///
/// The mkvmerge check is only relevant to commands that remux.
pub async fn run_preflight_checks(config: &Config, needs_mkvmerge: bool) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if needs_mkvmerge {
        results.push(mkvmerge::check(&config.mkvmerge));
    }

    results.push(discover::check(&config.device).await);

    results
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if result.success {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_passed() {
        let results = vec![
            CheckResult::ok("mkvmerge", "installed"),
            CheckResult::fail("Discovery", "not reachable", "check network"),
        ];
        assert!(!all_passed(&results));
        assert!(all_passed(&results[..1]));
        assert!(all_passed(&[]));
    }
}
