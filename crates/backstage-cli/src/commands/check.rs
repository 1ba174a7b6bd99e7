//! `backstage check` command implementation.
//!
//! Loads the configuration the same way `serve` does and reports anything
//! that would stop the dashboard from starting, plus settings that are legal
//! but probably unintended.

use anyhow::{Result, bail};
use backstage_core::BackstageConfig;
use std::path::Path;

// ============================================================================
// Check Result Types
// ============================================================================

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Config section the finding is about, e.g. `api` or `dashboard.auth`.
    pub section: &'static str,
    pub message: String,
}

impl CheckFinding {
    fn error(section: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            section,
            message: message.into(),
        }
    }

    fn warning(section: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            section,
            message: message.into(),
        }
    }

    fn info(section: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            section,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    fn add(&mut self, finding: CheckFinding) {
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Print findings grouped by severity, errors first.
    pub fn print_summary(&self) {
        for (severity, title) in [
            (Severity::Error, "Errors"),
            (Severity::Warning, "Warnings"),
            (Severity::Info, "Info"),
        ] {
            let group: Vec<_> = self.findings.iter().filter(|f| f.severity == severity).collect();
            if group.is_empty() {
                continue;
            }
            println!("\n{title} ({}):", group.len());
            println!("{}", "─".repeat(60));
            for finding in group {
                print_finding(finding);
            }
        }

        println!();
        println!("{}", "═".repeat(60));
        let (errors, warnings) = (self.count(Severity::Error), self.count(Severity::Warning));
        if errors == 0 && warnings == 0 {
            println!("✅ All checks passed!");
        } else {
            println!("Summary: {errors} error(s), {warnings} warning(s)");
        }
    }
}

fn print_finding(finding: &CheckFinding) {
    let icon = match finding.severity {
        Severity::Error => "✗",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    };
    println!("  {icon} [{}]: {}", finding.section, finding.message);
}

// ============================================================================
// Checks
// ============================================================================

/// Inspect a loaded configuration.
pub fn check_config(config: &BackstageConfig) -> CheckResults {
    let mut results = CheckResults::default();

    if let Err(e) = config.validate() {
        results.add(CheckFinding::error("config", e.to_string()));
    }

    let api_url = config.api.resolve_base_url();
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        results.add(CheckFinding::error(
            "api",
            format!("base URL '{api_url}' must start with http:// or https://"),
        ));
    }
    if let Some(var) = &config.api.base_url_env
        && std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
    {
        results.add(CheckFinding::info("api", format!("base URL taken from ${var}")));
    }
    if config.api.timeout_seconds == 0 {
        results.add(CheckFinding::warning("api", "timeout_seconds is 0; every request will time out"));
    }

    let auth = &config.dashboard.auth;
    if auth.cookie_max_age_seconds == 0 {
        results.add(CheckFinding::warning(
            "dashboard.auth",
            "cookie_max_age_seconds is 0; sessions end immediately",
        ));
    }
    if !auth.secure_cookie && !is_loopback(&config.dashboard.host) {
        results.add(CheckFinding::warning(
            "dashboard.auth",
            format!(
                "dashboard listens on {} but secure_cookie is off",
                config.dashboard.host
            ),
        ));
    }

    results
}

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "::1") || host.starts_with("127.")
}

pub fn run(config_path: Option<&Path>) -> Result<()> {
    println!("Checking Backstage configuration...");

    let config = super::load_config(config_path)?;
    println!("  API:    {}", config.api.resolve_base_url());
    println!("  Listen: {}", config.dashboard.listen_addr());

    let results = check_config(&config);
    results.print_summary();

    if results.has_errors() {
        bail!("configuration check failed");
    }
    Ok(())
}
