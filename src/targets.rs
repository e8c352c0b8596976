//! Phony target extraction.
//!
//! Runs `ninja -t targets rule phony` against a build directory and filters
//! the CMake bookkeeping targets out of its listing.

use std::process::{ExitStatus, Stdio};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use log::debug;
use regex::{Regex, RegexBuilder};
use strip_ansi_escapes::strip;
use tokio::process::Command;

/// Targets whose line matches this pattern (case-insensitively) are dropped.
const IGNORED_TARGETS: &str = "(cmake|edit_cache|rebuild_cache|install)";

static IGNORED: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(IGNORED_TARGETS)
        .case_insensitive(true)
        .build()
        .expect("target filter is a valid regex")
});

/// The target-listing query for a single build directory.
#[derive(Debug, Clone)]
pub struct TargetQuery {
    /// Build tool executable.
    pub program: String,
    /// Build directory passed to `-C`.
    pub build_path: String,
}

impl TargetQuery {
    pub fn new(program: impl Into<String>, build_path: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            build_path: build_path.into(),
        }
    }

    /// Arguments passed to the build tool.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-C".to_string(),
            self.build_path.clone(),
            "-t".to_string(),
            "targets".to_string(),
            "rule".to_string(),
            "phony".to_string(),
        ]
    }

    /// Shell-quoted command line, for logging.
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(7);
        parts.push(self.program.clone());
        parts.extend(self.args());
        shell_words::join(parts)
    }
}

/// Runs the query and returns the filtered phony targets.
///
/// A non-zero exit is reported and yields an empty list. Failing to spawn the
/// tool, or output that is not UTF-8, is an error.
pub async fn extract_targets(query: &TargetQuery) -> Result<Vec<String>> {
    debug!("running: {}", query.display());
    let output = Command::new(&query.program)
        .args(query.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("failed to run {}", query.display()))?;
    targets_from_output(output.status, &output.stdout, &output.stderr)
}

fn targets_from_output(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Result<Vec<String>> {
    if !status.success() {
        // Always reaches stderr, whatever RUST_LOG says.
        eprintln!("{}", failure_report(status, stderr));
        return Ok(Vec::new());
    }
    let listing = std::str::from_utf8(stdout).context("target listing is not valid UTF-8")?;
    Ok(filter_targets(listing))
}

fn failure_report(status: ExitStatus, stderr: &[u8]) -> String {
    let code = match status.code() {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    };
    let mut report = format!("target query failed, return code is {}", code);
    let stderr = String::from_utf8_lossy(&strip(stderr)).trim_end().to_string();
    if !stderr.is_empty() {
        report.push('\n');
        report.push_str(&stderr);
    }
    report
}

/// Splits a target listing into lines and drops the ignored targets,
/// preserving order.
pub fn filter_targets(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|line| !IGNORED.is_match(line))
        .map(str::to_string)
        .collect()
}
