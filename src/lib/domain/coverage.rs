//! Code coverage results: extracting the percentage from the report tool output and
//! classifying it against the thresholds configured for a target

use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use regex::Regex;

use crate::utils::constants::{coverage::SUMMARY_PERCENT_FIELD, error_messages};

/// Matches the ANSI color sequences emitted by the report tool when colors are requested
const ANSI_ESCAPE: &str = r"\x1b\[[0-9;]*[A-Za-z]";
const NON_NUMERIC: &str = r"[^0-9.]";

/// The minimum coverage percentages accepted for a target. Both are optional
#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub struct CoverageThresholds {
    /// Below this value an advisory warning is reported
    pub warn_below: Option<f64>,
    /// Below this value the coverage operation fails
    pub fail_below: Option<f64>,
}

/// The outcome of comparing a measured coverage against the [`CoverageThresholds`].
/// Both flags may be raised at once
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct CoverageVerdict {
    pub warned: bool,
    pub failed: bool,
}

impl CoverageThresholds {
    pub fn classify(&self, coverage: f64) -> CoverageVerdict {
        CoverageVerdict {
            warned: self.warn_below.is_some_and(|warn| coverage < warn),
            failed: self.fail_below.is_some_and(|fail| coverage < fail),
        }
    }
}

impl CoverageVerdict {
    /// `0` when the coverage is acceptable (even with a warning), `-1` otherwise
    pub fn status_code(&self) -> i32 {
        if self.failed {
            -1
        } else {
            0
        }
    }
}

/// Reads the total coverage percentage from the output of `llvm-cov report`.
///
/// The summary row is the last non blank line of the report. The percentage is its
/// fourth whitespace separated field, once the color sequences and every character
/// that isn't a digit or a dot are removed
pub fn parse_summary_percentage(report: &str) -> Result<f64> {
    let summary = report
        .lines()
        .filter(|line| !line.trim().is_empty())
        .last()
        .ok_or_else(|| eyre!(error_messages::EMPTY_COVERAGE_REPORT))?;

    let ansi_escape = Regex::new(ANSI_ESCAPE)?;
    let summary = ansi_escape.replace_all(summary, "");

    let field = summary
        .split_whitespace()
        .nth(SUMMARY_PERCENT_FIELD)
        .ok_or_else(|| eyre!("{}: {:?}", error_messages::SHORT_COVERAGE_SUMMARY, summary))?;

    let non_numeric = Regex::new(NON_NUMERIC)?;
    non_numeric
        .replace_all(field, "")
        .parse::<f64>()
        .with_context(|| format!("{}: {field:?}", error_messages::UNPARSABLE_COVERAGE))
}
