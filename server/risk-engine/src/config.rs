//! Scoring configuration with sane defaults.
//!
//! Every threshold and weight the scorer uses lives here so policy can change
//! without touching the scoring code. A JSON file may override any subset of
//! fields; the rest keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A log keyword: if `pattern` occurs in the logs, add `weight` once and
/// report `factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSignal {
  /// Case-sensitive substring.
  pub pattern: String,
  pub weight: f64,
  pub factor: String,
}

impl LogSignal {
  pub fn new(pattern: &str, weight: f64, factor: &str) -> Self {
    Self {
      pattern: pattern.to_string(),
      weight,
      factor: factor.to_string(),
    }
  }
}

/// Tunable thresholds for failure prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Changed lines above which a commit counts as "large".
  pub large_commit_lines: usize,
  /// Characters per line when sizing diffs with very long lines.
  pub avg_line_width: usize,
  /// Max risk points from commit size (reached at `large_commit_lines`).
  pub commit_size_weight: f64,
  /// Most recent history entries considered.
  pub history_window: usize,
  /// Risk points at a 100% failure ratio.
  pub history_weight: f64,
  /// Failure ratio (0..1) at which history is reported as unstable.
  pub unstable_failure_ratio: f64,
  /// Risk points at a 100% flip rate (alternating pass/fail).
  pub flakiness_weight: f64,
  /// Flip rate (0..1) at which results are reported as flaky.
  pub flaky_flip_ratio: f64,
  /// Fewer samples than this never count as flaky.
  pub min_history_for_flakiness: usize,
  /// Log keywords, in reporting order.
  pub log_signals: Vec<LogSignal>,
  /// Log length (lines) that counts as full evidence for confidence.
  pub log_lines_for_full_evidence: usize,
  /// Confidence with no evidence at all. Must be > 0.
  pub confidence_base: f64,
  pub confidence_history_weight: f64,
  pub confidence_log_weight: f64,
  pub confidence_diff_weight: f64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      large_commit_lines: 500,
      avg_line_width: 40,
      commit_size_weight: 25.0,
      history_window: 20,
      history_weight: 60.0,
      unstable_failure_ratio: 0.3,
      flakiness_weight: 10.0,
      flaky_flip_ratio: 0.5,
      min_history_for_flakiness: 4,
      log_signals: default_log_signals(),
      log_lines_for_full_evidence: 50,
      confidence_base: 0.1,
      confidence_history_weight: 0.5,
      confidence_log_weight: 0.25,
      confidence_diff_weight: 0.15,
    }
  }
}

fn default_log_signals() -> Vec<LogSignal> {
  vec![
    LogSignal::new("OutOfMemoryError", 25.0, "Memory issues detected in build logs"),
    LogSignal::new("ERROR", 15.0, "Errors reported in build logs"),
    LogSignal::new("Exception", 10.0, "Unhandled exceptions in build logs"),
    LogSignal::new("FAILED", 10.0, "Failed steps in build logs"),
    LogSignal::new("timed out", 10.0, "Timeouts in build logs"),
    LogSignal::new("Connection refused", 10.0, "Network issues in build logs"),
    LogSignal::new("WARNING", 5.0, "Warnings in build logs"),
  ]
}

impl Config {
  /// Load a (possibly partial) JSON config and validate it.
  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
    let raw = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&raw)?;
    config.validate()?;
    Ok(config)
  }

  /// Reject configs that would break the output ranges.
  pub fn validate(&self) -> Result<(), EngineError> {
    if self.large_commit_lines == 0 {
      return Err(EngineError::validation("large_commit_lines", "must be > 0"));
    }
    if self.avg_line_width == 0 {
      return Err(EngineError::validation("avg_line_width", "must be > 0"));
    }
    if self.history_window == 0 {
      return Err(EngineError::validation("history_window", "must be > 0"));
    }
    if self.log_lines_for_full_evidence == 0 {
      return Err(EngineError::validation(
        "log_lines_for_full_evidence",
        "must be > 0",
      ));
    }
    if self.min_history_for_flakiness < 2 {
      return Err(EngineError::validation(
        "min_history_for_flakiness",
        "must be >= 2",
      ));
    }

    check_ratio("unstable_failure_ratio", self.unstable_failure_ratio)?;
    check_ratio("flaky_flip_ratio", self.flaky_flip_ratio)?;

    check_weight("commit_size_weight", self.commit_size_weight)?;
    check_weight("history_weight", self.history_weight)?;
    check_weight("flakiness_weight", self.flakiness_weight)?;
    check_weight("confidence_history_weight", self.confidence_history_weight)?;
    check_weight("confidence_log_weight", self.confidence_log_weight)?;
    check_weight("confidence_diff_weight", self.confidence_diff_weight)?;

    if !(self.confidence_base > 0.0 && self.confidence_base <= 1.0) {
      return Err(EngineError::validation(
        "confidence_base",
        "must be in (0, 1]",
      ));
    }

    for signal in &self.log_signals {
      if signal.pattern.is_empty() {
        return Err(EngineError::validation(
          "log_signals[].pattern",
          "must not be empty",
        ));
      }
      check_weight("log_signals[].weight", signal.weight)?;
    }

    Ok(())
  }
}

fn check_ratio(field: &str, v: f64) -> Result<(), EngineError> {
  if (0.0..=1.0).contains(&v) {
    Ok(())
  } else {
    Err(EngineError::validation(field, "must be in [0, 1]"))
  }
}

fn check_weight(field: &str, v: f64) -> Result<(), EngineError> {
  if v.is_finite() && v >= 0.0 {
    Ok(())
  } else {
    Err(EngineError::validation(field, "must be finite and >= 0"))
  }
}
