//! Input/output types for the risk engine (JSON contract with the caller).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// One prediction request. Missing fields default to empty; unknown fields
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRequest {
  /// Echoed back so the caller can store the prediction with its pipeline.
  #[serde(default)]
  pub pipeline_id: Option<String>,
  #[serde(default)]
  pub commit_diff: String,
  /// Chronological, oldest first; `true` = failed run.
  #[serde(default)]
  pub test_history: Vec<bool>,
  #[serde(default)]
  pub logs: String,
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Risk percentage in [0, 100] and confidence in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskScore {
  pub risk_percentage: f64,
  pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
  Critical,
}

impl RiskLevel {
  pub fn from_percentage(risk: f64) -> Self {
    if risk >= 75.0 {
      Self::Critical
    } else if risk >= 50.0 {
      Self::High
    } else if risk >= 25.0 {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Full prediction for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailurePrediction {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pipeline_id: Option<String>,
  /// Stable per input triple; use it to reuse a cached prediction.
  pub cache_key: String,
  pub risk_percentage: f64,
  pub confidence: f64,
  pub risk_level: RiskLevel,
  pub causal_factors: Vec<String>,
  pub predicted_at: DateTime<Utc>,
}

/// Structured error output for input lines that are not valid JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
    }
  }
}
