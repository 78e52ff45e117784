//! Risk scorer: holds a validated config and scores pipeline inputs.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache_key;
use crate::config::Config;
use crate::error::EngineError;
use crate::score;
use crate::signals::Signals;
use crate::types::*;

/// Stateless apart from its config; safe to share across threads.
#[derive(Debug, Clone)]
pub struct RiskScorer {
  config: Config,
}

impl RiskScorer {
  pub fn new(config: Config) -> Result<Self, EngineError> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn with_defaults() -> Self {
    Self {
      config: Config::default(),
    }
  }

  /// Risk percentage and confidence for one run.
  pub fn predict_failure(&self, commit_diff: &str, test_history: &[bool], logs: &str) -> RiskScore {
    let signals = Signals::extract(commit_diff, test_history, logs, &self.config);
    RiskScore {
      risk_percentage: score::compute_risk(&signals, &self.config),
      confidence: score::compute_confidence(&signals, &self.config),
    }
  }

  /// Reasons behind the risk, one per triggered threshold.
  pub fn identify_causal_factors(
    &self,
    commit_diff: &str,
    test_history: &[bool],
    logs: &str,
  ) -> Vec<String> {
    let signals = Signals::extract(commit_diff, test_history, logs, &self.config);
    score::compute_causal_factors(&signals, &self.config)
  }

  /// Full prediction, stamped with `predicted_at`.
  pub fn assess(&self, req: &PredictionRequest, predicted_at: DateTime<Utc>) -> FailurePrediction {
    let signals = Signals::extract(&req.commit_diff, &req.test_history, &req.logs, &self.config);
    let risk_percentage = score::compute_risk(&signals, &self.config);
    let confidence = score::compute_confidence(&signals, &self.config);
    let causal_factors = score::compute_causal_factors(&signals, &self.config);
    let cache_key = cache_key::compute(req);

    debug!(
      cache_key = %cache_key,
      size_lines = signals.commit.size_lines,
      history_samples = signals.history.samples,
      log_matches = signals.log_matches.len(),
      risk_percentage,
      confidence,
      "scored pipeline run"
    );

    FailurePrediction {
      pipeline_id: req.pipeline_id.clone(),
      cache_key,
      risk_percentage,
      confidence,
      risk_level: RiskLevel::from_percentage(risk_percentage),
      causal_factors,
      predicted_at,
    }
  }
}

impl Default for RiskScorer {
  fn default() -> Self {
    Self::with_defaults()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
  }

  #[test]
  fn invalid_config_is_rejected() {
    let err = RiskScorer::new(Config {
      history_window: 0,
      ..Config::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("history_window"));
  }

  #[test]
  fn assess_matches_individual_operations() {
    let scorer = RiskScorer::with_defaults();
    let req = PredictionRequest {
      pipeline_id: Some("run-7".into()),
      commit_diff: "line\n".repeat(600),
      test_history: vec![true, false, true, false, false],
      logs: "ERROR: build step failed".into(),
    };

    let prediction = scorer.assess(&req, at());
    let score = scorer.predict_failure(&req.commit_diff, &req.test_history, &req.logs);
    let factors = scorer.identify_causal_factors(&req.commit_diff, &req.test_history, &req.logs);

    assert_eq!(prediction.risk_percentage, score.risk_percentage);
    assert_eq!(prediction.confidence, score.confidence);
    assert_eq!(prediction.causal_factors, factors);
    assert_eq!(prediction.pipeline_id.as_deref(), Some("run-7"));
    assert_eq!(prediction.predicted_at, at());
    assert_eq!(
      prediction.risk_level,
      RiskLevel::from_percentage(prediction.risk_percentage)
    );
  }

  #[test]
  fn custom_threshold_changes_factors() {
    let scorer = RiskScorer::new(Config {
      large_commit_lines: 10,
      ..Config::default()
    })
    .unwrap();
    let factors = scorer.identify_causal_factors(&"x\n".repeat(11), &[], "");
    assert_eq!(factors, vec!["Large commit size (11 lines changed)".to_string()]);
  }

  #[test]
  fn custom_log_signal_is_reported() {
    let mut config = Config::default();
    config
      .log_signals
      .push(crate::config::LogSignal::new("SIGSEGV", 30.0, "Native crash"));
    let scorer = RiskScorer::new(config).unwrap();
    let logs = "process exited: SIGSEGV";
    assert_eq!(scorer.identify_causal_factors("", &[], logs), vec!["Native crash"]);
    assert_eq!(scorer.predict_failure("", &[], logs).risk_percentage, 30.0);
  }
}
