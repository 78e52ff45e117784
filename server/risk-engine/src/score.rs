//! Risk percentage, confidence, and human-readable causal factors.

use crate::config::Config;
use crate::signals::Signals;

/// Risk 0–100: commit size + failure ratio + flakiness + log keyword bumps.
pub fn compute_risk(signals: &Signals<'_>, config: &Config) -> f64 {
  let size_ratio =
    (signals.commit.size_lines as f64 / config.large_commit_lines as f64).min(1.0);
  let mut risk = size_ratio * config.commit_size_weight;

  risk += signals.history.failure_ratio() * config.history_weight;
  risk += signals.history.flip_rate() * config.flakiness_weight;

  for signal in &signals.log_matches {
    risk += signal.weight;
  }

  round2(risk.clamp(0.0, 100.0))
}

/// Confidence in (0, 1]: grows with the amount of evidence available.
pub fn compute_confidence(signals: &Signals<'_>, config: &Config) -> f64 {
  let history_evidence =
    (signals.history.samples as f64 / config.history_window as f64).min(1.0);
  let log_evidence =
    (signals.log_lines as f64 / config.log_lines_for_full_evidence as f64).min(1.0);
  let diff_evidence = if signals.commit.has_content { 1.0 } else { 0.0 };

  let confidence = config.confidence_base
    + history_evidence * config.confidence_history_weight
    + log_evidence * config.confidence_log_weight
    + diff_evidence * config.confidence_diff_weight;

  // Base is validated > 0; rounding must not take it to zero.
  round2(confidence.min(1.0)).max(0.01)
}

/// One short reason per triggered threshold: size, history, flakiness, then logs.
pub fn compute_causal_factors(signals: &Signals<'_>, config: &Config) -> Vec<String> {
  let mut out = Vec::new();

  let commit = &signals.commit;
  if commit.size_lines > config.large_commit_lines {
    if commit.sized_by_chars() {
      out.push(format!(
        "Large commit size ({} characters changed)",
        commit.changed_chars
      ));
    } else {
      out.push(format!(
        "Large commit size ({} lines changed)",
        commit.changed_lines
      ));
    }
  }

  let history = &signals.history;
  if history.samples > 0 && history.failure_ratio() >= config.unstable_failure_ratio {
    out.push(format!(
      "Unstable build history ({:.0}% of recent builds failed)",
      history.failure_ratio() * 100.0
    ));
  }
  if history.samples >= config.min_history_for_flakiness
    && history.flip_rate() >= config.flaky_flip_ratio
  {
    out.push(format!(
      "Flaky test results ({} pass/fail flips in recent builds)",
      history.flips
    ));
  }

  for signal in &signals.log_matches {
    out.push(signal.factor.clone());
  }

  out
}

fn round2(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}
