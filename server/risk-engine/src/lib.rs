//! CI Failure Risk Engine — rule-based scoring; no ML, no DB, no network.
//!
//! Scores a pipeline run from its commit diff, recent pass/fail history and
//! build logs. Used by the binary for stdin/stdout; can also be called as a
//! library. All functions are pure: identical inputs give identical outputs.

pub mod cache_key;
pub mod config;
pub mod error;
pub mod score;
pub mod scorer;
pub mod signals;
pub mod stream;
pub mod types;

pub use config::{Config, LogSignal};
pub use error::EngineError;
pub use scorer::RiskScorer;
pub use types::{FailurePrediction, PredictionRequest, RiskLevel, RiskScore};

/// Risk percentage and confidence with the default config.
pub fn predict_failure(commit_diff: &str, test_history: &[bool], logs: &str) -> RiskScore {
  RiskScorer::with_defaults().predict_failure(commit_diff, test_history, logs)
}

/// Causal factors with the default config.
pub fn identify_causal_factors(commit_diff: &str, test_history: &[bool], logs: &str) -> Vec<String> {
  RiskScorer::with_defaults().identify_causal_factors(commit_diff, test_history, logs)
}
