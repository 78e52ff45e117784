//! Integration tests for the risk engine.

use chrono::{TimeZone, Utc};
use risk_engine::{
  identify_causal_factors, predict_failure, Config, PredictionRequest, RiskLevel, RiskScorer,
};

fn fixture_request() -> PredictionRequest {
  let json = r#"{
    "pipeline_id": "gh-actions/main/1842",
    "commit_diff": "--- a/app/build.gradle\n+++ b/app/build.gradle\n@@ -10,2 +10,2 @@\n-    minSdk 24\n+    minSdk 26\n",
    "test_history": [false, false, true, false, true, true, false, true, true, true],
    "logs": "> Task :app:test\nERROR: 3 tests failed\nWARNING: deprecated API\nOutOfMemoryError: Java heap space\n"
  }"#;
  serde_json::from_str(json).unwrap()
}

#[test]
fn high_churn_failing_history_and_error_logs_are_risky() {
  let diff = "a".repeat(1000);
  let history = [true, true, false, true, true, false, true, true, false, true];
  let logs = "ERROR\nWARNING\nERROR\nWARNING\nERROR\nWARNING\n";

  let score = predict_failure(&diff, &history, logs);
  assert!(score.risk_percentage > 50.0, "risk {}", score.risk_percentage);
  assert!(score.confidence > 0.0 && score.confidence <= 1.0);
}

#[test]
fn large_commit_is_a_causal_factor() {
  let diff = "line\n".repeat(600);
  let factors = identify_causal_factors(&diff, &[], "");
  assert!(
    factors.iter().any(|f| f.contains("Large commit size")),
    "{:?}",
    factors
  );
}

#[test]
fn half_failed_history_is_unstable() {
  let history = [true, false, true, false, true, false, true, false, true, false];
  let factors = identify_causal_factors("", &history, "");
  assert!(
    factors.iter().any(|f| f.contains("Unstable build history")),
    "{:?}",
    factors
  );
}

#[test]
fn out_of_memory_logs_are_memory_issues() {
  let factors = identify_causal_factors("", &[], "OutOfMemoryError: Java heap space");
  assert!(
    factors.iter().any(|f| f.contains("Memory issues")),
    "{:?}",
    factors
  );
}

#[test]
fn empty_inputs_are_valid() {
  let score = predict_failure("", &[], "");
  assert_eq!(score.risk_percentage, 0.0);
  assert!(score.confidence > 0.0 && score.confidence <= 1.0);
  assert!(identify_causal_factors("", &[], "").is_empty());
}

#[test]
fn repeated_calls_are_identical() {
  let req = fixture_request();
  assert_eq!(
    predict_failure(&req.commit_diff, &req.test_history, &req.logs),
    predict_failure(&req.commit_diff, &req.test_history, &req.logs)
  );
  assert_eq!(
    identify_causal_factors(&req.commit_diff, &req.test_history, &req.logs),
    identify_causal_factors(&req.commit_diff, &req.test_history, &req.logs)
  );
}

#[test]
fn deterministic_output_across_runs() {
  let req = fixture_request();
  let at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();

  let json1 = serde_json::to_string(&RiskScorer::with_defaults().assess(&req, at)).unwrap();
  let json2 = serde_json::to_string(&RiskScorer::with_defaults().assess(&req, at)).unwrap();
  assert_eq!(json1, json2, "Same inputs must produce identical JSON output");
}

#[test]
fn assess_produces_full_prediction() {
  let req = fixture_request();
  let at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
  let prediction = RiskScorer::with_defaults().assess(&req, at);

  assert_eq!(prediction.pipeline_id.as_deref(), Some("gh-actions/main/1842"));
  assert!(prediction.cache_key.starts_with("pred-"));
  // 6/10 failures (36) + flips + ERROR/WARNING/OOM (45) -> critical.
  assert_eq!(prediction.risk_level, RiskLevel::Critical);
  assert!(prediction
    .causal_factors
    .iter()
    .any(|f| f.contains("Unstable build history")));
  assert!(prediction
    .causal_factors
    .iter()
    .any(|f| f.contains("Memory issues")));
  // Two changed lines in a unified diff: not large.
  assert!(!prediction
    .causal_factors
    .iter()
    .any(|f| f.contains("Large commit size")));

  let value = serde_json::to_value(&prediction).unwrap();
  assert_eq!(value["risk_level"], "critical");
  assert_eq!(value["predicted_at"], "2025-01-15T10:30:00Z");
}

#[test]
fn unknown_fields_are_ignored() {
  let json = r#"{"commit_diff": "x", "provider": "gitlab", "attempt": 2}"#;
  let req: PredictionRequest = serde_json::from_str(json).unwrap();
  let at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
  let prediction = RiskScorer::with_defaults().assess(&req, at);
  assert!(prediction.pipeline_id.is_none());
  let value = serde_json::to_value(&prediction).unwrap();
  assert!(value.get("pipeline_id").is_none());
}

#[test]
fn config_file_overrides_thresholds() {
  let dir = std::env::temp_dir().join(format!("risk-engine-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("config.json");
  std::fs::write(&path, r#"{"large_commit_lines": 50, "unstable_failure_ratio": 0.9}"#).unwrap();

  let config = Config::from_json_file(&path).unwrap();
  let scorer = RiskScorer::new(config).unwrap();

  let factors = scorer.identify_causal_factors(&"line\n".repeat(60), &[true, false], "");
  assert_eq!(factors, vec!["Large commit size (60 lines changed)".to_string()]);

  std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn invalid_config_file_gives_clear_error() {
  let dir = std::env::temp_dir().join(format!("risk-engine-bad-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("config.json");
  std::fs::write(&path, r#"{"flaky_flip_ratio": 2.0}"#).unwrap();

  let err = Config::from_json_file(&path).unwrap_err();
  assert!(err.to_string().contains("flaky_flip_ratio"), "{}", err);

  std::fs::remove_dir_all(&dir).unwrap();
}
