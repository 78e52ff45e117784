//! Stable cache key for a prediction input.

use crate::types::PredictionRequest;

/// `pred-` + 16 hex chars of a blake3 hash over the three inputs.
///
/// Each input is length-prefixed so moving text between fields changes the key.
/// `pipeline_id` is not part of the key: two pipelines with identical inputs
/// share a prediction.
pub fn compute(req: &PredictionRequest) -> String {
  let mut hasher = blake3::Hasher::new();

  hasher.update(&(req.commit_diff.len() as u64).to_le_bytes());
  hasher.update(req.commit_diff.as_bytes());

  hasher.update(&(req.test_history.len() as u64).to_le_bytes());
  for &failed in &req.test_history {
    hasher.update(if failed { b"1" } else { b"0" });
  }

  hasher.update(&(req.logs.len() as u64).to_le_bytes());
  hasher.update(req.logs.as_bytes());

  let hex = hasher.finalize().to_hex();
  format!("pred-{}", &hex[..16])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn req(diff: &str, history: Vec<bool>, logs: &str) -> PredictionRequest {
    PredictionRequest {
      pipeline_id: None,
      commit_diff: diff.into(),
      test_history: history,
      logs: logs.into(),
    }
  }

  #[test]
  fn same_input_same_key() {
    let a = req("diff", vec![true, false], "ERROR");
    let b = req("diff", vec![true, false], "ERROR");
    assert_eq!(compute(&a), compute(&b));
  }

  #[test]
  fn pipeline_id_does_not_affect_key() {
    let a = req("diff", vec![true], "log");
    let mut b = a.clone();
    b.pipeline_id = Some("run-42".into());
    assert_eq!(compute(&a), compute(&b));
  }

  #[test]
  fn shifting_text_between_fields_changes_key() {
    let a = req("ab", vec![], "c");
    let b = req("a", vec![], "bc");
    assert_ne!(compute(&a), compute(&b));
  }

  #[test]
  fn history_order_matters() {
    let a = req("", vec![true, false], "");
    let b = req("", vec![false, true], "");
    assert_ne!(compute(&a), compute(&b));
  }

  #[test]
  fn key_format() {
    let key = compute(&req("", vec![], ""));
    assert!(key.starts_with("pred-"));
    assert_eq!(key.len(), 5 + 16);
    assert!(key[5..].chars().all(|c| c.is_ascii_hexdigit()));
  }
}
