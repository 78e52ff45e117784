//! Core types for the intent parser (JSON contract with the caller).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter map; ordered so serialized output is stable.
pub type Parameters = BTreeMap<String, String>;

pub const PARAM_BUILD_NUMBER: &str = "buildNumber";
pub const PARAM_TIME_RANGE: &str = "timeRange";
pub const PARAM_TARGET: &str = "target";
pub const PARAM_ENVIRONMENT: &str = "environment";
pub const PARAM_PROVIDER: &str = "provider";

/// Rerun / explain target values.
pub const TARGET_LAST_FAILED: &str = "last_failed";
pub const TARGET_LAST: &str = "last";

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandIntent {
  QueryBuildStatus,
  ExplainFailure,
  CheckRiskyDeployments,
  RerunBuild,
  RollbackDeployment,
  /// Transcript matched no rule.
  Unknown,
}

impl CommandIntent {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::QueryBuildStatus => "QUERY_BUILD_STATUS",
      Self::ExplainFailure => "EXPLAIN_FAILURE",
      Self::CheckRiskyDeployments => "CHECK_RISKY_DEPLOYMENTS",
      Self::RerunBuild => "RERUN_BUILD",
      Self::RollbackDeployment => "ROLLBACK_DEPLOYMENT",
      Self::Unknown => "UNKNOWN",
    }
  }

  /// Intents that change CI state; callers should confirm before acting.
  pub fn is_destructive(self) -> bool {
    matches!(self, Self::RerunBuild | Self::RollbackDeployment)
  }
}

impl std::fmt::Display for CommandIntent {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Parsed voice command. Built once per transcript, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
  pub intent: CommandIntent,
  #[serde(default)]
  pub parameters: Parameters,
}

impl VoiceCommand {
  pub fn new(intent: CommandIntent, parameters: Parameters) -> Self {
    Self { intent, parameters }
  }

  pub fn unknown() -> Self {
    Self::new(CommandIntent::Unknown, Parameters::new())
  }

  pub fn is_recognized(&self) -> bool {
    self.intent != CommandIntent::Unknown
  }

  pub fn parameter(&self, key: &str) -> Option<&str> {
    self.parameters.get(key).map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn intent_serializes_screaming_snake() {
    let json = serde_json::to_string(&CommandIntent::CheckRiskyDeployments).unwrap();
    assert_eq!(json, "\"CHECK_RISKY_DEPLOYMENTS\"");
    assert_eq!(
      CommandIntent::CheckRiskyDeployments.to_string(),
      "CHECK_RISKY_DEPLOYMENTS"
    );
  }

  #[test]
  fn unknown_command_has_no_parameters() {
    let cmd = VoiceCommand::unknown();
    assert!(!cmd.is_recognized());
    assert!(cmd.parameters.is_empty());
    assert_eq!(cmd.parameter(PARAM_BUILD_NUMBER), None);
  }

  #[test]
  fn command_parses_without_parameters_field() {
    let cmd: VoiceCommand = serde_json::from_str(r#"{"intent":"RERUN_BUILD"}"#).unwrap();
    assert_eq!(cmd.intent, CommandIntent::RerunBuild);
    assert!(cmd.intent.is_destructive());
  }
}
