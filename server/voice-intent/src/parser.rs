//! Intent parser: normalizes a transcript and runs it through the rule table.

use tracing::{debug, trace};

use crate::extract;
use crate::normalize::normalize_transcript;
use crate::rules::{default_rules, Rule};
use crate::types::*;

/// Stateless apart from its rule table; safe to share across threads.
#[derive(Debug, Clone)]
pub struct IntentParser {
  rules: Vec<Rule>,
}

impl IntentParser {
  pub fn new() -> Self {
    Self::with_rules(default_rules())
  }

  /// Custom rule table, evaluated in the given order.
  pub fn with_rules(rules: Vec<Rule>) -> Self {
    Self { rules }
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }

  /// Classify a transcript. Never fails: unmatched input is `Unknown`.
  pub fn parse(&self, transcript: &str) -> VoiceCommand {
    let text = normalize_transcript(transcript);
    if text.is_empty() {
      return VoiceCommand::unknown();
    }

    let rule = match self.rules.iter().find(|r| r.matches(&text)) {
      Some(r) => r,
      None => {
        debug!(transcript = %text, "no intent matched");
        return VoiceCommand::unknown();
      }
    };
    trace!(rule = rule.name, "rule matched");

    let mut params = Parameters::new();
    rule.extract(&text, &mut params);
    // Any recognized command may be scoped to one provider account.
    if let Some(p) = extract::provider(&text) {
      params.insert(PARAM_PROVIDER.to_string(), p.to_string());
    }

    debug!(intent = %rule.intent, params = params.len(), "parsed voice command");
    VoiceCommand::new(rule.intent, params)
  }
}

impl Default for IntentParser {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_transcript_is_unknown() {
    let parser = IntentParser::new();
    assert_eq!(parser.parse(""), VoiceCommand::unknown());
    assert_eq!(parser.parse("   ?! "), VoiceCommand::unknown());
  }

  #[test]
  fn provider_is_attached_to_recognized_commands() {
    let cmd = IntentParser::new().parse("What's the status of my GitHub builds?");
    assert_eq!(cmd.intent, CommandIntent::QueryBuildStatus);
    assert_eq!(cmd.parameter(PARAM_PROVIDER), Some("github"));
  }

  #[test]
  fn provider_alone_is_not_a_command() {
    let cmd = IntentParser::new().parse("I like gitlab");
    assert_eq!(cmd, VoiceCommand::unknown());
  }

  #[test]
  fn custom_rule_table_is_respected() {
    fn always(_: &str) -> bool {
      true
    }
    fn nothing(_: &str, _: &mut Parameters) {}

    let parser =
      IntentParser::with_rules(vec![Rule::new("catch_all", CommandIntent::QueryBuildStatus, always, nothing)]);
    assert_eq!(parser.rules().len(), 1);
    assert_eq!(
      parser.parse("rollback the deployment").intent,
      CommandIntent::QueryBuildStatus
    );
  }

  #[test]
  fn empty_rule_table_yields_unknown() {
    let parser = IntentParser::with_rules(Vec::new());
    assert!(!parser.parse("status of my builds").is_recognized());
  }
}
