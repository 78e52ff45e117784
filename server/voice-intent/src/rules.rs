//! Ordered intent rules: (predicate, intent, parameter extractor).
//!
//! Evaluated top to bottom; the first predicate that holds wins. Literal
//! phrasings come first, then commands spoken as imperatives, then looser
//! keyword rules. Questions never reach the destructive keyword rules, so
//! "why did the rebuild fail" is an explanation, not a rerun.

use regex::Regex;
use std::sync::OnceLock;

use crate::extract::{self, compile_regex};
use crate::normalize::{contains_any_phrase, contains_phrase, has_word_starting_with};
use crate::types::*;

/// One classification rule over a normalized transcript.
#[derive(Clone, Copy)]
pub struct Rule {
  pub name: &'static str,
  pub intent: CommandIntent,
  matches: fn(&str) -> bool,
  extract: fn(&str, &mut Parameters),
}

impl Rule {
  pub fn new(
    name: &'static str,
    intent: CommandIntent,
    matches: fn(&str) -> bool,
    extract: fn(&str, &mut Parameters),
  ) -> Self {
    Self {
      name,
      intent,
      matches,
      extract,
    }
  }

  pub fn matches(&self, text: &str) -> bool {
    (self.matches)(text)
  }

  pub fn extract(&self, text: &str, params: &mut Parameters) {
    (self.extract)(text, params)
  }
}

impl std::fmt::Debug for Rule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Rule")
      .field("name", &self.name)
      .field("intent", &self.intent)
      .finish()
  }
}

/// Built-in rules in priority order.
pub fn default_rules() -> Vec<Rule> {
  vec![
    Rule::new(
      "build_number_failure",
      CommandIntent::ExplainFailure,
      is_build_number_failure,
      extract_build_number_failure,
    ),
    Rule::new(
      "status_of_my_builds",
      CommandIntent::QueryBuildStatus,
      is_status_of_my_builds,
      extract_build_status,
    ),
    Rule::new(
      "rerun_command",
      CommandIntent::RerunBuild,
      is_rerun_command,
      extract_rerun,
    ),
    Rule::new(
      "rollback_command",
      CommandIntent::RollbackDeployment,
      is_rollback_command,
      extract_rollback,
    ),
    Rule::new(
      "explain_failure",
      CommandIntent::ExplainFailure,
      is_explain_failure,
      extract_explain_failure,
    ),
    Rule::new("rerun", CommandIntent::RerunBuild, is_rerun, extract_rerun),
    Rule::new(
      "rollback",
      CommandIntent::RollbackDeployment,
      is_rollback,
      extract_rollback,
    ),
    Rule::new(
      "risky_deployments",
      CommandIntent::CheckRiskyDeployments,
      is_risky_deployments,
      extract_risky_deployments,
    ),
    Rule::new(
      "build_status",
      CommandIntent::QueryBuildStatus,
      is_build_status,
      extract_build_status,
    ),
  ]
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Leading filler dropped before checking whether a transcript is a command.
const COURTESY_PREFIXES: &[&str] = &[
  "please",
  "hey",
  "ok",
  "okay",
  "can you",
  "could you",
  "would you",
  "will you",
  "go ahead and",
  "now",
  "just",
  "i want to",
  "i'd like to",
  "let's",
];
const STATUS_OF_MY_BUILDS: &[&str] = &[
  "status of my builds",
  "status of my build",
  "status of all my builds",
  "status of our builds",
];
const ROLLBACK_STARTS: &[&str] = &["rollback", "roll", "revert", "undo"];
const DEPLOY_STEMS: &[&str] = &["deploy", "release"];
const RERUN_VERBS: &[&str] = &[
  "rerun",
  "retry",
  "restart",
  "rebuild",
  "run again",
  "trigger again",
  "kick off again",
];
const FAILURE_STEMS: &[&str] = &["fail", "broke", "crash", "error"];
const EXPLAIN_PHRASES: &[&str] = &[
  "why",
  "explain",
  "what happened",
  "what went wrong",
  "tell me about",
  "how come",
];
const QUESTION_STARTS: &[&str] = &[
  "why", "what", "what's", "how", "when", "who", "which", "where", "did", "does", "do", "is",
  "are", "was", "were", "has", "have", "should",
];
const RISK_STEMS: &[&str] = &["risk"];
const STATUS_PHRASES: &[&str] = &["status", "statuses"];
const BUILD_STEMS: &[&str] = &["build", "pipeline", "job", "workflow"];
const QUERY_PHRASES: &[&str] = &["how", "check", "show", "list", "what", "are", "is"];

/// "build #12 fail", "build 12 failed", "build number 12 failing".
fn build_number_failure_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| compile_regex(r"\bbuild\s+(?:#\s*|number\s+)?([0-9]+)\s+fail"))
}

/// A build number followed within two words by a failure word.
fn number_near_failure_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    compile_regex(
      r"(?:#\s*|\bbuild\s+(?:number\s+)?|\bnumber\s+)[0-9]+(?:\s+\S+){0,2}?\s+(?:fail|broke|crash|error)",
    )
  })
}

/// "rollback", "roll back", "roll it back", "roll the prod deploy back", "revert", "undo".
fn rollback_verb_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| compile_regex(r"\brollback\b|\broll(?:\s+\S+){0,3}?\s+back\b|\brevert|\bundo\b"))
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Text with leading courtesy words removed ("please can you rerun it" -> "rerun it").
fn strip_courtesy(text: &str) -> &str {
  let mut rest = text;
  loop {
    let stripped = COURTESY_PREFIXES.iter().find_map(|p| {
      if rest == *p {
        Some("")
      } else {
        rest.strip_prefix(*p).and_then(|r| r.strip_prefix(' '))
      }
    });
    match stripped {
      Some(r) => rest = r,
      None => return rest,
    }
  }
}

fn starts_with_any(text: &str, phrases: &[&str]) -> bool {
  let text = strip_courtesy(text);
  phrases.iter().any(|p| {
    text == *p || text.strip_prefix(*p).is_some_and(|r| r.starts_with(' '))
  })
}

fn is_question(text: &str) -> bool {
  starts_with_any(text, QUESTION_STARTS)
}

fn has_deploy_context(text: &str) -> bool {
  has_word_starting_with(text, DEPLOY_STEMS) || extract::environment(text).is_some()
}

fn is_build_number_failure(text: &str) -> bool {
  build_number_failure_re().is_match(text)
}

fn is_status_of_my_builds(text: &str) -> bool {
  contains_any_phrase(text, STATUS_OF_MY_BUILDS)
}

fn is_rerun_command(text: &str) -> bool {
  starts_with_any(text, RERUN_VERBS)
}

fn is_rollback_command(text: &str) -> bool {
  starts_with_any(text, ROLLBACK_STARTS) && is_rollback(text)
}

fn is_explain_failure(text: &str) -> bool {
  number_near_failure_re().is_match(text)
    || (has_word_starting_with(text, FAILURE_STEMS) && contains_any_phrase(text, EXPLAIN_PHRASES))
}

fn is_rerun(text: &str) -> bool {
  !is_question(text) && contains_any_phrase(text, RERUN_VERBS)
}

fn is_rollback(text: &str) -> bool {
  !is_question(text) && rollback_verb_re().is_match(text) && has_deploy_context(text)
}

fn is_risky_deployments(text: &str) -> bool {
  has_word_starting_with(text, RISK_STEMS) && has_word_starting_with(text, DEPLOY_STEMS)
}

fn is_build_status(text: &str) -> bool {
  contains_any_phrase(text, STATUS_PHRASES)
    || ((has_word_starting_with(text, BUILD_STEMS) || contains_phrase(text, "ci"))
      && contains_any_phrase(text, QUERY_PHRASES))
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

fn insert(params: &mut Parameters, key: &str, value: Option<impl Into<String>>) {
  if let Some(v) = value {
    params.insert(key.to_string(), v.into());
  }
}

fn extract_rollback(text: &str, params: &mut Parameters) {
  insert(params, PARAM_ENVIRONMENT, extract::environment(text));
  insert(params, PARAM_BUILD_NUMBER, extract::build_number(text));
}

fn extract_rerun(text: &str, params: &mut Parameters) {
  insert(params, PARAM_TARGET, extract::rerun_target(text));
  insert(params, PARAM_BUILD_NUMBER, extract::build_number(text));
}

fn extract_build_number_failure(text: &str, params: &mut Parameters) {
  let number = build_number_failure_re()
    .captures(text)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str());
  match number {
    Some(n) => insert(params, PARAM_BUILD_NUMBER, Some(n)),
    None => extract_explain_failure(text, params),
  }
}

fn extract_explain_failure(text: &str, params: &mut Parameters) {
  match extract::build_number(text) {
    Some(n) => insert(params, PARAM_BUILD_NUMBER, Some(n)),
    None => insert(params, PARAM_TARGET, Some(TARGET_LAST_FAILED)),
  }
}

fn extract_risky_deployments(text: &str, params: &mut Parameters) {
  insert(params, PARAM_TIME_RANGE, extract::time_range(text));
  insert(params, PARAM_ENVIRONMENT, extract::environment(text));
}

fn extract_build_status(text: &str, params: &mut Parameters) {
  insert(params, PARAM_TIME_RANGE, extract::time_range(text));
}
