//! Parameter extractors over normalized transcripts.

use regex::Regex;
use std::sync::OnceLock;

use crate::normalize::contains_any_phrase;
use crate::types::{TARGET_LAST, TARGET_LAST_FAILED};

pub(crate) fn compile_regex(pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|err| panic!("invalid regex {pattern}: {err}"))
}

fn build_number_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    compile_regex(r"#\s*([0-9]+)|\bbuild\s+(?:number\s+)?([0-9]+)\b|\bnumber\s+([0-9]+)\b")
  })
}

/// "#123", "build 123", "build number 123", "number 123" -> "123".
/// ASCII digits only; the value is handed to CI APIs as a build id.
pub fn build_number(text: &str) -> Option<String> {
  let caps = build_number_re().captures(text)?;
  (1..=3)
    .filter_map(|i| caps.get(i))
    .map(|m| m.as_str().to_string())
    .next()
}

/// Spoken time range -> canonical token.
const TIME_RANGES: &[(&str, &str)] = &[
  ("last week", "last_week"),
  ("past week", "last_week"),
  ("previous week", "last_week"),
  ("this week", "this_week"),
  ("this month", "this_month"),
  ("yesterday", "yesterday"),
  ("today", "today"),
  ("tonight", "today"),
];

/// The range mentioned first in the transcript wins; phrases starting at the
/// same position resolve in table order.
pub fn time_range(text: &str) -> Option<&'static str> {
  let padded = format!(" {} ", text);
  TIME_RANGES
    .iter()
    .filter_map(|(phrase, token)| {
      padded
        .find(&format!(" {} ", phrase))
        .map(|pos| (pos, *token))
    })
    .min_by_key(|(pos, _)| *pos)
    .map(|(_, token)| token)
}

const ENVIRONMENTS: &[(&[&str], &str)] = &[
  (&["production", "prod", "live"], "production"),
  (&["staging", "stage"], "staging"),
  (&["development", "dev"], "development"),
];

pub fn environment(text: &str) -> Option<&'static str> {
  ENVIRONMENTS
    .iter()
    .find(|(aliases, _)| contains_any_phrase(text, aliases))
    .map(|(_, env)| *env)
}

const PROVIDERS: &[(&[&str], &str)] = &[
  (&["github", "git hub", "github actions"], "github"),
  (&["gitlab", "git lab"], "gitlab"),
  (&["bitbucket"], "bitbucket"),
  (&["jenkins"], "jenkins"),
  (&["circleci", "circle ci"], "circleci"),
  (&["azure", "azure devops", "azure pipelines"], "azure"),
  (&["bitrise"], "bitrise"),
];

/// CI provider account the command is scoped to, if named.
pub fn provider(text: &str) -> Option<&'static str> {
  PROVIDERS
    .iter()
    .find(|(aliases, _)| contains_any_phrase(text, aliases))
    .map(|(_, p)| *p)
}

const LAST_FAILED_PHRASES: &[&str] = &[
  "last failed",
  "latest failed",
  "most recent failed",
  "previous failed",
  "last failing",
  "failed build",
  "failed builds",
  "failed one",
];

const LAST_PHRASES: &[&str] = &["last", "latest", "most recent", "previous"];

/// Rerun target: an explicit build number, "last_failed", or "last".
pub fn rerun_target(text: &str) -> Option<String> {
  if let Some(n) = build_number(text) {
    return Some(n);
  }
  if contains_any_phrase(text, LAST_FAILED_PHRASES) {
    return Some(TARGET_LAST_FAILED.to_string());
  }
  if contains_any_phrase(text, LAST_PHRASES) {
    return Some(TARGET_LAST.to_string());
  }
  None
}
