//! Normalize raw speech transcripts before rule matching.

/// Canonical form for matching:
/// - lowercase
/// - "re-run"/"re run" -> "rerun", "roll-back" -> "roll back"
/// - surrounding punctuation stripped from each token (keeps '#')
/// - whitespace collapsed to single spaces
pub fn normalize_transcript(raw: &str) -> String {
  let lower = raw.to_lowercase();
  let tokens: Vec<&str> = lower
    .split_whitespace()
    .map(|t| t.trim_matches(is_edge_punct))
    .filter(|t| !t.is_empty())
    .collect();

  let padded = format!(" {} ", tokens.join(" "))
    .replace(" re-run", " rerun")
    .replace(" re run ", " rerun ")
    .replace(" roll-back ", " roll back ");
  padded.trim().to_string()
}

fn is_edge_punct(c: char) -> bool {
  matches!(c, '?' | '!' | '.' | ',' | ';' | ':' | '"' | '\'' | '(' | ')')
}

/// Whole-phrase match on normalized text ("deploy" does not match "redeploy").
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
  let padded = format!(" {} ", text);
  padded.contains(&format!(" {} ", phrase))
}

/// Any of the phrases present as whole words.
pub fn contains_any_phrase(text: &str, phrases: &[&str]) -> bool {
  phrases.iter().any(|p| contains_phrase(text, p))
}

/// Any token starts with one of the stems ("fail" matches "failed", "failing").
pub fn has_word_starting_with(text: &str, stems: &[&str]) -> bool {
  text
    .split(' ')
    .any(|word| stems.iter().any(|stem| word.starts_with(stem)))
}
