//! CI Voice Intent Parser — deterministic keyword/regex rules (no ML).
//!
//! Maps a voice transcript to a command intent plus extracted parameters.
//! Rules are tried in priority order and the first match wins; anything
//! unmatched becomes `CommandIntent::Unknown`. Parsing never fails.

pub mod extract;
pub mod normalize;
pub mod parser;
pub mod rules;
pub mod types;

pub use parser::IntentParser;
pub use rules::Rule;
pub use types::{CommandIntent, Parameters, VoiceCommand};

/// Parse with the built-in rule table.
pub fn parse(transcript: &str) -> VoiceCommand {
  IntentParser::new().parse(transcript)
}
