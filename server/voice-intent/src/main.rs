//! Binary entrypoint: one transcript per stdin line, one VoiceCommand JSON line out.
//!
//! Blank lines produce no output. Logs go to stderr; set RUST_LOG to change
//! the filter.

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;
use voice_intent::IntentParser;

fn main() {
  init_logging();
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "voice-intent error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let parser = IntentParser::new();
  let stdin = io::stdin();
  let mut out = io::BufWriter::new(io::stdout().lock());
  let mut parsed = 0usize;
  let mut unknown = 0usize;

  for line in stdin.lock().lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }

    let command = parser.parse(&line);
    if !command.is_recognized() {
      unknown += 1;
    }
    serde_json::to_writer(&mut out, &command)?;
    writeln!(out)?;
    parsed += 1;
  }

  out.flush()?;
  info!(parsed, unknown, "done");
  Ok(())
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}
