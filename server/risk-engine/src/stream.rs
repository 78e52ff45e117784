//! JSON-lines driver used by the binary: requests in, predictions out.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::EngineError;
use crate::scorer::RiskScorer;
use crate::types::{ErrorOutput, PredictionRequest};

/// Score every non-blank line of `input`, writing one JSON line per request.
///
/// Lines that are not valid JSON produce an `ErrorOutput` line and processing
/// continues. Read and write failures stop the loop and are returned.
/// Returns the number of requests scored.
pub fn run<R, W, F>(
  scorer: &RiskScorer,
  input: R,
  mut out: W,
  mut now: F,
) -> Result<usize, EngineError>
where
  R: BufRead,
  W: Write,
  F: FnMut() -> DateTime<Utc>,
{
  let mut scored = 0usize;

  for line in input.lines() {
    let line = line?;

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let req: PredictionRequest = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        warn!(error = %e, "rejected input line");
        serde_json::to_writer(&mut out, &ErrorOutput::new(format!("json parse: {}", e)))?;
        writeln!(out)?;
        continue;
      }
    };

    let prediction = scorer.assess(&req, now());
    serde_json::to_writer(&mut out, &prediction)?;
    writeln!(out)?;
    scored += 1;
  }

  out.flush()?;
  Ok(scored)
}
