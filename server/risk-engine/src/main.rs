//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a PredictionRequest. Output lines are either:
//! - A FailurePrediction (one per valid request)
//! - An ErrorOutput (when the line is not valid JSON)
//!
//! Logs go to stderr; set RUST_LOG to change the filter. RISK_ENGINE_CONFIG
//! may point to a JSON config file overriding the default thresholds.

use chrono::Utc;
use risk_engine::{stream, Config, EngineError, RiskScorer};
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "RISK_ENGINE_CONFIG";

fn main() {
  init_logging();

  let scorer = match load_config().and_then(RiskScorer::new) {
    Ok(s) => s,
    Err(e) => {
      error!(error = %e, "invalid configuration");
      std::process::exit(2);
    }
  };

  if let Err(e) = run_binary(&scorer) {
    error!(error = %e, "i/o failure");
    std::process::exit(1);
  }
}

fn run_binary(scorer: &RiskScorer) -> Result<(), EngineError> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let out = io::BufWriter::new(stdout.lock());

  let scored = stream::run(scorer, stdin.lock(), out, Utc::now)?;
  info!(scored, "done");
  Ok(())
}

fn load_config() -> Result<Config, EngineError> {
  match std::env::var(CONFIG_ENV) {
    Ok(path) => {
      info!(path = %path, "loading config");
      Config::from_json_file(path)
    }
    Err(_) => Ok(Config::default()),
  }
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}
