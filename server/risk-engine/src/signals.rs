//! Raw signal extraction: commit size, build history, log keywords.
//!
//! Both the score and the causal factors are derived from the same
//! `Signals`, so they can never disagree about what was observed.

use crate::config::{Config, LogSignal};

/// Size of the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSignal {
  pub changed_lines: usize,
  pub changed_chars: usize,
  /// `max(changed_lines, changed_chars / avg_line_width)`; long lines still count.
  pub size_lines: usize,
  /// Diff has any non-whitespace text.
  pub has_content: bool,
}

impl CommitSignal {
  /// Size came from the character count rather than line breaks.
  pub fn sized_by_chars(&self) -> bool {
    self.size_lines > self.changed_lines
  }
}

/// Recent pass/fail behaviour (tail of the history, at most `history_window`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySignal {
  pub samples: usize,
  pub failures: usize,
  /// Adjacent pass->fail or fail->pass transitions.
  pub flips: usize,
}

impl HistorySignal {
  pub fn failure_ratio(&self) -> f64 {
    if self.samples == 0 {
      0.0
    } else {
      self.failures as f64 / self.samples as f64
    }
  }

  pub fn flip_rate(&self) -> f64 {
    if self.samples < 2 {
      0.0
    } else {
      self.flips as f64 / (self.samples - 1) as f64
    }
  }
}

/// Everything observed about one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals<'a> {
  pub commit: CommitSignal,
  pub history: HistorySignal,
  pub log_lines: usize,
  /// Matched log keywords, in config order.
  pub log_matches: Vec<&'a LogSignal>,
}

impl<'a> Signals<'a> {
  pub fn extract(
    commit_diff: &str,
    test_history: &[bool],
    logs: &str,
    config: &'a Config,
  ) -> Self {
    Self {
      commit: analyze_commit(commit_diff, config.avg_line_width),
      history: analyze_history(test_history, config.history_window),
      log_lines: logs.lines().count(),
      log_matches: match_log_signals(logs, &config.log_signals),
    }
  }
}

/// Measure the change.
///
/// A unified diff (a `---`/`+++` file header plus an `@@ -` hunk header) counts
/// only `+`/`-` lines, ignoring the file headers. Anything else counts every
/// line.
pub fn analyze_commit(diff: &str, avg_line_width: usize) -> CommitSignal {
  let has_file_header = diff
    .lines()
    .any(|l| l.starts_with("--- ") || l.starts_with("+++ "));
  let has_hunk_header = diff.lines().any(|l| l.starts_with("@@ -"));

  let changed: Vec<&str> = if has_file_header && has_hunk_header {
    diff
      .lines()
      .filter(|l| {
        (l.starts_with('+') && !l.starts_with("+++"))
          || (l.starts_with('-') && !l.starts_with("---"))
      })
      .collect()
  } else {
    diff.lines().collect()
  };

  let changed_lines = changed.len();
  let changed_chars: usize = changed.iter().map(|l| l.chars().count()).sum();
  let size_lines = changed_lines.max(changed_chars / avg_line_width.max(1));

  CommitSignal {
    changed_lines,
    changed_chars,
    size_lines,
    has_content: !diff.trim().is_empty(),
  }
}

/// Summarize the most recent `window` entries (the tail; history is oldest first).
pub fn analyze_history(history: &[bool], window: usize) -> HistorySignal {
  let start = history.len().saturating_sub(window);
  let recent = &history[start..];
  HistorySignal {
    samples: recent.len(),
    failures: recent.iter().filter(|&&failed| failed).count(),
    flips: recent.windows(2).filter(|w| w[0] != w[1]).count(),
  }
}

/// Log keywords present in `logs`, each at most once.
pub fn match_log_signals<'a>(logs: &str, signals: &'a [LogSignal]) -> Vec<&'a LogSignal> {
  signals
    .iter()
    .filter(|s| !s.pattern.is_empty() && logs.contains(s.pattern.as_str()))
    .collect()
}
