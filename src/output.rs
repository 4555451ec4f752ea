// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports human-readable and JSON-lines output modes.

use serde::Serialize;
use std::io::Write;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One human-readable status line per stage.
    Normal,
    /// JSON lines for scripting.
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Announce a stage before it runs. The prefix is flushed so progress is
    /// visible while the runtime calls are in flight.
    pub fn stage_begin(&self, index: usize, total: usize, kind: &str) {
        if self.mode == OutputMode::Normal {
            print!("({index}/{total}) Pruning {kind}... ");
            let _ = std::io::stdout().flush();
        }
    }

    /// Complete a stage line with the number of deleted resources.
    pub fn stage_done(&self, index: usize, total: usize, kind: &str, pruned: usize) {
        match self.mode {
            OutputMode::Normal => println!("{pruned} pruned."),
            OutputMode::Json => {
                let event = StageEvent {
                    event: "stage",
                    index,
                    total,
                    kind,
                    pruned,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a fatal error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Error: {message}"),
            OutputMode::Json => {
                let event = ErrorEvent {
                    event: "error",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct StageEvent<'a> {
    event: &'a str,
    index: usize,
    total: usize,
    kind: &'a str,
    pruned: usize,
}

#[derive(Serialize)]
struct ErrorEvent<'a> {
    event: &'a str,
    message: &'a str,
}
