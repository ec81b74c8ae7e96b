//! Timing of user actions.

use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measures one user action and logs it on completion.
#[derive(Debug)]
pub struct ActionTimer {
    action: &'static str,
    started: Instant,
}

impl ActionTimer {
    pub fn start(action: &'static str) -> Self {
        Self {
            action,
            started: Instant::now(),
        }
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the elapsed time with the result's outcome and return it.
    pub fn finish<T, E: fmt::Display>(self, result: &Result<T, E>) -> Outcome {
        let elapsed_ms = self.elapsed().as_millis() as u64;
        let outcome = match result {
            Ok(_) => Outcome::Ok,
            Err(_) => Outcome::Error,
        };

        match result {
            Err(e) => info!(action = self.action, elapsed_ms, outcome = %outcome, error = %e, "action finished"),
            Ok(_) => info!(action = self.action, elapsed_ms, outcome = %outcome, "action finished"),
        }
        outcome
    }
}
