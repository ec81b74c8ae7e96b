//! Logging setup and action timing for the STYLiSH client.
//!
//! Library crates only emit `tracing` events. Binaries call
//! [`init_logging`] once at startup to decide where those events go.
//!
//! ```rust,no_run
//! use stylish_observability::{init_logging, ActionTimer, LogConfig, LogFormat, LogLevel};
//!
//! init_logging(&LogConfig::new(LogLevel::Debug, LogFormat::Human)).ok();
//!
//! let timer = ActionTimer::start("browse");
//! let result: Result<(), String> = Ok(());
//! timer.finish(&result);
//! ```

mod error;
mod logging;
mod timer;

pub use error::ObservabilityError;
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use timer::{ActionTimer, Outcome};
