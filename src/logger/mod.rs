//! Logger exports and the process-global facade.
//!
//! Binaries call `init_logger` once early in `main` and then use the
//! free functions (`logger::info(...)`) anywhere. The global is a
//! `OnceLock`: the first `init_logger` wins, later calls are ignored,
//! and logging before initialization is a no-op.
//!
//! ```rust,no_run
//! use collab_graph::logger;
//! logger::init_logger(logger::StdoutLogger);
//! logger::info("build started");
//! ```

pub mod core;

pub use core::{CaptureLogger, LogLevel, Logger, NoopLogger, StdoutLogger};

use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();

/// Install the process-wide logger. Only the first call has an effect.
pub fn init_logger<L: Logger>(logger: L) {
    let _ = GLOBAL_LOGGER.set(Box::new(logger));
}

/// Log through the global logger if one is installed, otherwise no-op.
pub fn log(level: LogLevel, message: &str) {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.log(level, message);
    }
}

pub fn debug(msg: &str) {
    log(LogLevel::Debug, msg);
}

pub fn info(msg: &str) {
    log(LogLevel::Info, msg);
}

pub fn warn(msg: &str) {
    log(LogLevel::Warn, msg);
}

pub fn error(msg: &str) {
    log(LogLevel::Error, msg);
}

#[cfg(test)]
pub mod tests;
