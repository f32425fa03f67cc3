#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `dash_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line logged
//! through the macros is tagged with the sequence number of the inbound frame
//! currently being processed on this thread, so a decode or render warning
//! can be traced back to the frame that caused it.

use std::cell::Cell;
use std::fmt;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Sequence number of the frame currently being handled on this thread.
    static FRAME_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the frame sequence number for the current thread.
/// The UI loop calls this once per inbound frame before dispatching it.
pub fn set_frame_seq(seq: u64) {
    FRAME_SEQ.with(|v| v.set(seq));
}

/// Retrieves the frame sequence number for the current thread.
/// Returns 0 if no frame has been handled yet.
pub fn frame_seq() -> u64 {
    FRAME_SEQ.with(|v| v.get())
}

/// Log prefix carrying the current frame sequence number.
///
/// Renders as `[frame N] ` once a frame has been seen and as nothing before.
#[doc(hidden)]
pub struct FramePrefix;

impl fmt::Display for FramePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match frame_seq() {
            0 => Ok(()),
            seq => write!(f, "[frame {seq}] "),
        }
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("{}{}", $crate::FramePrefix, format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("{}{}", $crate::FramePrefix, format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("{}{}", $crate::FramePrefix, format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("{}{}", $crate::FramePrefix, format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("{}{}", $crate::FramePrefix, format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
