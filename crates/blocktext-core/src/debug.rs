//! Debug output and error reporting
//!
//! Render calls receive a [`DebugContext`] instead of reading global
//! settings. The context decides whether a debug line is worth emitting
//! and hands it to a [`LogSink`]; the default sink forwards to `tracing`.

use std::fmt;

/// Destination for debug lines and reported errors
pub trait LogSink {
    /// Emit a debug line. The context has already checked the level.
    fn debug(&self, message: &str, level: u8);

    /// Report a failed render
    fn error(&self, message: &str);
}

/// Sends everything to the `tracing` macros
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, message: &str, level: u8) {
        tracing::debug!(debug_level = level, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

static TRACING_SINK: TracingSink = TracingSink;

/// Debug settings threaded through a render call
#[derive(Clone, Copy)]
pub struct DebugContext<'a> {
    enabled: bool,
    level: u8,
    sink: &'a dyn LogSink,
}

impl DebugContext<'static> {
    /// Debug switched off, errors go to `tracing`
    pub fn disabled() -> Self {
        Self::new(false, 1)
    }

    /// Debug settings that log through `tracing`
    pub fn new(enabled: bool, level: u8) -> Self {
        Self {
            enabled,
            level,
            sink: &TRACING_SINK,
        }
    }
}

impl<'a> DebugContext<'a> {
    /// Same settings with a different sink
    pub fn with_sink<'b>(self, sink: &'b dyn LogSink) -> DebugContext<'b> {
        DebugContext {
            enabled: self.enabled,
            level: self.level,
            sink,
        }
    }

    /// Whether a line needing `required` would be emitted
    pub fn wants(&self, required: u8) -> bool {
        self.enabled && self.level >= required
    }

    /// Emit a debug line if the configured level reaches `required`.
    /// The message is only built when it will be used.
    pub fn log<F>(&self, required: u8, message: F)
    where
        F: FnOnce() -> String,
    {
        if self.wants(required) {
            self.sink.debug(&message(), required);
        }
    }

    /// Report an error, regardless of debug settings
    pub fn report(&self, error: &dyn fmt::Display) {
        self.sink.error(&error.to_string());
    }
}

impl Default for DebugContext<'static> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for DebugContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugContext")
            .field("enabled", &self.enabled)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Sink that keeps everything in memory, useful for asserting on reports
#[derive(Debug, Default)]
pub struct MemorySink {
    debug: std::cell::RefCell<Vec<(String, u8)>>,
    errors: std::cell::RefCell<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug_lines(&self) -> Vec<(String, u8)> {
        self.debug.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl LogSink for MemorySink {
    fn debug(&self, message: &str, level: u8) {
        self.debug.borrow_mut().push((message.to_string(), level));
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
