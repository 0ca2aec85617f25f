//! # Diagnostic Sink
//!
//! The merge pass reports progress and skipped work through a
//! single-method logger supplied by the caller. No severity levels; the
//! messages are human-readable one-liners.

/// A single-method logger accepting human-readable diagnostics.
pub trait DiagnosticSink {
    /// Record one diagnostic line.
    fn log(&mut self, message: &str);
}

/// Forwards diagnostics to `tracing` at info level. The default sink for
/// CLI and pipeline use.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&mut self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Buffers diagnostics in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Vec<String>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages logged so far, in order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether any logged message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
