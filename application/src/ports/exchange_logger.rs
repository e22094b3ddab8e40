//! Port for structured exchange logging.
//!
//! Defines the [`ExchangeLogger`] trait for recording what was relayed
//! (questions, answers, session lifecycle, failures) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! transcript (JSONL) of every exchange with the upstream.

use serde_json::Value;

/// A structured exchange event for logging.
pub struct ExchangeEvent {
    /// Event type identifier (e.g., "question", "answer", "session_created").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExchangeEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging exchange events to a structured log.
///
/// `log` is synchronous and infallible; implementations swallow write
/// failures so logging never disrupts a request.
pub trait ExchangeLogger: Send + Sync {
    fn log(&self, event: ExchangeEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExchangeLogger;

impl ExchangeLogger for NoExchangeLogger {
    fn log(&self, _event: ExchangeEvent) {}
}
