//! Shared test utilities.
//!
//! A recording [`ChunkSink`] that can be told to fail, plus request builders with the
//! default limits so repeat tests stay short.

use crate::core::repeat::{
    ChunkSink, FailureReason, RepeatLimits, RepeatRequest, RepeatStyle, Visibility,
};

/// Sink that records every accepted payload.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Payloads accepted so far, in send order
    pub sent: Vec<String>,
    /// Number of sends attempted, including the failing one
    pub attempts: usize,
    fail_at: Option<(usize, FailureReason)>,
}

impl RecordingSink {
    /// A sink whose `attempt`-th send (1-based) fails with `reason`.
    pub fn failing_at(attempt: usize, reason: FailureReason) -> Self {
        Self {
            fail_at: Some((attempt, reason)),
            ..Self::default()
        }
    }
}

impl ChunkSink for RecordingSink {
    async fn send_chunk(&mut self, payload: &str) -> Result<(), FailureReason> {
        self.attempts += 1;
        match self.fail_at {
            Some((attempt, reason)) if attempt == self.attempts => Err(reason),
            _ => {
                self.sent.push(payload.to_string());
                Ok(())
            }
        }
    }
}

/// Builds a request with default limits.
///
/// # Panics
/// When the arguments fail validation; tests only pass valid ones.
#[allow(clippy::unwrap_used)]
pub fn request_with(
    body: &str,
    count: i64,
    visibility: Visibility,
    style: RepeatStyle,
) -> RepeatRequest {
    RepeatRequest::new(body, count, visibility, style, &RepeatLimits::default()).unwrap()
}

/// Public plain-style request with default limits.
pub fn public_request(body: &str, count: i64) -> RepeatRequest {
    request_with(body, count, Visibility::Public, RepeatStyle::Plain)
}
