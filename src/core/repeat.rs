//! Chunked repeat delivery - splits a repeated line across a bounded number of sends.
//!
//! A request either renders one private block, or spreads `count` copies of a line over at
//! most `max_chunks` public sends. Each chunk stays under the configured character ceiling.
//! The chunk size is recomputed on every step from the lines still owed and the slots still
//! free (ceiling division). This keeps the schedule even, and it still delivers every line
//! when an earlier chunk had to shrink to fit the ceiling.
//!
//! Nothing here talks to Discord directly: sends go through a [`ChunkSink`] supplied by the
//! bot layer, and failures come back as a [`FailureReason`] inside the [`DeliveryOutcome`].

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::future::Future;

/// Appended when a block is cut to fit a ceiling.
pub const TRUNCATION_MARKER: char = '…';

/// Size and count limits for repeat delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepeatLimits {
    /// Maximum characters in one chunk payload
    pub char_ceiling: usize,
    /// Hard per-message limit enforced by the platform
    pub hard_platform_limit: usize,
    /// Follow-up sends permitted per invocation
    pub max_chunks: usize,
    /// Smallest accepted repeat count
    pub min_count: u32,
    /// Largest accepted repeat count
    pub max_count: u32,
}

impl Default for RepeatLimits {
    fn default() -> Self {
        Self {
            char_ceiling: 1900,
            hard_platform_limit: 2000,
            max_chunks: 5,
            min_count: 1,
            max_count: 10,
        }
    }
}

impl RepeatLimits {
    /// Rejects combinations the delivery loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.max_chunks == 0 {
            Some("max_chunks must be at least 1".to_string())
        } else if self.char_ceiling < 2 {
            Some("char_ceiling must be at least 2".to_string())
        } else if self.char_ceiling >= self.hard_platform_limit {
            Some(format!(
                "char_ceiling ({}) must be below hard_platform_limit ({})",
                self.char_ceiling, self.hard_platform_limit
            ))
        } else if self.min_count == 0 {
            Some("min_count must be at least 1".to_string())
        } else if self.min_count > self.max_count {
            Some(format!(
                "min_count ({}) must not exceed max_count ({})",
                self.min_count, self.max_count
            ))
        } else {
            None
        };

        problem.map_or(Ok(()), |message| Err(Error::Config { message }))
    }
}

/// Who gets to see the repeated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// One response visible only to the invoker
    Private,
    /// Follow-up messages visible to the whole channel
    Public,
}

/// Line formatter applied before repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatStyle {
    /// The line as typed
    Plain,
    /// The line as a markdown heading
    Loud,
}

impl RepeatStyle {
    /// Formats one line. Pure: the same input always renders the same output.
    #[must_use]
    pub fn format_line(self, body: &str) -> String {
        match self {
            Self::Plain => body.to_string(),
            Self::Loud => format!("# {body}"),
        }
    }

    /// Noun used in the success banner.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Plain => "message(s)",
            Self::Loud => "big message(s)",
        }
    }

    /// How many lines a failure preview shows at most.
    #[must_use]
    pub const fn preview_lines(self) -> usize {
        match self {
            Self::Plain => 10,
            Self::Loud => 5,
        }
    }
}

/// A validated repeat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatRequest {
    line: String,
    count: usize,
    visibility: Visibility,
    style: RepeatStyle,
}

impl RepeatRequest {
    /// Validates `count` against `limits` and formats `body` with `style`.
    ///
    /// # Errors
    /// [`Error::CountOutOfRange`] when `count` is outside `[min_count, max_count]`, and
    /// [`Error::EmptyMessage`] when the formatted line is blank.
    pub fn new(
        body: &str,
        count: i64,
        visibility: Visibility,
        style: RepeatStyle,
        limits: &RepeatLimits,
    ) -> Result<Self> {
        if count < i64::from(limits.min_count) || count > i64::from(limits.max_count) {
            return Err(Error::CountOutOfRange {
                count,
                min: limits.min_count,
                max: limits.max_count,
            });
        }
        let count = usize::try_from(count).map_err(|_| Error::CountOutOfRange {
            count,
            min: limits.min_count,
            max: limits.max_count,
        })?;

        if body.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        let line = style.format_line(body);
        if line.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }

        Ok(Self {
            line,
            count,
            visibility,
            style,
        })
    }

    /// Reply shown when the count is rejected.
    #[must_use]
    pub fn validation_message(limits: &RepeatLimits) -> String {
        format!(
            "❌ Please choose a number between {} and {}!",
            limits.min_count, limits.max_count
        )
    }

    /// The formatted line that gets repeated.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Number of repetitions requested.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub const fn style(&self) -> RepeatStyle {
        self.style
    }
}

/// One outgoing message carrying `line_count` repeated lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Lines actually rendered into `payload`
    pub line_count: usize,
    /// Text to send
    pub payload: String,
}

/// Ordered chunks that deliver a request when every send succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryPlan {
    /// Chunks in posting order
    pub chunks: Vec<Chunk>,
}

impl DeliveryPlan {
    /// Sum of lines across all chunks.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.line_count).sum()
    }
}

/// Why a send was refused by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The bot lacks permission to post here
    PermissionDenied,
    /// The channel blocks app messages, or the request was rate limited
    RateLimitedOrBlocked,
    /// Anything else, including timeouts
    Unknown,
}

impl FailureReason {
    /// Classifies an HTTP failure by status and, when present, Discord's JSON error code.
    #[must_use]
    pub const fn from_http_status(status: u16, json_code: Option<isize>) -> Self {
        match (status, json_code) {
            // 50001 Missing Access, 50013 Missing Permissions
            (403, Some(50001 | 50013)) => Self::PermissionDenied,
            (403 | 429, _) => Self::RateLimitedOrBlocked,
            _ => Self::Unknown,
        }
    }

    /// Banner line explaining the failure.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::PermissionDenied => "I'm missing permission to post app messages here.",
            Self::RateLimitedOrBlocked => "Public app messages are blocked in this channel.",
            Self::Unknown => "I couldn't post publicly here.",
        }
    }
}

/// How a delivery ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Every requested line was sent
    Complete,
    /// Some lines were sent, then the slots ran out or a send failed
    Partial,
    /// Nothing was sent
    Failed,
}

/// Result of one delivery attempt. Lives for one invocation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Lines the caller asked for
    pub requested: usize,
    /// Lines in chunks the sink accepted
    pub lines_sent: usize,
    /// Chunks the sink accepted
    pub chunks_sent: usize,
    /// Chunks handed to the sink, including a failed one
    pub chunks_attempted: usize,
    /// Set when a send failed
    pub failure_reason: Option<FailureReason>,
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        if self.lines_sent >= self.requested {
            DeliveryStatus::Complete
        } else if self.lines_sent > 0 {
            DeliveryStatus::Partial
        } else {
            DeliveryStatus::Failed
        }
    }
}

/// Transport for chunk payloads.
///
/// Implementations must not retry on their own behalf unless the retry is invisible to the
/// caller; the delivery loop stops at the first `Err`.
pub trait ChunkSink {
    /// Sends one payload and waits for the platform to accept it.
    fn send_chunk(
        &mut self,
        payload: &str,
    ) -> impl Future<Output = std::result::Result<(), FailureReason>> + Send;
}

/// Cuts `text` to `max_chars` characters and appends [`TRUNCATION_MARKER`] when it was longer.
#[must_use]
pub fn clip(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut clipped = text[..byte_index].to_string();
            clipped.push(TRUNCATION_MARKER);
            clipped
        }
        None => text.to_string(),
    }
}

fn repeat_lines(line: &str, lines: usize) -> String {
    vec![line; lines].join("\n")
}

/// Renders the next chunk for `remaining` lines across `slots_left` sends.
fn next_chunk(line: &str, remaining: usize, slots_left: usize, char_ceiling: usize) -> Chunk {
    let per_chunk = remaining.div_ceil(slots_left).max(1);
    let line_len = line.chars().count();
    let block_len = per_chunk * (line_len + 1) - 1;

    let line_count = if block_len > char_ceiling {
        (char_ceiling / (line_len + 1)).max(1)
    } else {
        per_chunk
    };

    let payload = if line_len > char_ceiling {
        clip(line, char_ceiling - 1)
    } else {
        repeat_lines(line, line_count)
    };

    Chunk {
        line_count,
        payload,
    }
}

/// The private block: every line joined, clipped to the ceiling.
#[must_use]
pub fn private_block(request: &RepeatRequest, limits: &RepeatLimits) -> String {
    clip(
        &repeat_lines(&request.line, request.count),
        limits.char_ceiling,
    )
}

/// Plans the chunks a public delivery would send if every send succeeded.
#[must_use]
pub fn plan(request: &RepeatRequest, limits: &RepeatLimits) -> DeliveryPlan {
    if request.visibility == Visibility::Private {
        return DeliveryPlan {
            chunks: vec![Chunk {
                line_count: request.count,
                payload: private_block(request, limits),
            }],
        };
    }

    let mut chunks = Vec::new();
    let mut sent = 0;
    while sent < request.count && chunks.len() < limits.max_chunks {
        let chunk = next_chunk(
            &request.line,
            request.count - sent,
            limits.max_chunks - chunks.len(),
            limits.char_ceiling,
        );
        sent += chunk.line_count;
        chunks.push(chunk);
    }
    DeliveryPlan { chunks }
}

/// Delivers `request` through `sink` and reports what made it out.
///
/// Sends are issued one at a time in posting order. The first failed send ends the loop;
/// chunks already sent stay sent.
pub async fn plan_and_deliver<S: ChunkSink>(
    request: &RepeatRequest,
    limits: &RepeatLimits,
    sink: &mut S,
) -> DeliveryOutcome {
    let mut outcome = DeliveryOutcome {
        requested: request.count,
        lines_sent: 0,
        chunks_sent: 0,
        chunks_attempted: 0,
        failure_reason: None,
    };

    if request.visibility == Visibility::Private {
        outcome.chunks_attempted = 1;
        match sink.send_chunk(&private_block(request, limits)).await {
            Ok(()) => {
                outcome.lines_sent = request.count;
                outcome.chunks_sent = 1;
            }
            Err(reason) => outcome.failure_reason = Some(reason),
        }
        return outcome;
    }

    while outcome.lines_sent < request.count && outcome.chunks_attempted < limits.max_chunks {
        let chunk = next_chunk(
            &request.line,
            request.count - outcome.lines_sent,
            limits.max_chunks - outcome.chunks_attempted,
            limits.char_ceiling,
        );
        outcome.chunks_attempted += 1;

        if let Err(reason) = sink.send_chunk(&chunk.payload).await {
            outcome.failure_reason = Some(reason);
            break;
        }
        outcome.lines_sent += chunk.line_count;
        outcome.chunks_sent += 1;
    }

    outcome
}

/// Renders the user-visible summary for a finished public delivery.
#[must_use]
pub fn render_outcome(
    outcome: &DeliveryOutcome,
    request: &RepeatRequest,
    limits: &RepeatLimits,
) -> String {
    let text = match outcome.status() {
        DeliveryStatus::Complete => format!(
            "✅ Sent {count}/{count} {noun} to the channel.",
            count = request.count,
            noun = request.style.noun()
        ),
        DeliveryStatus::Partial => format!(
            "⚠️ Sent {}/{}. Hit follow-up limit; try fewer repeats.",
            outcome.lines_sent, request.count
        ),
        DeliveryStatus::Failed => {
            let preview_lines = request.count.min(request.style.preview_lines());
            let preview = clip(
                &repeat_lines(&request.line, preview_lines),
                limits.char_ceiling,
            );
            let reason = outcome.failure_reason.unwrap_or(FailureReason::Unknown);
            format!(
                "❌ {}\nAsk a mod to enable 'Use External Apps' for this channel, or grant the bot 'Send Messages'.\n\n{preview}",
                reason.describe()
            )
        }
    };

    clip(&text, limits.hard_platform_limit - 1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{RecordingSink, public_request, request_with};

    #[test]
    fn test_count_validation_rejects_out_of_range() {
        let limits = RepeatLimits::default();
        for count in [0, -3, 11, 1000] {
            let result =
                RepeatRequest::new("hi", count, Visibility::Public, RepeatStyle::Plain, &limits);
            assert!(matches!(
                result,
                Err(Error::CountOutOfRange { min: 1, max: 10, .. })
            ));
        }
        assert_eq!(
            RepeatRequest::validation_message(&limits),
            "❌ Please choose a number between 1 and 10!"
        );
    }

    #[test]
    fn test_blank_message_rejected() {
        let limits = RepeatLimits::default();
        let result = RepeatRequest::new("   ", 3, Visibility::Public, RepeatStyle::Loud, &limits);
        assert!(matches!(result, Err(Error::EmptyMessage)));
    }

    #[test]
    fn test_loud_style_formats_heading() {
        assert_eq!(RepeatStyle::Loud.format_line("hey"), "# hey");
        assert_eq!(RepeatStyle::Plain.format_line("hey"), "hey");
        assert_eq!(
            RepeatStyle::Loud.format_line("hey"),
            RepeatStyle::Loud.format_line("hey")
        );
    }

    #[test]
    fn test_plan_ten_short_lines_is_two_per_chunk() {
        let limits = RepeatLimits::default();
        let plan = plan(&public_request("x", 10), &limits);
        let sizes: Vec<usize> = plan.chunks.iter().map(|c| c.line_count).collect();
        assert_eq!(sizes, vec![2, 2, 2, 2, 2]);
        assert_eq!(plan.chunks[0].payload, "x\nx");
    }

    #[test]
    fn test_plan_seven_lines_uses_decreasing_schedule() {
        let limits = RepeatLimits::default();
        let first = plan(&public_request("hello", 7), &limits);
        let sizes: Vec<usize> = first.chunks.iter().map(|c| c.line_count).collect();
        assert_eq!(sizes, vec![2, 2, 1, 1, 1]);
        assert_eq!(first, plan(&public_request("hello", 7), &limits));
    }

    #[test]
    fn test_plan_conserves_lines_and_respects_bounds() {
        let limits = RepeatLimits::default();
        let long = "z".repeat(400);
        let huge = "q".repeat(2500);
        for count in 1..=10 {
            for body in ["a", "hello world", long.as_str(), huge.as_str()] {
                let plan = plan(&public_request(body, count), &limits);
                assert!(plan.chunks.len() <= limits.max_chunks);
                for chunk in &plan.chunks {
                    assert!(chunk.line_count >= 1);
                    assert!(chunk.payload.chars().count() <= limits.char_ceiling);
                }
                if body.len() <= 400 {
                    assert_eq!(plan.total_lines(), usize::try_from(count).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_shrink_keeps_whole_lines_under_ceiling() {
        let limits = RepeatLimits::default();
        let line = "y".repeat(1000);
        let plan = plan(&public_request(&line, 10), &limits);
        assert!(plan.chunks.iter().all(|c| c.line_count == 1));
        assert_eq!(plan.total_lines(), 5);
    }

    #[test]
    fn test_oversized_line_is_clipped_to_one_line() {
        let limits = RepeatLimits::default();
        let line = "w".repeat(2500);
        let plan = plan(&public_request(&line, 1), &limits);
        assert_eq!(plan.chunks.len(), 1);
        assert_eq!(plan.chunks[0].line_count, 1);
        assert_eq!(plan.chunks[0].payload.chars().count(), limits.char_ceiling);
        assert!(plan.chunks[0].payload.ends_with(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_deliver_all_succeed() {
        let limits = RepeatLimits::default();
        let request = public_request("hi", 5);
        let mut sink = RecordingSink::default();

        let outcome = plan_and_deliver(&request, &limits, &mut sink).await;

        assert_eq!(outcome.lines_sent, 5);
        assert_eq!(outcome.chunks_sent, 5);
        assert_eq!(outcome.status(), DeliveryStatus::Complete);
        assert_eq!(sink.sent, vec!["hi"; 5]);
        assert_eq!(
            render_outcome(&outcome, &request, &limits),
            "✅ Sent 5/5 message(s) to the channel."
        );
    }

    #[tokio::test]
    async fn test_deliver_stops_at_first_failure() {
        let limits = RepeatLimits::default();
        let request = public_request("x", 10);
        let mut sink = RecordingSink::failing_at(3, FailureReason::PermissionDenied);

        let outcome = plan_and_deliver(&request, &limits, &mut sink).await;

        assert_eq!(outcome.lines_sent, 4);
        assert_eq!(outcome.chunks_sent, 2);
        assert_eq!(outcome.chunks_attempted, 3);
        assert_eq!(sink.attempts, 3);
        assert_eq!(outcome.failure_reason, Some(FailureReason::PermissionDenied));
        assert_eq!(
            render_outcome(&outcome, &request, &limits),
            "⚠️ Sent 4/10. Hit follow-up limit; try fewer repeats."
        );
    }

    #[tokio::test]
    async fn test_deliver_total_failure_includes_preview() {
        let limits = RepeatLimits::default();
        let request = request_with("boo", 7, Visibility::Public, RepeatStyle::Loud);
        let mut sink = RecordingSink::failing_at(1, FailureReason::RateLimitedOrBlocked);

        let outcome = plan_and_deliver(&request, &limits, &mut sink).await;
        let text = render_outcome(&outcome, &request, &limits);

        assert_eq!(outcome.status(), DeliveryStatus::Failed);
        assert!(text.starts_with("❌ Public app messages are blocked in this channel.\n"));
        assert!(text.ends_with(&vec!["# boo"; 5].join("\n")));
    }

    #[tokio::test]
    async fn test_failure_text_stays_under_platform_limit() {
        let limits = RepeatLimits::default();
        let request = public_request(&"p".repeat(500), 10);
        let mut sink = RecordingSink::failing_at(1, FailureReason::Unknown);

        let outcome = plan_and_deliver(&request, &limits, &mut sink).await;
        let text = render_outcome(&outcome, &request, &limits);

        assert!(text.chars().count() <= limits.hard_platform_limit);
        assert!(text.starts_with("❌ I couldn't post publicly here."));
    }

    #[tokio::test]
    async fn test_private_is_single_send() {
        let limits = RepeatLimits::default();
        let request = request_with("psst", 3, Visibility::Private, RepeatStyle::Plain);
        let mut sink = RecordingSink::default();

        let outcome = plan_and_deliver(&request, &limits, &mut sink).await;

        assert_eq!(sink.sent, vec!["psst\npsst\npsst".to_string()]);
        assert_eq!(outcome.chunks_attempted, 1);
        assert_eq!(outcome.lines_sent, 3);
    }

    #[test]
    fn test_private_block_is_clipped_with_marker() {
        let limits = RepeatLimits::default();
        let request = request_with(&"m".repeat(300), 10, Visibility::Private, RepeatStyle::Plain);
        let block = private_block(&request, &limits);
        assert_eq!(block.chars().count(), limits.char_ceiling + 1);
        assert!(block.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_failure_reason_classification() {
        assert_eq!(
            FailureReason::from_http_status(403, Some(50013)),
            FailureReason::PermissionDenied
        );
        assert_eq!(
            FailureReason::from_http_status(403, Some(20001)),
            FailureReason::RateLimitedOrBlocked
        );
        assert_eq!(
            FailureReason::from_http_status(429, None),
            FailureReason::RateLimitedOrBlocked
        );
        assert_eq!(
            FailureReason::from_http_status(500, None),
            FailureReason::Unknown
        );
    }

    #[test]
    fn test_limits_validation() {
        assert!(RepeatLimits::default().validate().is_ok());
        let bad = RepeatLimits {
            char_ceiling: 2000,
            ..RepeatLimits::default()
        };
        assert!(matches!(bad.validate(), Err(Error::Config { .. })));
        let bad = RepeatLimits {
            max_chunks: 0,
            ..RepeatLimits::default()
        };
        assert!(bad.validate().is_err());
    }
}
