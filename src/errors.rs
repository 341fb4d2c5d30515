//! Unified error type for the bot.
//!
//! Validation failures carry enough detail to render a user-facing reply; framework
//! failures are boxed so the enum stays small.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Every failure the crate can surface to a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read, parsed, or validated
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// A required credential is absent from the environment
    #[error("Missing credential: {name} is not set")]
    MissingCredential {
        /// Name of the environment variable
        name: String,
    },

    /// Repeat count outside the permitted range
    #[error("Count {count} is outside the allowed range {min}..={max}")]
    CountOutOfRange {
        /// Count the caller asked for
        count: i64,
        /// Smallest accepted count
        min: u32,
        /// Largest accepted count
        max: u32,
    },

    /// The line to repeat is blank after formatting
    #[error("Message must not be empty")]
    EmptyMessage,

    /// Webhook URL failed validation
    #[error("Invalid webhook URL: {reason}")]
    InvalidWebhookUrl {
        /// Why the URL was rejected
        reason: String,
    },

    /// A snowflake ID supplied as text could not be parsed
    #[error("Invalid ID: {input}")]
    InvalidId {
        /// The offending input
        input: String,
    },

    /// Filesystem failure while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serenity or poise reported a failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
