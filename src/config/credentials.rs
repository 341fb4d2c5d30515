//! Bot credential loading from environment variables.
//!
//! The token is read from `DISCORD_TOKEN`. Values pasted with a `Bot ` prefix, or with
//! stray whitespace, are normalised before use.

use crate::errors::{Error, Result};

/// Environment variable holding the bot token
pub const TOKEN_VAR: &str = "DISCORD_TOKEN";

/// Trims whitespace and strips a leading `Bot ` (any case).
///
/// Returns `None` when nothing is left.
#[must_use]
pub fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let token = match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bot ") => trimmed[4..].trim(),
        _ => trimmed,
    };
    (!token.is_empty()).then(|| token.to_string())
}

/// Reads and normalises the bot token from the environment.
///
/// # Errors
/// [`Error::MissingCredential`] when `DISCORD_TOKEN` is unset or blank.
pub fn discord_token_from_env() -> Result<String> {
    std::env::var(TOKEN_VAR)
        .ok()
        .as_deref()
        .and_then(normalize_token)
        .ok_or_else(|| Error::MissingCredential {
            name: TOKEN_VAR.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_prefix_and_whitespace() {
        assert_eq!(normalize_token("  abc.def  ").as_deref(), Some("abc.def"));
        assert_eq!(normalize_token("Bot abc.def").as_deref(), Some("abc.def"));
        assert_eq!(normalize_token("bOT   abc.def\n").as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_normalize_keeps_tokens_starting_with_bot() {
        assert_eq!(normalize_token("botanical").as_deref(), Some("botanical"));
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(normalize_token("   ").is_none());
        assert!(normalize_token("").is_none());
    }
}
