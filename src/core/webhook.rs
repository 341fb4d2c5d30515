//! Webhook URL validation for `/webhooksend`.

use crate::errors::{Error, Result};
use url::Url;

/// Hosts that serve Discord webhook endpoints.
pub const ALLOWED_HOSTS: [&str; 4] = [
    "discord.com",
    "discordapp.com",
    "canary.discord.com",
    "ptb.discord.com",
];

const WEBHOOK_PATH_PREFIX: &str = "/api/webhooks/";

/// Parses and checks a user-supplied webhook URL.
///
/// # Errors
/// [`Error::InvalidWebhookUrl`] if the URL does not parse, is not https, points at a host
/// outside [`ALLOWED_HOSTS`], or is not under `/api/webhooks/`.
pub fn validate_webhook_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidWebhookUrl {
        reason: e.to_string(),
    })?;

    if url.scheme() != "https" {
        return Err(Error::InvalidWebhookUrl {
            reason: format!("scheme must be https, got {}", url.scheme()),
        });
    }

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !ALLOWED_HOSTS.contains(&host.as_str()) {
        return Err(Error::InvalidWebhookUrl {
            reason: format!("host {host:?} is not a Discord host"),
        });
    }

    if !url.path().starts_with(WEBHOOK_PATH_PREFIX) {
        return Err(Error::InvalidWebhookUrl {
            reason: "path must start with /api/webhooks/".to_string(),
        });
    }

    Ok(url)
}

/// Reply listing the accepted URL forms.
#[must_use]
pub fn invalid_url_help() -> String {
    let mut help = String::from("❌ Invalid webhook URL. Must start with one of:");
    for host in ALLOWED_HOSTS {
        help.push_str(&format!("\n- https://{host}{WEBHOOK_PATH_PREFIX}"));
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_discord_hosts() {
        for host in ALLOWED_HOSTS {
            let raw = format!("  https://{host}/api/webhooks/123/token  ");
            assert!(validate_webhook_url(&raw).is_ok(), "{host} should pass");
        }
        assert!(validate_webhook_url("https://Discord.com/api/webhooks/1/t").is_ok());
    }

    #[test]
    fn test_rejects_foreign_host() {
        let result = validate_webhook_url("https://discord.com.evil.example/api/webhooks/1/t");
        assert!(matches!(result, Err(Error::InvalidWebhookUrl { .. })));
    }

    #[test]
    fn test_rejects_wrong_path_and_scheme() {
        assert!(validate_webhook_url("https://discord.com/api/channels/1").is_err());
        assert!(validate_webhook_url("http://discord.com/api/webhooks/1/t").is_err());
        assert!(validate_webhook_url("not a url").is_err());
    }

    #[test]
    fn test_help_lists_every_host() {
        let help = invalid_url_help();
        assert!(help.contains("- https://ptb.discord.com/api/webhooks/"));
        assert_eq!(help.lines().count(), 5);
    }
}
