//! Checks that `DISCORD_TOKEN` belongs to a bot account by fetching the current user.
//!
//! Exit codes: 0 valid, 1 rejected or unreachable, 2 no token configured.

use poise::serenity_prelude as serenity;
use raiz_bot::config::credentials;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn http_status(error: &serenity::HttpError) -> Option<u16> {
    match error {
        serenity::HttpError::UnsuccessfulRequest(response) => Some(response.status_code.as_u16()),
        _ => None,
    }
}

fn unauthorized(error: &serenity::Error) -> bool {
    match error {
        serenity::Error::Http(http) => http_status(http) == Some(401),
        _ => false,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token = match credentials::discord_token_from_env() {
        Ok(token) => token,
        Err(e) => {
            error!("{e}; nothing to verify");
            return ExitCode::from(2);
        }
    };

    let http = serenity::Http::new(&token);
    match http.get_current_user().await {
        Ok(user) => {
            info!(user = %user.name, id = user.id.get(), "Token valid for bot user");
            ExitCode::SUCCESS
        }
        Err(e) if unauthorized(&e) => {
            error!("401 Unauthorized: token invalid or not a bot token");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Token check failed: {e}");
            ExitCode::FAILURE
        }
    }
}
