use dotenvy::dotenv;
use raiz_bot::{
    bot,
    config::{app, credentials},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file before anything reads the environment
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 3. Load the application configuration (missing file means defaults)
    let app_config = app::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(
        char_ceiling = app_config.repeat.char_ceiling,
        max_chunks = app_config.repeat.max_chunks,
        "Loaded application configuration"
    );

    // 4. The token is read directly before use, never stored in AppConfig
    let token = credentials::discord_token_from_env()
        .inspect_err(|e| error!("{}; add it to your environment or .env file", e))?;

    // 5. Run the bot
    bot::run_bot(token, app_config).await
}
