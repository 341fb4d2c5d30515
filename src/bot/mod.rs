//! Bot layer - Discord-specific interface and command handlers
//!
//! This module wires the core logic into poise: it owns the shared [`BotData`], the
//! framework error hook, and the client start-up. Commands live in [`commands`], gateway
//! events in [`handlers`].

/// Slash command implementations (repeat, fun, profile, settings, utility)
pub mod commands;
/// Gateway event handlers (ready, member join/leave, reactions)
pub mod handlers;

use crate::{
    config::app::AppConfig,
    core::{
        notices::Notice,
        repeat::FailureReason,
        settings::{InMemorySettings, SettingsStore},
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the loaded configuration and the per-guild settings repository.
pub struct BotData {
    /// Settings keyed by guild; in-memory unless another store is injected
    pub settings: Arc<dyn SettingsStore>,
    /// Application configuration loaded at start-up
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given configuration and settings store.
    #[must_use]
    pub fn new(config: AppConfig, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            config: Arc::new(config),
        }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Builds a serenity embed from core notice content.
#[must_use]
pub fn notice_embed(notice: Notice) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(notice.title)
        .description(notice.description)
        .colour(notice.colour);
    if let Some(url) = notice.thumbnail_url {
        embed = embed.thumbnail(url);
    }
    if let Some(footer) = notice.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }
    embed
}

/// Maps a serenity send failure onto the repeat failure taxonomy.
#[must_use]
pub fn classify_send_error(error: &serenity::Error) -> FailureReason {
    match error {
        serenity::Error::Http(http) => classify_http_error(http),
        _ => FailureReason::Unknown,
    }
}

fn classify_http_error(error: &serenity::HttpError) -> FailureReason {
    match error {
        serenity::HttpError::UnsuccessfulRequest(response) => FailureReason::from_http_status(
            response.status_code.as_u16(),
            Some(response.error.code),
        ),
        _ => FailureReason::Unknown,
    }
}

/// Whether the cached guild still has `channel_id`.
#[must_use]
pub fn channel_in_guild(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
) -> bool {
    ctx.cache
        .guild(guild_id)
        .is_some_and(|guild| guild.channels.contains_key(&channel_id))
}

/// Cached member count for `guild_id`.
#[must_use]
pub fn member_count(ctx: &serenity::Context, guild_id: serenity::GuildId) -> Option<u64> {
    ctx.cache.guild(guild_id).map(|guild| guild.member_count)
}

/// Posts a notice embed to `channel_id` with user mentions allowed.
pub async fn post_notice(
    ctx: &serenity::Context,
    channel_id: serenity::ChannelId,
    notice: Notice,
) -> std::result::Result<serenity::Message, serenity::Error> {
    let message = serenity::CreateMessage::new()
        .embed(notice_embed(notice))
        .allowed_mentions(serenity::CreateAllowedMentions::new().all_users(true));
    channel_id.send_message(ctx, message).await
}

/// Replies to the invoking user only.
pub async fn say_ephemeral(ctx: Context<'_>, text: impl Into<String>) -> Result<()> {
    let reply = poise::CreateReply::default()
        .content(text.into())
        .ephemeral(true);
    ctx.send(reply).await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(format!("An error occurred: {error}"))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to the gateway and runs until the client stops.
#[instrument(skip(token, app_config))]
pub async fn run_bot(token: String, app_config: AppConfig) -> Result<()> {
    let data = BotData::new(app_config, Arc::new(InMemorySettings::new()));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::events::event_handler(ctx, event, framework, data))
            },
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    count = framework.options().commands.len(),
                    "Synced slash commands"
                );
                Ok(data)
            })
        })
        .build();

    // GUILD_MEMBERS is privileged; join/leave notices and autorole need it
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
