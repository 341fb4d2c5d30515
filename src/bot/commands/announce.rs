//! Announcement commands - `makeannc` and `annc`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, BotData},
        core::{notices, settings},
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::{info, warn};

    /// Set the announcement channel (Admin only)
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn makeannc(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Channel to use for announcements"]
        #[channel_types("Text")]
        channel: serenity::GuildChannel,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        settings::update(ctx.data().settings.as_ref(), guild_id.get(), |s| {
            s.announcement_channel = Some(channel.id.get());
        });
        info!(guild = guild_id.get(), channel = channel.id.get(), "Set announcement channel");
        bot::say_ephemeral(
            ctx,
            format!("✅ Announcement channel set to {}.", channel.mention()),
        )
        .await
    }

    /// Send an announcement to the configured channel
    #[poise::command(slash_command, guild_only)]
    pub async fn annc(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The announcement message"] message: String,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let configured = ctx
            .data()
            .settings
            .get(guild_id.get())
            .and_then(|s| s.announcement_channel);
        let Some(channel_id) = configured.map(serenity::ChannelId::new) else {
            return bot::say_ephemeral(
                ctx,
                "ℹ️ No announcement channel set. Use /makeannc first.",
            )
            .await;
        };
        if !bot::channel_in_guild(ctx.serenity_context(), guild_id, channel_id) {
            return bot::say_ephemeral(ctx, "❌ Configured announcement channel not found.").await;
        }

        let author_name = match ctx.author_member().await {
            Some(member) => member.display_name().to_string(),
            None => ctx.author().display_name().to_string(),
        };
        let notice = notices::announcement_notice(&message, &author_name);

        match bot::post_notice(ctx.serenity_context(), channel_id, notice).await {
            Ok(_) => {
                info!(guild = guild_id.get(), author = %author_name, "Sent announcement");
                bot::say_ephemeral(
                    ctx,
                    format!("✅ Announcement sent to {}.", channel_id.mention()),
                )
                .await
            }
            Err(e) => {
                warn!(guild = guild_id.get(), "Announcement failed: {e}");
                bot::say_ephemeral(ctx, format!("❌ Couldn't send the announcement: {e}")).await
            }
        }
    }
}

// Re-export all commands
pub use inner::*;
