//! Role automation commands - autorole and reaction verification.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, BotData},
        core::settings::{self, VERIFICATION_EMOJI, VerificationConfig},
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::{info, warn};

    /// Give every new member a role automatically (Admin only)
    ///
    /// Leave `role` empty to turn autorole off.
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn setautorole(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Role to assign on join (omit to disable)"] role: Option<serenity::Role>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let before = settings::update(ctx.data().settings.as_ref(), guild_id.get(), |s| {
            s.roles.autorole = role.as_ref().map(|r| r.id.get());
        });

        let reply = match (&role, before.roles.autorole) {
            (Some(role), _) => {
                info!(guild = guild_id.get(), role = role.id.get(), "Set autorole");
                format!("✅ New members will get {}.", role.mention())
            }
            (None, Some(_)) => {
                info!(guild = guild_id.get(), "Disabled autorole");
                "✅ Autorole disabled.".to_string()
            }
            (None, None) => "ℹ️ No autorole was configured for this server.".to_string(),
        };
        bot::say_ephemeral(ctx, reply).await
    }

    /// Grant a role when members react ✅ to a message (Admin only)
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn setupverification(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Channel holding the verification message"]
        #[channel_types("Text")]
        channel: serenity::GuildChannel,
        #[description = "ID of the message members react to"] message_id: String,
        #[description = "Role granted on verification"] role: serenity::Role,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let message_id = match settings::parse_snowflake(&message_id) {
            Ok(id) => id,
            Err(e) => {
                return bot::say_ephemeral(ctx, format!("❌ {e}. Copy the message ID from Discord."))
                    .await;
            }
        };

        let config = VerificationConfig {
            channel_id: channel.id.get(),
            message_id,
            role_id: role.id.get(),
        };
        settings::update(ctx.data().settings.as_ref(), guild_id.get(), |s| {
            s.roles.verification = Some(config);
        });
        info!(guild = guild_id.get(), ?config, "Set up reaction verification");

        // Seeding the reaction is a convenience; the setting stands either way
        let seeded = channel
            .id
            .create_reaction(
                ctx.serenity_context(),
                serenity::MessageId::new(message_id),
                serenity::ReactionType::Unicode(VERIFICATION_EMOJI.to_string()),
            )
            .await
            .inspect_err(|e| warn!(guild = guild_id.get(), "Couldn't add verification reaction: {e}"))
            .is_ok();

        let mut reply = format!(
            "✅ Members reacting {VERIFICATION_EMOJI} in {} will get {}.",
            channel.mention(),
            role.mention()
        );
        if !seeded {
            reply.push_str("\n⚠️ Couldn't add the reaction myself; check the message ID and my permissions.");
        }
        bot::say_ephemeral(ctx, reply).await
    }

    /// Turn off reaction verification (Admin only)
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn disableverification(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let before = settings::update(ctx.data().settings.as_ref(), guild_id.get(), |s| {
            s.roles.verification = None;
        });

        if before.roles.verification.is_some() {
            info!(guild = guild_id.get(), "Disabled reaction verification");
            bot::say_ephemeral(ctx, "✅ Reaction verification disabled.").await
        } else {
            bot::say_ephemeral(ctx, "ℹ️ No verification was configured for this server.").await
        }
    }
}

// Re-export all commands
pub use inner::*;
