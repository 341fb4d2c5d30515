//! Welcome and leave notification commands - setup, disable, and test notices.
//! All of these are admin-only and only work inside a server.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, BotData},
        core::{
            notices,
            settings::{self, NotificationChannels},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::{info, warn};

    #[derive(Debug, Clone, Copy)]
    enum TestNotice {
        Welcome,
        Leave,
    }

    impl TestNotice {
        const fn label(self) -> &'static str {
            match self {
                Self::Welcome => "welcome",
                Self::Leave => "leave",
            }
        }

        const fn channel(self, channels: &NotificationChannels) -> Option<u64> {
            match self {
                Self::Welcome => channels.welcome_channel,
                Self::Leave => channels.leave_channel,
            }
        }
    }

    async fn send_test_notice(ctx: poise::Context<'_, BotData, Error>, kind: TestNotice) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };
        let label = kind.label();

        let configured = ctx
            .data()
            .settings
            .get(guild_id.get())
            .and_then(|s| kind.channel(&s.notifications));
        let Some(channel_id) = configured.map(serenity::ChannelId::new) else {
            return bot::say_ephemeral(
                ctx,
                format!("ℹ️ No {label} channel configured. Use /setupwelcome first."),
            )
            .await;
        };
        if !bot::channel_in_guild(ctx.serenity_context(), guild_id, channel_id) {
            return bot::say_ephemeral(ctx, format!("❌ Configured {label} channel not found."))
                .await;
        }

        let author = ctx.author();
        let mention = author.mention().to_string();
        let notice = match kind {
            TestNotice::Welcome => notices::welcome_notice(
                &mention,
                author.face(),
                bot::member_count(ctx.serenity_context(), guild_id),
                true,
            ),
            TestNotice::Leave => notices::leave_notice(&mention, author.face(), true),
        };

        match bot::post_notice(ctx.serenity_context(), channel_id, notice).await {
            Ok(_) => {
                info!(guild = guild_id.get(), kind = label, "Sent test notice");
                bot::say_ephemeral(
                    ctx,
                    format!("✅ Test {label} sent to {}.", channel_id.mention()),
                )
                .await
            }
            Err(e) => {
                warn!(guild = guild_id.get(), kind = label, "Test notice failed: {e}");
                bot::say_ephemeral(ctx, format!("❌ Couldn't send the test {label}: {e}")).await
            }
        }
    }

    /// Configure welcome and leave notifications (Admin only) 👋
    ///
    /// Only the channels you pass are changed; the other one keeps its current setting.
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn setupwelcome(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Channel for welcome messages (optional)"]
        #[channel_types("Text")]
        welcome_channel: Option<serenity::GuildChannel>,
        #[description = "Channel for leave messages (optional)"]
        #[channel_types("Text")]
        leave_channel: Option<serenity::GuildChannel>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        if welcome_channel.is_none() && leave_channel.is_none() {
            return bot::say_ephemeral(
                ctx,
                "ℹ️ No channels specified. Use:\n`/setupwelcome welcome_channel:#channel leave_channel:#channel`",
            )
            .await;
        }

        let mut changes = Vec::new();
        settings::update(ctx.data().settings.as_ref(), guild_id.get(), |s| {
            if let Some(channel) = &welcome_channel {
                s.notifications.welcome_channel = Some(channel.id.get());
                changes.push(format!("✅ Welcome notifications → {}", channel.mention()));
            }
            if let Some(channel) = &leave_channel {
                s.notifications.leave_channel = Some(channel.id.get());
                changes.push(format!("✅ Leave notifications → {}", channel.mention()));
            }
        });

        info!(guild = guild_id.get(), ?changes, "Updated welcome setup");
        bot::say_ephemeral(
            ctx,
            format!("**Welcome/Leave Setup Updated:**\n{}", changes.join("\n")),
        )
        .await
    }

    /// Disable welcome/leave notifications (Admin only) 🚫
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn disablewelcome(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let before = settings::update(ctx.data().settings.as_ref(), guild_id.get(), |s| {
            s.notifications = NotificationChannels::default();
        });

        if before.notifications.is_empty() {
            bot::say_ephemeral(ctx, "ℹ️ No notifications were configured for this server.").await
        } else {
            info!(guild = guild_id.get(), "Disabled welcome and leave notifications");
            bot::say_ephemeral(ctx, "✅ Welcome and leave notifications disabled.").await
        }
    }

    /// Send a test welcome message to the configured channel (Admin only)
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn welcometest(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        send_test_notice(ctx, TestNotice::Welcome).await
    }

    /// Send a test leave message to the configured channel (Admin only)
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn leavetest(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        send_test_notice(ctx, TestNotice::Leave).await
    }
}

// Re-export all commands
pub use inner::*;
