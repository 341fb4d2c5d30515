//! Diagnostics Discord command - `diag`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::diagnostics::{ChannelDiagnostics, PermissionSnapshot, ThreadState},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::warn;

    fn snapshot(permissions: serenity::Permissions) -> PermissionSnapshot {
        PermissionSnapshot {
            view_channel: permissions.view_channel(),
            send_messages: permissions.send_messages(),
            send_messages_in_threads: permissions.send_messages_in_threads(),
            embed_links: permissions.embed_links(),
            attach_files: permissions.attach_files(),
        }
    }

    async fn collect(ctx: poise::Context<'_, BotData, Error>) -> ChannelDiagnostics {
        let channel_id = ctx.channel_id();
        let bot_id = ctx.framework().bot_id;
        let channel = ctx.guild_channel().await;

        let permissions = channel.as_ref().and_then(|channel| {
            let guild = ctx.guild()?;
            let member = guild.members.get(&bot_id)?;
            Some(snapshot(guild.user_permissions_in(channel, member)))
        });

        ChannelDiagnostics {
            channel_name: channel.as_ref().map(|c| c.name.clone()),
            channel_id: channel_id.get(),
            thread: channel
                .as_ref()
                .and_then(|c| c.thread_metadata.as_ref())
                .map(|meta| ThreadState {
                    archived: meta.archived,
                    locked: meta.locked,
                }),
            permissions,
        }
    }

    /// Show the bot's permissions in this channel
    ///
    /// Lists the permissions the bot needs to post here, plus what to change when one is missing.
    #[poise::command(slash_command)]
    pub async fn diag(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let diagnostics = collect(ctx).await;
        let reply = poise::CreateReply::default()
            .content(format!("```\n{}\n```", diagnostics.render()))
            .ephemeral(true);
        if let Err(e) = ctx.send(reply).await {
            warn!("Failed to send diagnostics: {e}");
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
