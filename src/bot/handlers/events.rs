//! Gateway event handling.
//!
//! Every side effect here is best-effort: failures are logged and the event is dropped,
//! so one broken channel or missing permission never stops the bot.

use crate::{
    bot::{self, BotData},
    core::{notices, settings::GuildSettings},
    errors::{Error, Result},
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{debug, info, warn};

const AUTOROLE_REASON: &str = "Autorole on join";
const VERIFICATION_REASON: &str = "Verified via reaction";

/// Entry point registered in [`poise::FrameworkOptions::event_handler`].
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            on_ready(ctx, data, data_about_bot);
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            on_member_join(ctx, data, new_member).await;
        }
        serenity::FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            on_member_leave(ctx, data, *guild_id, user).await;
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            on_reaction_add(ctx, data, add_reaction).await;
        }
        _ => {}
    }
    Ok(())
}

fn settings_for(data: &BotData, guild_id: serenity::GuildId) -> Option<GuildSettings> {
    data.settings.get(guild_id.get())
}

fn on_ready(ctx: &serenity::Context, data: &BotData, ready: &serenity::Ready) {
    let activity = &data.config.presence.activity;
    ctx.set_activity(Some(serenity::ActivityData::watching(activity.as_str())));
    info!(
        user = %ready.user.name,
        id = ready.user.id.get(),
        guilds = ready.guilds.len(),
        "Bot is ready"
    );
}

async fn on_member_join(ctx: &serenity::Context, data: &BotData, member: &serenity::Member) {
    let guild_id = member.guild_id;
    let Some(settings) = settings_for(data, guild_id) else {
        return;
    };

    if let Some(channel_id) = settings
        .notifications
        .welcome_channel
        .map(serenity::ChannelId::new)
    {
        if bot::channel_in_guild(ctx, guild_id, channel_id) {
            let notice = notices::welcome_notice(
                &member.mention().to_string(),
                member.face(),
                bot::member_count(ctx, guild_id),
                false,
            );
            match bot::post_notice(ctx, channel_id, notice).await {
                Ok(_) => info!(guild = guild_id.get(), member = %member.user.name, "Sent welcome"),
                Err(e) => warn!(guild = guild_id.get(), "Failed to send welcome: {e}"),
            }
        } else {
            debug!(guild = guild_id.get(), "Welcome channel no longer exists");
        }
    }

    if let Some(role_id) = settings.roles.autorole.map(serenity::RoleId::new) {
        match ctx
            .http
            .add_member_role(guild_id, member.user.id, role_id, Some(AUTOROLE_REASON))
            .await
        {
            Ok(()) => info!(
                guild = guild_id.get(),
                member = %member.user.name,
                role = role_id.get(),
                "Assigned autorole"
            ),
            Err(e) => warn!(guild = guild_id.get(), "Failed to assign autorole: {e}"),
        }
    }
}

async fn on_member_leave(
    ctx: &serenity::Context,
    data: &BotData,
    guild_id: serenity::GuildId,
    user: &serenity::User,
) {
    let Some(channel_id) = settings_for(data, guild_id)
        .and_then(|s| s.notifications.leave_channel)
        .map(serenity::ChannelId::new)
    else {
        return;
    };
    if !bot::channel_in_guild(ctx, guild_id, channel_id) {
        debug!(guild = guild_id.get(), "Leave channel no longer exists");
        return;
    }

    let notice = notices::leave_notice(&user.mention().to_string(), user.face(), false);
    match bot::post_notice(ctx, channel_id, notice).await {
        Ok(_) => info!(guild = guild_id.get(), user = %user.name, "Sent leave notice"),
        Err(e) => warn!(guild = guild_id.get(), "Failed to send leave notice: {e}"),
    }
}

async fn on_reaction_add(ctx: &serenity::Context, data: &BotData, reaction: &serenity::Reaction) {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };
    if user_id == ctx.cache.current_user().id {
        return;
    }
    let Some(verification) = settings_for(data, guild_id).and_then(|s| s.roles.verification) else {
        return;
    };

    let serenity::ReactionType::Unicode(emoji) = &reaction.emoji else {
        return;
    };
    if !verification.matches(reaction.channel_id.get(), reaction.message_id.get(), emoji) {
        return;
    }

    let role_id = serenity::RoleId::new(verification.role_id);
    match ctx
        .http
        .add_member_role(guild_id, user_id, role_id, Some(VERIFICATION_REASON))
        .await
    {
        Ok(()) => info!(
            guild = guild_id.get(),
            user = user_id.get(),
            role = role_id.get(),
            "Verified member via reaction"
        ),
        Err(e) => warn!(guild = guild_id.get(), "Failed to assign verification role: {e}"),
    }
}
