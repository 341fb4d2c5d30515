//! Fun Discord commands - meters, `coinflip`, `hack`, and `emojify`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::fun::{self, Meter},
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use std::time::Duration;
    use tracing::{info, warn};

    const HACK_STAGE_DELAY: Duration = Duration::from_millis(1500);

    /// Tries an ephemeral fallback after a public reply failed; failures are only logged.
    async fn send_fallback(ctx: poise::Context<'_, BotData, Error>, command: &str, text: String) {
        let reply = poise::CreateReply::default().content(text).ephemeral(true);
        if let Err(e) = ctx.send(reply).await {
            warn!(command, "Fallback reply failed too: {e}");
        }
    }

    async fn send_meter(
        ctx: poise::Context<'_, BotData, Error>,
        meter: Meter,
        member: &serenity::Member,
    ) -> Result<()> {
        let percentage = fun::roll_percentage();
        let text = meter.render(&member.mention().to_string(), percentage);
        let reply = poise::CreateReply::default()
            .content(text.clone())
            .allowed_mentions(serenity::CreateAllowedMentions::new().all_users(true));

        match ctx.send(reply).await {
            Ok(_) => info!(
                command = meter.name(),
                member = %member.display_name(),
                percentage,
                "Sent meter result"
            ),
            Err(e) => {
                warn!(command = meter.name(), "Failed to send meter result: {e}");
                send_fallback(ctx, meter.name(), format!("❌ Couldn't post the result. Preview: {text}"))
                    .await;
            }
        }
        Ok(())
    }

    /// Scientifically calculate someone's femboy levels 🎀
    #[poise::command(slash_command)]
    pub async fn femboymeter(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The victim... I mean subject"] user: serenity::Member,
    ) -> Result<()> {
        send_meter(ctx, Meter::Femboy, &user).await
    }

    /// Measure the rainbow levels 🌈 (totally legit science)
    #[poise::command(slash_command)]
    pub async fn gaymeter(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your totally straight friend"] user: serenity::Member,
    ) -> Result<()> {
        send_meter(ctx, Meter::Gay, &user).await
    }

    /// Rate how much of a 💩 someone is (brutally honest)
    #[poise::command(slash_command)]
    pub async fn skidmeter(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The lucky participant"] user: serenity::Member,
    ) -> Result<()> {
        send_meter(ctx, Meter::Skid, &user).await
    }

    /// Check someone's UwU levels (OwO what's this?) 👉👈
    #[poise::command(slash_command)]
    pub async fn uwumeter(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The person to check"] user: serenity::Member,
    ) -> Result<()> {
        send_meter(ctx, Meter::Uwu, &user).await
    }

    /// Check if someone needs to touch grass 🌱
    #[poise::command(slash_command)]
    pub async fn touch(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The terminally online suspect"] user: serenity::Member,
    ) -> Result<()> {
        send_meter(ctx, Meter::TouchGrass, &user).await
    }

    /// Let fate decide (because you can't) 🪙
    #[poise::command(slash_command)]
    pub async fn coinflip(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let side = fun::flip_coin();
        match ctx.say(side.render()).await {
            Ok(_) => info!(user = %ctx.author().name, side = side.label(), "Flipped coin"),
            Err(e) => {
                warn!("Failed to send coin flip: {e}");
                send_fallback(
                    ctx,
                    "coinflip",
                    format!("❌ Couldn't flip the coin. Result was: {}", side.label()),
                )
                .await;
            }
        }
        Ok(())
    }

    /// Hack someone (not really, it's fake lol) 💻
    #[poise::command(slash_command)]
    pub async fn hack(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The victim to 'hack'"] user: serenity::Member,
    ) -> Result<()> {
        let mention = user.mention().to_string();
        let handle = match ctx.say(fun::hack_intro(&mention)).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Failed to start hack: {e}");
                return Ok(());
            }
        };

        for stage in fun::hack_stages(&mention, &user.user.name) {
            tokio::time::sleep(HACK_STAGE_DELAY).await;
            if let Err(e) = handle
                .edit(ctx, poise::CreateReply::default().content(stage))
                .await
            {
                warn!("Hack stage edit failed: {e}");
                send_fallback(ctx, "hack", format!("❌ Hack failed. {mention} has antivirus!"))
                    .await;
                return Ok(());
            }
        }

        info!(member = %user.display_name(), "'Hacked' member");
        Ok(())
    }

    /// Turn text into PURE EMOJI ENERGY ✨
    #[poise::command(slash_command)]
    pub async fn emojify(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The text to emojify"] text: String,
    ) -> Result<()> {
        match ctx.say(fun::emojify(&text)).await {
            Ok(_) => info!(user = %ctx.author().name, "Emojified text"),
            Err(e) => {
                warn!("Failed to send emojified text: {e}");
                send_fallback(
                    ctx,
                    "emojify",
                    "❌ Text too long or failed to emojify!".to_string(),
                )
                .await;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
