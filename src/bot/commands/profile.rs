//! Profile Discord commands - `getpfp`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{notices::colours, profile},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{info, warn};

    /// Get anyone's profile picture with size options 🖼️
    ///
    /// Shows the avatar in an embed with link buttons for the chosen size, the largest size,
    /// the animated GIF (when there is one), and the original URL.
    #[poise::command(slash_command)]
    pub async fn getpfp(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Whose pfp? (optional, defaults to you)"] user: Option<serenity::User>,
        #[description = "Image size (128/256/512/1024/2048)"] size: Option<u32>,
    ) -> Result<()> {
        let target = user.as_ref().unwrap_or_else(|| ctx.author());
        let size = profile::normalize_size(size);
        let face = target.face();
        let animated = target
            .avatar
            .as_ref()
            .is_some_and(serenity::ImageHash::is_animated);

        let embed = serenity::CreateEmbed::new()
            .title(format!("{}'s Profile Picture", target.display_name()))
            .colour(colours::BLURPLE)
            .image(profile::with_size(&face, size))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Requested by {} • Size {size}",
                ctx.author().display_name()
            )));

        let buttons = profile::avatar_links(&face, size, animated)
            .into_iter()
            .map(|(label, url)| serenity::CreateButton::new_link(url).label(label))
            .collect();

        let reply = poise::CreateReply::default()
            .embed(embed)
            .components(vec![serenity::CreateActionRow::Buttons(buttons)])
            .allowed_mentions(serenity::CreateAllowedMentions::new());

        match ctx.send(reply).await {
            Ok(_) => info!(user = %target.display_name(), size, "Sent profile picture"),
            Err(e) => {
                warn!("Failed to send profile picture: {e}");
                let fallback = poise::CreateReply::default()
                    .content("❌ Couldn't get profile picture. Try again in another channel.")
                    .ephemeral(true);
                if let Err(e) = ctx.send(fallback).await {
                    warn!("Fallback reply failed too: {e}");
                }
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
