//! Webhook relay Discord command - `webhooksend`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{repeat::clip, webhook},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{debug, info, warn};

    async fn relay(
        ctx: poise::Context<'_, BotData, Error>,
        url: &str,
        message: &str,
        webhook_name: Option<&str>,
    ) -> std::result::Result<(), serenity::Error> {
        let http = ctx.serenity_context();
        let webhook = serenity::Webhook::from_url(http, url).await?;

        let mut builder = serenity::ExecuteWebhook::new().content(message);
        if let Some(name) = webhook_name {
            builder = builder.username(name);
        }
        webhook.execute(http, false, builder).await?;
        Ok(())
    }

    /// Become an identity thief (but legal) 🕵️
    ///
    /// Posts a message through a Discord webhook, optionally under a custom name.
    #[poise::command(slash_command)]
    pub async fn webhooksend(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The secret passage (webhook URL)"] webhook_url: String,
        #[description = "Your undercover message"] message: String,
        #[description = "Your fake identity (optional)"] webhook_name: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let url = match webhook::validate_webhook_url(&webhook_url) {
            Ok(url) => url,
            Err(e) => {
                debug!("Rejected webhook URL: {e}");
                let reply = poise::CreateReply::default()
                    .content(webhook::invalid_url_help())
                    .ephemeral(true);
                ctx.send(reply).await?;
                return Ok(());
            }
        };

        let content = match relay(ctx, url.as_str(), &message, webhook_name.as_deref()).await {
            Ok(()) => {
                info!(
                    name = webhook_name.as_deref().unwrap_or("default"),
                    "Sent message via webhook"
                );
                "✅ Message sent via webhook!".to_string()
            }
            Err(e) => {
                warn!("Webhook send failed: {e}");
                format!("❌ Failed to send webhook: {}", clip(&e.to_string(), 200))
            }
        };

        ctx.send(poise::CreateReply::default().content(content).ephemeral(true))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
