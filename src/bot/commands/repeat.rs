//! Repeat Discord commands - `raiz` and `raizv2`.
//!
//! Both commands hand a validated request to the chunked repeater in `core::repeat`. Public
//! requests are delivered as interaction follow-ups, so the bot only needs the "Use External
//! Apps" and application-command permissions, not "Send Messages".

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, classify_send_error},
        core::repeat::{self, ChunkSink, FailureReason, RepeatRequest, RepeatStyle, Visibility},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{info, warn};

    /// Delivers chunks through the invoking interaction.
    ///
    /// Private payloads become the ephemeral initial response; public payloads become
    /// follow-ups with every mention suppressed.
    struct InteractionSink<'a> {
        ctx: poise::Context<'a, BotData, Error>,
        visibility: Visibility,
    }

    impl ChunkSink for InteractionSink<'_> {
        async fn send_chunk(&mut self, payload: &str) -> std::result::Result<(), FailureReason> {
            let result = match (self.visibility, self.ctx) {
                (Visibility::Private, ctx) => {
                    let reply = poise::CreateReply::default()
                        .content(payload)
                        .ephemeral(true);
                    ctx.send(reply).await.map(drop)
                }
                (Visibility::Public, poise::Context::Application(app)) => {
                    let followup = serenity::CreateInteractionResponseFollowup::new()
                        .content(payload)
                        .allowed_mentions(serenity::CreateAllowedMentions::new());
                    app.interaction
                        .create_followup(app.serenity_context, followup)
                        .await
                        .map(drop)
                }
                (Visibility::Public, poise::Context::Prefix(_)) => {
                    return Err(FailureReason::Unknown);
                }
            };

            result.map_err(|e| {
                warn!("Chunk send failed: {e}");
                classify_send_error(&e)
            })
        }
    }

    async fn run_repeat(
        ctx: poise::Context<'_, BotData, Error>,
        command: &'static str,
        message: &str,
        times: i64,
        public: bool,
        style: RepeatStyle,
    ) -> Result<()> {
        let limits = ctx.data().config.repeat;
        let visibility = if public {
            Visibility::Public
        } else {
            Visibility::Private
        };

        let request = match RepeatRequest::new(message, times, visibility, style, &limits) {
            Ok(request) => request,
            Err(Error::CountOutOfRange { .. }) => {
                let reply = poise::CreateReply::default()
                    .content(RepeatRequest::validation_message(&limits))
                    .ephemeral(true);
                ctx.send(reply).await?;
                return Ok(());
            }
            Err(Error::EmptyMessage) => {
                let reply = poise::CreateReply::default()
                    .content("❌ Your message can't be empty!")
                    .ephemeral(true);
                ctx.send(reply).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if visibility == Visibility::Public {
            ctx.defer_ephemeral().await?;
        }

        let mut sink = InteractionSink { ctx, visibility };
        let outcome = repeat::plan_and_deliver(&request, &limits, &mut sink).await;
        info!(
            command,
            requested = request.count(),
            sent = outcome.lines_sent,
            chunks = outcome.chunks_sent,
            "Repeat delivery finished"
        );

        match (visibility, ctx) {
            (Visibility::Public, poise::Context::Application(app)) => {
                let summary = repeat::render_outcome(&outcome, &request, &limits);
                let edit = serenity::EditInteractionResponse::new().content(summary);
                if let Err(e) = app
                    .interaction
                    .edit_response(app.serenity_context, edit)
                    .await
                {
                    warn!(command, "Failed to edit original response: {e}");
                }
            }
            (Visibility::Private, _) => {
                if let Some(reason) = outcome.failure_reason {
                    warn!(command, ?reason, "Failed to send ephemeral preview");
                }
            }
            (Visibility::Public, poise::Context::Prefix(_)) => {}
        }

        Ok(())
    }

    /// Spam your message like a broken record 🔁
    ///
    /// Repeats the message 1-10 times. Public mode posts it to the channel as follow-ups;
    /// private mode shows a preview only you can see.
    #[poise::command(slash_command)]
    pub async fn raiz(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your message (choose wisely)"] message: String,
        #[description = "How many times? (1-10, don't go crazy)"] times: i64,
        #[description = "Make everyone see it (or keep it secret)"] public: Option<bool>,
    ) -> Result<()> {
        run_repeat(
            ctx,
            "raiz",
            &message,
            times,
            public.unwrap_or(true),
            RepeatStyle::Plain,
        )
        .await
    }

    /// Spam but BIGGER and LOUDER 📢
    ///
    /// Same as `/raiz`, with every line rendered as a heading.
    #[poise::command(slash_command)]
    pub async fn raizv2(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your message (in CAPS energy)"] message: String,
        #[description = "How many times? (1-10, scream responsibly)"] times: i64,
        #[description = "Make it rain big text (or whisper privately)"] public: Option<bool>,
    ) -> Result<()> {
        run_repeat(
            ctx,
            "raizv2",
            &message,
            times,
            public.unwrap_or(true),
            RepeatStyle::Loud,
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
