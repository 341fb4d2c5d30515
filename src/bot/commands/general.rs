//! General Discord commands - ping, help, and other utility commands.
//! These commands don't touch guild settings and work in DMs as well as servers.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Bot Help**\n\n\
        **Spam**\n\
        • `/raiz <message> <times> [public]` - Repeat a message 1-10 times.\n\
        • `/raizv2 <message> <times> [public]` - Same, but as big heading text.\n\n\
        **Fun**\n\
        • `/femboymeter`, `/gaymeter`, `/skidmeter`, `/uwumeter`, `/touch` - Meters for a member.\n\
        • `/coinflip`, `/hack <member>`, `/emojify <text>`\n\
        • `/getpfp [user] [size]` - Show a profile picture.\n\n\
        **Server setup (admin)**\n\
        • `/setupwelcome`, `/disablewelcome`, `/welcometest`, `/leavetest`\n\
        • `/setautorole [role]`, `/setupverification`, `/disableverification`\n\
        • `/makeannc <channel>` then `/annc <message>`\n\n\
        **Utility**\n\
        • `/webhooksend <url> <message> [name]` - Post through a webhook.\n\
        • `/diag` - Show the bot's permissions in this channel.\n\
        • `/ping` - Checks if the bot is responsive.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
