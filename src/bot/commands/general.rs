//! General Discord commands - ping and help.
//! Simple commands that don't touch the shopping session.

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
        let help_text = "**CartBuddy Help**\n\
        Every product has a quota: the most units you can hold in your cart at once.\n\n\
        **Browsing**\n\
        • `/catalog` - Lists products with price and remaining quota.\n\
        • `/cart` - Shows your cart.\n\n\
        **Cart**\n\
        • `/toggle <product>` - Adds a product (1 unit) or removes it entirely.\n\
        • `/quantity <product> <quantity>` - Changes how many units you hold.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Products can be referenced by id or by title.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
