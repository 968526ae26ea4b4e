//! Catalog Discord commands - `catalog`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Lists every product with its price and remaining quota.
    #[poise::command(slash_command, prefix_command)]
    pub async fn catalog(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let (fields, summary) = {
            let session = ctx.data().session.lock().await;
            if session.catalog().is_empty() {
                (Vec::new(), String::new())
            } else {
                (
                    format::catalog_fields(session.catalog(), session.cart()),
                    format::cart_summary(session.cart()),
                )
            }
        };

        if fields.is_empty() {
            ctx.say("The catalog is empty. The product list could not be loaded.")
                .await?;
            return Ok(());
        }

        let embed = serenity::CreateEmbed::default()
            .title("**Product Catalog**")
            .color(0x0058_65F2) // Discord purple
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(summary));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
