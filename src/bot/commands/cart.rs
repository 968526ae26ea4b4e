//! Cart Discord commands - `cart`, `toggle`, and `quantity`.
//!
//! Each command holds the session lock only while the cart operation runs,
//! then replies with the outcome.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format, handlers::autocomplete},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Shows the cart with quantities, subtotals, and the product count badge.
    #[poise::command(slash_command, prefix_command)]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let (fields, summary) = {
            let session = ctx.data().session.lock().await;
            (
                format::cart_fields(session.cart()),
                format::cart_summary(session.cart()),
            )
        };

        if fields.is_empty() {
            ctx.say("🛒 Your cart is empty.").await?;
            return Ok(());
        }

        let embed = serenity::CreateEmbed::default()
            .title("**Cart**")
            .color(0x0058_65F2) // Discord purple
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(summary));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a product to the cart with quantity 1, or removes it if already there.
    ///
    /// Adding requires at least one unit of remaining quota. Removing always
    /// drops the whole line.
    #[poise::command(slash_command, prefix_command)]
    pub async fn toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product id or title"]
        #[autocomplete = "autocomplete::autocomplete_product"]
        product: String,
    ) -> Result<()> {
        let message = {
            let mut session = ctx.data().session.lock().await;
            match session.find_product(&product) {
                Ok((id, title)) => {
                    let change = session.toggle(id).await?;
                    let remaining = session.catalog().get(id).map(|p| p.quota);
                    format!(
                        "{}\n{}",
                        format::change_message(&change, &title, remaining),
                        format::cart_summary(session.cart())
                    )
                }
                Err(Error::ProductNotFound { reference }) => format::not_found_message(&reference),
                Err(e) => return Err(e),
            }
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Sets how many units of a product your cart holds.
    ///
    /// The product must already be in the cart. Quantities below 1 are ignored;
    /// use `/toggle` to remove a product.
    #[poise::command(slash_command, prefix_command)]
    pub async fn quantity(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product id or title"]
        #[autocomplete = "autocomplete::autocomplete_cart_product"]
        product: String,
        #[description = "New quantity"] new_quantity: i64,
    ) -> Result<()> {
        let message = {
            let mut session = ctx.data().session.lock().await;
            match session.find_product(&product) {
                Ok((id, title)) => match session.update_quantity(id, new_quantity).await {
                    Ok(change) => {
                        let remaining = session.catalog().get(id).map(|p| p.quota);
                        let allowed = session.allowed_quantity(id);
                        format::quantity_message(&change, &title, remaining, allowed)
                    }
                    Err(Error::QuotaExceeded { allowed, .. }) => {
                        format::quota_exceeded_message(allowed)
                    }
                    Err(e) => return Err(e),
                },
                Err(Error::ProductNotFound { reference }) => format::not_found_message(&reference),
                Err(e) => return Err(e),
            }
        };

        ctx.say(message).await?;
        Ok(())
    }
}

pub use inner::*;
