//! Empty the cart.

use anyhow::Result;
use dialoguer::Confirm;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    let cart = store.handle();

    let count = cart.products().len();
    if count == 0 {
        store.shutdown().await?;
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} line(s) from the cart?", count))
            .default(false)
            .interact()?;
        if !confirmed {
            store.shutdown().await?;
            ctx.output.info("Aborted");
            return Ok(());
        }
    }

    cart.clear().await?;
    store.shutdown().await?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cleared": count }));
    } else {
        ctx.output.success(&format!("Removed {} line(s)", count));
    }
    Ok(())
}
