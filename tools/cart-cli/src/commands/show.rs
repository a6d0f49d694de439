//! List the items in the cart.

use anyhow::Result;

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    let products = store.handle().products();
    store.shutdown().await?;

    if args.count {
        let count: u64 = products.iter().map(|i| u64::from(i.quantity)).sum();
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({ "count": count }));
        } else {
            println!("{}", count);
        }
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output.cart(&products);
    Ok(())
}
