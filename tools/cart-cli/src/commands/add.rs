//! Add a product to the cart.

use anyhow::Result;
use cart_store::NewCartItem;

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    let cart = store.handle();

    let item = NewCartItem::new(args.id.as_str(), args.title, args.image_url, args.price);
    cart.add_to_cart(item).await?;

    let products = cart.products();
    store.shutdown().await?;

    if let Some(line) = products.iter().find(|i| i.id.as_str() == args.id) {
        ctx.output
            .success(&format!("{} x{}", line.title, line.quantity));
    }
    ctx.output.cart(&products);
    Ok(())
}
