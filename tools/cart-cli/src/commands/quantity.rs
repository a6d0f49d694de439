//! Increment or decrement a product's quantity.

use anyhow::Result;
use cart_store::CartHandle;

use super::QuantityArgs;
use crate::context::Context;

/// Run the inc command.
pub async fn increment(args: QuantityArgs, ctx: &Context) -> Result<()> {
    adjust(args, ctx, Direction::Up).await
}

/// Run the dec command.
pub async fn decrement(args: QuantityArgs, ctx: &Context) -> Result<()> {
    adjust(args, ctx, Direction::Down).await
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    async fn apply(self, cart: &CartHandle, id: &str) -> Result<()> {
        match self {
            Self::Up => cart.increment(id).await?,
            Self::Down => cart.decrement(id).await?,
        }
        Ok(())
    }
}

async fn adjust(args: QuantityArgs, ctx: &Context, direction: Direction) -> Result<()> {
    let store = ctx.open_store().await?;
    let cart = store.handle();

    if !cart.products().iter().any(|i| i.id.as_str() == args.id) {
        ctx.output
            .warn(&format!("'{}' is not in the cart, nothing changed", args.id));
    }

    for _ in 0..args.times {
        direction.apply(&cart, &args.id).await?;
    }
    ctx.output
        .debug(&format!("applied {} change(s) to '{}'", args.times, args.id));

    let products = cart.products();
    store.shutdown().await?;

    match products.iter().find(|i| i.id.as_str() == args.id) {
        Some(line) => ctx
            .output
            .success(&format!("{} x{}", line.title, line.quantity)),
        None if matches!(direction, Direction::Down) => {
            ctx.output.success(&format!("Removed '{}'", args.id))
        }
        None => {}
    }
    ctx.output.cart(&products);
    Ok(())
}
