//! Cart management.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use stylish_commerce::prelude::{CartItem, ProductId};
use stylish_data::ProductApi;
use stylish_observability::ActionTimer;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::List) | None => list_cart(ctx),
        Some(CartCommand::Add {
            id,
            qty,
            color,
            size,
        }) => add_item(&id, qty, color.as_deref(), size, ctx).await,
        Some(CartCommand::Update { index, qty }) => update_item(index, qty, ctx),
        Some(CartCommand::Remove { index }) => remove_item(index, ctx),
        Some(CartCommand::Clear { yes }) => clear_cart(yes, ctx),
    }
}

fn list_cart(ctx: &Context) -> Result<()> {
    let cart = ctx.session.cart();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "totals": cart.totals().ok(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `stylish cart add <id>` to add a product.");
        return Ok(());
    }

    ctx.output.cart(&cart);
    println!();
    ctx.output.totals(&cart.totals()?);

    Ok(())
}

async fn add_item(
    id: &str,
    quantity: u32,
    color: Option<&str>,
    size: Option<String>,
    ctx: &Context,
) -> Result<()> {
    if quantity == 0 {
        bail!("Quantity must be at least 1");
    }

    let spinner = ctx.output.spinner("Fetching product...");
    let timer = ActionTimer::start("fetch_product");
    let result = ctx.api().fetch_product(&ProductId::new(id)).await;
    timer.finish(&result);
    spinner.finish_and_clear();
    let product = result?;

    let variant = match color {
        Some(code) => match product.color_variants.iter().find(|c| c.code == code) {
            Some(variant) => Some(variant.clone()),
            None => bail!("Product {} has no color '{}'", product.id, code),
        },
        None => product.color_variants.first().cloned(),
    };

    let mut item = CartItem::from_product(&product, quantity);
    if let Some(variant) = variant {
        item = item.with_color(variant);
    }
    if let Some(size) = size {
        item = item.with_size(size);
    }

    let index = ctx.session.add_item(item)?;
    ctx.output.success(&format!(
        "Added {} x{} to cart (line {})",
        product.title, quantity, index
    ));
    ctx.output.kv("Cart total", &crate::output::price(ctx.session.cart().totals()?.total));

    Ok(())
}

fn update_item(index: usize, quantity: u32, ctx: &Context) -> Result<()> {
    ctx.session.update_quantity(index, quantity)?;
    ctx.output.success(&format!("Line {} set to {}", index, quantity));
    Ok(())
}

fn remove_item(index: usize, ctx: &Context) -> Result<()> {
    let removed = ctx.session.remove_item(index)?;
    ctx.output.success(&format!("Removed {} from cart", removed.name));
    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    if ctx.session.cart().is_empty() {
        ctx.output.info("Cart is already empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    ctx.session.clear_cart()?;
    ctx.output.success("Cart cleared");
    Ok(())
}
