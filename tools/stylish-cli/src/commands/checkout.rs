//! Checkout.

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use stylish_commerce::prelude::{DeliverySlot, Recipient};
use stylish_observability::ActionTimer;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    // An empty cart is reported by the sequencer, after the token step.
    let cart = ctx.session.cart();
    let interactive = !args.yes && !ctx.output.is_json() && !cart.is_empty();
    let recipient = collect_recipient(&args, interactive)?;

    if !ctx.output.is_json() && !cart.is_empty() {
        ctx.output.header("Order summary");
        ctx.output.cart(&cart);
        println!();
        ctx.output.totals(&cart.totals()?);
        ctx.output.header("Recipient");
        ctx.output.kv("Name", &recipient.name);
        ctx.output.kv("Phone", &recipient.phone);
        ctx.output.kv("Email", &recipient.email);
        ctx.output.kv("Address", &recipient.address);
        ctx.output.kv(
            "Delivery",
            recipient
                .delivery_slot
                .map(|slot| slot.display_name())
                .unwrap_or("-"),
        );
        println!();
    }

    if interactive {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.info("Checkout cancelled.");
            return Ok(());
        }
    }

    let sequencer = ctx.checkout();
    let spinner = ctx.output.spinner("Placing order...");
    let timer = ActionTimer::start("checkout");
    let result = sequencer.checkout(&recipient).await;
    timer.finish(&result);
    spinner.finish_and_clear();
    let receipt = result?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order_number": receipt.order_number,
            "totals": receipt.totals,
        }));
        return Ok(());
    }

    ctx.output.success("Order placed");
    ctx.output.kv("Order number", receipt.order_number.as_str());
    ctx.output.kv("Total", &crate::output::price(receipt.totals.total));

    Ok(())
}

/// Take recipient fields from flags, prompting for the ones left out.
fn collect_recipient(args: &CheckoutArgs, interactive: bool) -> Result<Recipient> {
    let field = |value: &Option<String>, prompt: &str| -> Result<String> {
        match value {
            Some(value) => Ok(value.clone()),
            None if interactive => Ok(Input::<String>::new()
                .with_prompt(prompt)
                .interact_text()?),
            None => Ok(String::new()),
        }
    };

    let name = field(&args.name, "Recipient name")?;
    let phone = field(&args.phone, "Mobile phone")?;
    let email = field(&args.email, "Email")?;
    let address = field(&args.address, "Address")?;

    let delivery_slot = match &args.time {
        Some(time) => Some(
            time.parse::<DeliverySlot>()
                .with_context(|| format!("Invalid delivery time '{}'", time))?,
        ),
        None if interactive => {
            let names: Vec<&str> = DeliverySlot::ALL.iter().map(|s| s.display_name()).collect();
            let selection = Select::new()
                .with_prompt("Delivery time")
                .items(&names)
                .default(DeliverySlot::ALL.len() - 1)
                .interact()?;
            Some(DeliverySlot::ALL[selection])
        }
        None => None,
    };

    Ok(Recipient {
        name,
        phone,
        email,
        address,
        delivery_slot,
    })
}
