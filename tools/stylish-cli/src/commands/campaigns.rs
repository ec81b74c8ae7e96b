//! Promotional campaigns.

use std::time::Duration;

use anyhow::Result;
use stylish_observability::ActionTimer;

use super::CampaignsArgs;
use crate::context::Context;

/// Run the campaigns command.
pub async fn run(args: CampaignsArgs, ctx: &Context) -> Result<()> {
    let carousel = ctx.carousel();

    let timer = ActionTimer::start("campaigns");
    let result = carousel.load().await;
    timer.finish(&result);
    let count = result?;

    let campaigns = carousel.campaigns();

    if ctx.output.is_json() {
        ctx.output.json(&campaigns);
        return Ok(());
    }

    ctx.output.header("Campaigns");

    if count == 0 {
        ctx.output.info("No campaigns running.");
        return Ok(());
    }

    for campaign in &campaigns {
        let title = campaign.title().unwrap_or_default();
        ctx.output.list_item(&format!(
            "{} {}",
            console::style(campaign.linked_product_id.as_str()).cyan(),
            title
        ));
        for line in campaign.headline().lines() {
            ctx.output.kv("", line);
        }
    }

    let Some(rotations) = args.rotate else {
        return Ok(());
    };

    println!();
    let interval = Duration::from_millis(ctx.config.carousel.interval_ms);
    carousel.start();
    for _ in 0..rotations.saturating_mul(count) {
        if let Some(active) = carousel.active() {
            ctx.output.info(&format!(
                "[{}/{}] {}",
                carousel.active_index() + 1,
                count,
                active.title().unwrap_or(active.linked_product_id.as_str())
            ));
        }
        tokio::time::sleep(interval).await;
    }
    carousel.stop();

    Ok(())
}
