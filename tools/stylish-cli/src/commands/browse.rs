//! Catalog browsing.

use anyhow::Result;
use stylish_client::{PageOutcome, SkipReason};
use stylish_commerce::prelude::QueryContext;
use stylish_observability::ActionTimer;

use super::BrowseArgs;
use crate::context::Context;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let query = QueryContext::from_params(args.keyword.as_deref(), args.category.as_deref());
    let pager = ctx.pager(query.clone());

    let spinner = ctx.output.spinner("Loading products...");
    let timer = ActionTimer::start("browse");
    let result = load_pages(&pager, args.pages.max(1), ctx).await;
    timer.finish(&result);
    spinner.finish_and_clear();
    result?;

    let products = pager.items();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "context": query,
            "products": products,
            "next_paging": pager.next_cursor(),
        }));
        return Ok(());
    }

    match query.active_keyword() {
        Some(keyword) => ctx.output.header(&format!("Search results for '{}'", keyword)),
        None => ctx.output.header(&format!("Products in {}", query.category)),
    }

    if products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output.products(&products);
    println!();

    if pager.is_exhausted() {
        ctx.output.info(&format!("{} products, end of list", products.len()));
    } else {
        ctx.output.info(&format!(
            "{} products shown. Use --pages {} to load more.",
            products.len(),
            args.pages + 1
        ));
    }

    Ok(())
}

/// Mount the pager and keep signalling until `pages` pages are loaded or
/// the list is exhausted.
async fn load_pages(
    pager: &stylish_client::PaginationController,
    pages: usize,
    ctx: &Context,
) -> Result<()> {
    let outcome = pager.mount().await?;
    ctx.output.debug(&format!("page 1: {:?}", outcome));

    for page in 2..=pages {
        match pager.proximity_signal().await? {
            PageOutcome::Skipped(SkipReason::Exhausted) => break,
            outcome => ctx.output.debug(&format!("page {}: {:?}", page, outcome)),
        }
    }

    Ok(())
}
