//! STYLiSH CLI - Browse the storefront and place orders from a terminal.
//!
//! Commands:
//! - `stylish browse` - List products by category or keyword
//! - `stylish campaigns` - Show promotional campaigns
//! - `stylish cart` - Manage the stored cart
//! - `stylish checkout` - Place an order for the cart
//! - `stylish account` - Sign in, sign up, and show the member profile

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stylish_observability::{init_logging, LogLevel};

use commands::{AccountArgs, BrowseArgs, CampaignsArgs, CartArgs, CheckoutArgs};

/// STYLiSH CLI - Shop the STYLiSH storefront
#[derive(Parser)]
#[command(name = "stylish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products by category or keyword
    Browse(BrowseArgs),

    /// Show promotional campaigns
    Campaigns(CampaignsArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Member account
    Account(AccountArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let mut config = match context::Context::read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    if cli.verbose {
        config.logging.level = LogLevel::Debug;
    }
    if let Err(e) = init_logging(&config.logging) {
        output.warn(&e.to_string());
    }

    let ctx = match context::Context::load(config, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Campaigns(args) => commands::campaigns::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Account(args) => commands::account::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
