//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod campaigns;
pub mod cart;
pub mod checkout;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category to list (all, women, men, accessories).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Search keyword. Takes precedence over the category.
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Number of pages to load.
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,
}

/// Arguments for the campaigns command.
#[derive(Args)]
pub struct CampaignsArgs {
    /// Rotate through the slides this many times.
    #[arg(long)]
    pub rotate: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals
    List,

    /// Add a product to the cart
    Add {
        /// Product ID.
        id: String,

        /// Quantity.
        #[arg(short, long, default_value_t = 1)]
        qty: u32,

        /// Color code (defaults to the first variant).
        #[arg(long)]
        color: Option<String>,

        /// Size.
        #[arg(long)]
        size: Option<String>,
    },

    /// Change the quantity of a cart line
    Update {
        /// Line number as shown by `stylish cart list`.
        index: usize,

        /// New quantity.
        qty: u32,
    },

    /// Remove a cart line
    Remove {
        /// Line number as shown by `stylish cart list`.
        index: usize,
    },

    /// Empty the cart
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name.
    #[arg(long)]
    pub name: Option<String>,

    /// Mobile phone (09xxxxxxxx).
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Delivery time (morning, afternoon, anytime).
    #[arg(long)]
    pub time: Option<String>,

    /// Skip prompts and confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: Option<AccountCommand>,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Show the member profile
    Profile,

    /// Sign in with email and password
    Signin {
        /// Email address.
        #[arg(long)]
        email: Option<String>,
    },

    /// Create a member account
    Signup {
        /// Display name.
        #[arg(long)]
        name: Option<String>,

        /// Email address.
        #[arg(long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,
}
