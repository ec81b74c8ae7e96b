//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use stylish_commerce::prelude::{Cart, Money, OrderTotals, Product};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a product listing.
    pub fn products(&self, products: &[Product]) {
        let widths = [14, 36, 10, 20];
        self.table_row(&["ID", "TITLE", "PRICE", "COLORS"], &widths);
        for product in products {
            let colors: Vec<&str> = product
                .color_variants
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            self.table_row(
                &[
                    product.id.as_str(),
                    &product.title,
                    &product.price.display(),
                    &colors.join("/"),
                ],
                &widths,
            );
        }
    }

    /// Print cart lines and totals.
    pub fn cart(&self, cart: &Cart) {
        let widths = [3, 30, 10, 10, 6, 10];
        self.table_row(&["#", "ITEM", "VARIANT", "PRICE", "QTY", "LINE"], &widths);
        for (index, item) in cart.items().iter().enumerate() {
            let variant = [
                item.color.as_ref().map(|c| c.name.as_str()),
                item.size.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
            let line = item
                .line_total()
                .map(|m| m.display())
                .unwrap_or_else(|_| "-".to_string());
            self.table_row(
                &[
                    &index.to_string(),
                    &item.name,
                    &variant,
                    &item.price.display(),
                    &item.quantity.to_string(),
                    &line,
                ],
                &widths,
            );
        }
    }

    /// Print order totals.
    pub fn totals(&self, totals: &OrderTotals) {
        self.kv("Subtotal", &totals.subtotal.display());
        self.kv("Freight", &totals.freight.display());
        self.kv("Total", &style(totals.total.display()).bold().to_string());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a price for a one-line summary.
pub fn price(amount: Money) -> String {
    style(amount.display()).cyan().to_string()
}
