//! Output formatting for the CLI.

use cart_store::CartItem;
use console::style;

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
    pub fn json<T: serde::Serialize + ?Sized>(&self, value: &T) {
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

    /// Print the cart as a table, or as JSON in JSON mode.
    pub fn cart(&self, items: &[CartItem]) {
        if self.json {
            self.json(items);
            return;
        }

        if items.is_empty() {
            self.info("Cart is empty");
            return;
        }

        let widths = column_widths(items);
        self.table_row(&["ID", "TITLE", "PRICE", "QTY"], &widths);
        for item in items {
            self.table_row(
                &[
                    item.id.as_str(),
                    &item.title,
                    &format_price(item.price),
                    &item.quantity.to_string(),
                ],
                &widths,
            );
        }

        let count: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();
        println!(
            "\n  {} {}",
            style(count).bold(),
            if count == 1 { "item" } else { "items" }
        );
    }

    /// Print a table row.
    fn table_row(&self, cols: &[&str], widths: &[usize]) {
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn column_widths(items: &[CartItem]) -> [usize; 4] {
    let mut widths = [2, 5, 5, 3];
    for item in items {
        widths[0] = widths[0].max(item.id.as_str().chars().count());
        widths[1] = widths[1].max(item.title.chars().count());
        widths[2] = widths[2].max(format_price(item.price).len());
        widths[3] = widths[3].max(item.quantity.to_string().len());
    }
    widths
}

/// Format a price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_store::NewCartItem;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(10.0), "10.00");
        assert_eq!(format_price(4.5), "4.50");
        assert_eq!(format_price(0.0), "0.00");
    }

    #[test]
    fn test_column_widths_fit_content() {
        let mut item = NewCartItem::new("sku-000123", "Tee", "", 1234.5).into_item();
        item.quantity = 12345;

        assert_eq!(column_widths(&[item]), [10, 5, 7, 5]);
        assert_eq!(column_widths(&[]), [2, 5, 5, 3]);
    }
}
