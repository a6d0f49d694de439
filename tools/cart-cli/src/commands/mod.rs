//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod config;
pub mod quantity;
pub mod show;

use clap::Args;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Show only the total item count.
    #[arg(long)]
    pub count: bool,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: String,

    /// Product title.
    #[arg(short, long)]
    pub title: String,

    /// Unit price.
    #[arg(short, long)]
    pub price: f64,

    /// Product image URL.
    #[arg(short, long, default_value = "")]
    pub image_url: String,
}

/// Arguments for the inc and dec commands.
#[derive(Args)]
pub struct QuantityArgs {
    /// Product ID.
    pub id: String,

    /// How many times to apply the change.
    #[arg(short = 'n', long, default_value = "1")]
    pub times: u32,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Print the configuration as TOML.
    #[arg(long)]
    pub toml: bool,
}
