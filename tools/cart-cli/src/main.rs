//! Cart CLI - inspect and edit a cart persisted on local disk.
//!
//! Commands:
//! - `cart show` - List the items in the cart
//! - `cart add` - Add a product (or bump its quantity)
//! - `cart inc` - Increment a product's quantity
//! - `cart dec` - Decrement a product's quantity
//! - `cart clear` - Empty the cart
//! - `cart config` - Show the effective store configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, ConfigArgs, QuantityArgs, ShowArgs};

/// Cart CLI - Inspect and edit a persistent shopping cart
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the persisted cart
    #[arg(short, long, global = true, env = "CART_DATA_DIR")]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the items in the cart
    Show(ShowArgs),

    /// Add a product, or bump its quantity if already present
    Add(AddArgs),

    /// Increment a product's quantity
    Inc(QuantityArgs),

    /// Decrement a product's quantity, removing it at zero
    Dec(QuantityArgs),

    /// Remove every item from the cart
    Clear(ClearArgs),

    /// Show the effective store configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("cart=warn,cart_store=warn,cart_kv=warn"),
        1 => EnvFilter::new("cart=info,cart_store=info,cart_kv=info"),
        _ => EnvFilter::new("cart=debug,cart_store=debug,cart_kv=debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let output = output::Output::new(cli.verbose > 0, cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), cli.data_dir.as_deref(), output)
    {
        Ok(ctx) => ctx,
        Err(e) => {
            output::Output::new(false, cli.json).error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Inc(args) => commands::quantity::increment(args, &ctx).await,
        Commands::Dec(args) => commands::quantity::decrement(args, &ctx).await,
        Commands::Clear(args) => commands::clear::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
