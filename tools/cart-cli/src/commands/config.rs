//! Show the effective store configuration.

use anyhow::{Context as _, Result};
use cart_store::{BackoffStrategy, DecrementPersistence, SnapshotFormat};

use super::ConfigArgs;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output.is_json() {
        ctx.output.json(config);
        return Ok(());
    }

    if args.toml {
        let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
        print!("{}", rendered);
        return Ok(());
    }

    ctx.output.header("Store Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "defaults"),
    }
    ctx.output
        .kv("data_dir", &ctx.data_dir.display().to_string());
    ctx.output.kv("storage_key", &config.storage_key);
    ctx.output
        .kv("channel_capacity", &config.channel_capacity.to_string());
    ctx.output.kv(
        "decrement_persistence",
        match config.decrement_persistence {
            DecrementPersistence::Consistent => "consistent",
            DecrementPersistence::Legacy => "legacy",
        },
    );
    ctx.output.kv(
        "snapshot_format",
        match config.snapshot_format {
            SnapshotFormat::Versioned => "versioned",
            SnapshotFormat::Array => "array",
        },
    );
    ctx.output
        .kv("retry.max_attempts", &config.retry.max_attempts.to_string());
    ctx.output
        .kv("retry.backoff", &describe_backoff(&config.retry.backoff));
    Ok(())
}

fn describe_backoff(backoff: &BackoffStrategy) -> String {
    match backoff {
        BackoffStrategy::None => "none".to_string(),
        BackoffStrategy::Fixed { delay_ms } => format!("fixed {}ms", delay_ms),
        BackoffStrategy::Exponential { base_ms, max_ms } => {
            format!("exponential {}ms..{}ms", base_ms, max_ms)
        }
    }
}
