//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cart_kv::FileStore;
use cart_store::{CartStore, StoreConfig};

use crate::output::Output;

/// Config files looked for in the working directory and its parents.
const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = ".cart";

/// Execution context for CLI commands.
pub struct Context {
    /// Store configuration.
    pub config: StoreConfig,
    /// Where the config came from, if a file was used.
    pub config_path: Option<PathBuf>,
    /// Directory holding the persisted cart.
    pub data_dir: PathBuf,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from config file and arguments.
    pub fn load(config_path: Option<&str>, data_dir: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let config = StoreConfig::load(path)
                    .with_context(|| format!("Failed to load config file: {}", path))?;
                (config, Some(PathBuf::from(path)))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => {
                    let config = StoreConfig::load(&path).with_context(|| {
                        format!("Failed to load config file: {}", path.display())
                    })?;
                    (config, Some(path))
                }
                None => (StoreConfig::default(), None),
            },
        };

        let data_dir = data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(DEFAULT_DATA_DIR));

        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "using config file"),
            None => tracing::debug!("no config file found, using defaults"),
        }
        tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

        Ok(Self {
            config,
            config_path,
            data_dir,
            output,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Open the cart persisted in the data directory and wait for it to load.
    pub async fn open_store(&self) -> Result<CartStore> {
        let storage = FileStore::open(&self.data_dir)
            .await
            .with_context(|| format!("Failed to open data directory: {}", self.data_dir.display()))?;
        tracing::debug!(key = %self.config.storage_key, "opening cart");
        let store = CartStore::open(storage, self.config.clone()).await?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cart.toml"), "storage_key = \"k\"").unwrap();

        let found = Context::find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("cart.toml"));
    }

    #[test]
    fn test_explicit_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("custom.toml");
        std::fs::write(&config, "storage_key = \"@test:cart\"").unwrap();
        let data = dir.path().join("data");

        let ctx = Context::load(
            config.to_str(),
            data.to_str(),
            Output::new(false, true),
        )
        .unwrap();

        assert_eq!(ctx.config.storage_key, "@test:cart");
        assert_eq!(ctx.data_dir, data);
        assert_eq!(ctx.config_path, Some(config));
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("broken.toml");
        std::fs::write(&config, "channel_capacity = 0").unwrap();

        let err = Context::load(config.to_str(), None, Output::new(false, true))
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("channel_capacity"));
    }
}
