//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::{debug, warn};
use turbo_catalog::CatalogSnapshot;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => {
                            debug!(path = %config_path.display(), "using config");
                            return Some(config);
                        }
                        Err(e) => warn!(path = %config_path.display(), "skipping config: {:#}", e),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Read the catalog snapshot named on the command line or in config.
    pub fn load_catalog(&self, path: Option<&str>) -> Result<CatalogSnapshot> {
        let path = path
            .or(self.config.catalog.path.as_deref())
            .context("No catalog given: pass --catalog or set catalog.path in catalog.toml")?;
        let path = self.cwd.join(path);

        let spinner = self.output.spinner("Loading catalog");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let snapshot = CatalogSnapshot::from_json(&content)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        spinner.finish_and_clear();

        self.output
            .debug(&format!("Loaded {} products from {}", snapshot.len(), path.display()));
        Ok(snapshot)
    }
}
