//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use turbo_catalog::search::{SearchOptions, SortKey, DEFAULT_PAGE_SIZE};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the catalog snapshot lives.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Listing defaults.
    #[serde(default)]
    pub query: QueryConfig,

    /// Search tuning.
    #[serde(default)]
    pub search: SearchOptions,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: CliConfig = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path))?;
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.query.page_size == 0 {
            bail!("query.page_size must be at least 1");
        }
        if SortKey::parse(&self.query.default_sort).is_none() {
            bail!("query.default_sort must not be empty");
        }
        Ok(())
    }

    /// Sort key used when a query names none.
    pub fn default_sort(&self) -> SortKey {
        SortKey::parse(&self.query.default_sort).unwrap_or_default()
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the products JSON (product array or listing pages).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort key applied when none is given, e.g. `price_asc`.
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sort() -> String {
    SortKey::default().to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: default_sort(),
        }
    }
}

/// Generate a commented default config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Catalog CLI configuration

[catalog]
# Products JSON: a product array or an array of listing pages
# path = "products.json"

[query]
page_size = {page_size}
# price_asc, price_desc, name_asc, name_desc, createdAt_asc, createdAt_desc
default_sort = "{sort}"

[search]
# "fields" matches only the start of each field, "words" any word in it
token_mode = "fields"
"#,
        page_size = DEFAULT_PAGE_SIZE,
        sort = SortKey::default(),
    )
}
