//! CLI command implementations.

pub mod config;
pub mod facets;
pub mod query;

use clap::{Args, Subcommand};
use turbo_catalog::search::{FilterCriteria, SortKey};

use crate::config::CliConfig;

/// Filter flags shared by `query` and `facets`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// URL query string to start from, e.g. "brand=nike&sortBy=price_desc".
    #[arg(short, long)]
    pub params: Option<String>,

    /// Search text, matched as a word prefix.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact brand (case-insensitive).
    #[arg(long)]
    pub brand: Option<String>,

    /// Exact category (case-insensitive).
    #[arg(long)]
    pub category: Option<String>,

    /// Exact color (case-insensitive).
    #[arg(long)]
    pub color: Option<String>,

    /// Exact size label (case-insensitive).
    #[arg(long)]
    pub size: Option<String>,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, inclusive.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum discount in percent.
    #[arg(long)]
    pub min_discount: Option<f64>,

    /// true keeps only available products; false means no constraint.
    #[arg(long)]
    pub available: Option<bool>,
}

impl FilterArgs {
    /// Build criteria: `--params` first, explicit flags override it.
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = self
            .params
            .as_deref()
            .map(FilterCriteria::from_query_string)
            .unwrap_or_default();

        if let Some(search) = &self.search {
            criteria.search_term = Some(search.clone());
        }
        if let Some(brand) = &self.brand {
            criteria.brand = Some(brand.clone());
        }
        if let Some(category) = &self.category {
            criteria.category = Some(category.clone());
        }
        if let Some(color) = &self.color {
            criteria.color = Some(color.clone());
        }
        if let Some(size) = &self.size {
            criteria.size = Some(size.clone());
        }
        if self.min_price.is_some() {
            criteria.min_price = self.min_price;
        }
        if self.max_price.is_some() {
            criteria.max_price = self.max_price;
        }
        if self.min_discount.is_some() {
            criteria.min_discount = self.min_discount;
        }
        if self.available.is_some() {
            criteria.available = self.available;
        }

        criteria
    }
}

/// Arguments for the query command.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Catalog JSON file (overrides catalog.path).
    #[arg(long)]
    pub catalog: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Sort key, e.g. price_asc, name_desc, createdAt_desc.
    #[arg(long)]
    pub sort: Option<String>,

    /// Page to show (1-indexed).
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Products per page (overrides query.page_size).
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Include brand/category facets in the output.
    #[arg(long)]
    pub facets: bool,
}

impl QueryArgs {
    /// Criteria with the sort resolved: flag, then params, then config default.
    pub fn to_criteria(&self, config: &CliConfig) -> FilterCriteria {
        let mut criteria = self.filters.to_criteria();
        if let Some(sort) = self.sort.as_deref().and_then(SortKey::parse) {
            criteria.sort_by = Some(sort);
        }
        if criteria.sort_by.is_none() {
            criteria.sort_by = Some(config.default_sort());
        }
        criteria
    }
}

/// Arguments for the facets command.
#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Catalog JSON file (overrides catalog.path).
    #[arg(long)]
    pub catalog: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default catalog.toml.
    Init {
        /// Overwrite an existing file without asking.
        #[arg(short, long)]
        force: bool,
    },
    /// Check the configuration for errors.
    Validate,
}
