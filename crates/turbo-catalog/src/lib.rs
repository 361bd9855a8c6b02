//! In-memory catalog querying for TurboCommerce storefronts.
//!
//! The storefront fetches the whole product listing once and answers
//! every filter, search and sort request locally:
//!
//! - **Catalog**: the product model and an immutable [`CatalogSnapshot`]
//! - **Search**: price range filtering by binary search, case-insensitive
//!   attribute indexes, a word-prefix trie, quicksort, and the fixed-order
//!   pipeline that ties them together
//!
//! Every query is a pure function of the products and criteria passed in.
//! Indexes are rebuilt per query; only a [`CatalogSnapshot`] keeps its
//! price ordering between queries.
//!
//! # Example
//!
//! ```rust
//! use turbo_catalog::prelude::*;
//!
//! let products = vec![
//!     Product::new(1, "Blue Shirt", 20.0).with_brand("Nike").with_category("Apparel"),
//!     Product::new(2, "Red Shoes", 50.0).with_brand("Nike").with_category("Footwear"),
//!     Product::new(3, "Green Hat", 15.0).with_brand("Adidas").with_category("Apparel"),
//! ];
//!
//! let criteria = FilterCriteria::from_query_string("brand=nike&sortBy=price_desc");
//! let results = apply_filters(&products, &criteria, &SearchOptions::default());
//!
//! let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["Red Shoes", "Blue Shirt"]);
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod search;

pub use catalog::CatalogSnapshot;
pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{Attribute, CatalogSnapshot, Product, ProductPage};

    // Search
    pub use crate::search::{
        apply_filters, Facet, FacetValue, FilterCriteria, Pagination, PriceBounds, PriceStats,
        SearchOptions, SearchResults, SortDirection, SortField, SortKey, TokenMode,
    };
}
