//! Search module.
//!
//! Query criteria, the data structures each pipeline stage builds, the
//! pipeline itself, and result paging.

pub mod attribute;
pub mod pipeline;
pub mod range;
pub mod sort;
pub mod trie;

mod collation;
mod criteria;
mod facets;
mod options;
mod results;

pub use attribute::{filter_by_attribute, AttributeIndex};
pub use collation::NameCollator;
pub use criteria::{FilterCriteria, SortDirection, SortField, SortKey};
pub use facets::{Facet, FacetValue, PriceStats};
pub use options::{SearchOptions, TokenMode};
pub use pipeline::{apply_filters, sort_products};
pub use range::{filter_price_range, PriceBounds};
pub use results::{Pagination, SearchResults, DEFAULT_PAGE_SIZE};
pub use sort::quick_sort;
pub use trie::{prefix_search, ProductTrie};
