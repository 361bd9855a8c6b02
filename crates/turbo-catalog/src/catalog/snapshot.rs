//! Immutable catalog snapshots.
//!
//! The storefront fetches every page of the product listing up front and
//! then filters locally. A [`CatalogSnapshot`] is that fetched product set.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::error::{CatalogError, Result};
use crate::search::sort::quick_sort;
use crate::search::{pipeline, FilterCriteria, SearchOptions};

/// One page of the backend product listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page.
    pub content: Vec<Product>,
    /// Zero-based page number.
    #[serde(default)]
    pub number: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Total number of pages in the listing.
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    /// Total number of products in the listing.
    #[serde(default)]
    pub total_elements: u64,
}

fn default_total_pages() -> u32 {
    1
}

/// Full product set held by the client.
///
/// The product list never changes after construction, so the price
/// ordering computed for range queries is cached for the snapshot's
/// lifetime. A changed catalog means building a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    price_order: OnceLock<Vec<usize>>,
}

impl CatalogSnapshot {
    /// Create a snapshot from an already fetched product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            price_order: OnceLock::new(),
        }
    }

    /// Assemble a snapshot from listing pages fetched in order.
    ///
    /// Pages must cover `0..total_pages` exactly once, in order.
    pub fn from_pages(pages: impl IntoIterator<Item = ProductPage>) -> Result<Self> {
        let mut products = Vec::new();
        let mut expected = 0u32;
        let mut total_pages = None;

        for page in pages {
            if page.number != expected {
                return Err(CatalogError::Validation(format!(
                    "expected page {} but got page {}",
                    expected, page.number
                )));
            }
            total_pages = Some(page.total_pages);
            products.extend(page.content);
            expected += 1;
        }

        match total_pages {
            Some(total) if expected < total => {
                return Err(CatalogError::Validation(format!(
                    "listing has {} pages but only {} were fetched",
                    total, expected
                )));
            }
            _ => {}
        }

        debug!(pages = expected, products = products.len(), "assembled catalog snapshot");
        Ok(Self::new(products))
    }

    /// Parse a snapshot from JSON.
    ///
    /// Accepts a bare array of products, a single listing page, or an array
    /// of listing pages.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        let is_page = |v: &serde_json::Value| v.get("content").is_some();
        let snapshot = if is_page(&value) {
            let page: ProductPage = serde_json::from_value(value)?;
            Self::from_pages([page])?
        } else if value
            .as_array()
            .is_some_and(|items| items.first().is_some_and(is_page))
        {
            let pages: Vec<ProductPage> = serde_json::from_value(value)?;
            Self::from_pages(pages)?
        } else if value.is_array() {
            Self::new(serde_json::from_value(value)?)
        } else {
            return Err(CatalogError::Serialization(
                "expected a product array or listing page".to_string(),
            ));
        };

        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the data model constraints on every product.
    pub fn validate(&self) -> Result<()> {
        for product in &self.products {
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(CatalogError::Validation(format!(
                    "product {} has invalid price {}",
                    product.id, product.price
                )));
            }
        }
        Ok(())
    }

    /// All products in fetch order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products ordered by ascending price. Computed once per snapshot.
    pub fn price_ordered(&self) -> Vec<&Product> {
        self.price_order_indices()
            .iter()
            .map(|&i| &self.products[i])
            .collect()
    }

    fn price_order_indices(&self) -> &[usize] {
        self.price_order.get_or_init(|| {
            let indices: Vec<usize> = (0..self.products.len()).collect();
            quick_sort(&indices, |a, b| {
                self.products[*a].price.total_cmp(&self.products[*b].price)
            })
        })
    }

    /// Run the filter pipeline over this snapshot.
    pub fn query(&self, criteria: &FilterCriteria, options: &SearchOptions) -> Vec<&Product> {
        let candidates: Vec<&Product> = self.products.iter().collect();
        let price_ordered = criteria.price_bounds().map(|_| self.price_ordered());
        pipeline::run(candidates, price_ordered, criteria, options)
    }
}

impl From<Vec<Product>> for CatalogSnapshot {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, total_pages: u32, ids: &[u64]) -> ProductPage {
        ProductPage {
            content: ids
                .iter()
                .map(|&id| Product::new(id, format!("Product {}", id), id as f64))
                .collect(),
            number,
            size: ids.len() as u32,
            total_pages,
            total_elements: 0,
        }
    }

    #[test]
    fn test_from_pages_concatenates_in_order() {
        let snapshot =
            CatalogSnapshot::from_pages(vec![page(0, 2, &[1, 2]), page(1, 2, &[3])]).unwrap();
        let ids: Vec<u64> = snapshot.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_pages_rejects_missing_page() {
        let err = CatalogSnapshot::from_pages(vec![page(0, 3, &[1]), page(1, 3, &[2])]);
        assert!(matches!(err, Err(CatalogError::Validation(_))));

        let err = CatalogSnapshot::from_pages(vec![page(1, 2, &[1])]);
        assert!(matches!(err, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_from_json_accepts_product_array() {
        let snapshot = CatalogSnapshot::from_json(
            r#"[{"id": 1, "name": "A", "price": 3}, {"id": 2, "name": "B", "price": 1}]"#,
        )
        .unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_from_json_accepts_pages() {
        let snapshot = CatalogSnapshot::from_json(
            r#"[
                {"content": [{"id": 1, "name": "A", "price": 3}], "number": 0, "totalPages": 2},
                {"content": [{"id": 2, "name": "B", "price": 1}], "number": 1, "totalPages": 2}
            ]"#,
        )
        .unwrap();
        assert_eq!(snapshot.len(), 2);

        let single = CatalogSnapshot::from_json(
            r#"{"content": [{"id": 1, "name": "A", "price": 3}], "number": 0, "totalPages": 1}"#,
        )
        .unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let err = CatalogSnapshot::from_json(r#"[{"id": 1, "name": "A", "price": -3}]"#);
        assert!(matches!(err, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            CatalogSnapshot::from_json("42"),
            Err(CatalogError::Serialization(_))
        ));
        assert!(CatalogSnapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_price_ordered() {
        let snapshot = CatalogSnapshot::new(vec![
            Product::new(1, "A", 30.0),
            Product::new(2, "B", 10.0),
            Product::new(3, "C", 20.0),
        ]);
        let prices: Vec<f64> = snapshot.price_ordered().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
        // cached ordering is reused
        assert_eq!(snapshot.price_ordered().len(), 3);
    }
}
