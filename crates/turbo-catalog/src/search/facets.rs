//! Facet counts for filter dropdowns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Attribute, Product};

/// Distinct values of one attribute with their product counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// The attribute being counted.
    pub field: Attribute,
    /// Values, most common first.
    pub values: Vec<FacetValue>,
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// First spelling seen for this value.
    pub value: String,
    /// Number of products with this value.
    pub count: usize,
    /// Whether it matches the active filter.
    pub selected: bool,
}

impl Facet {
    /// Count `attribute` values over `products`, grouping case-insensitively.
    ///
    /// `selected` marks the value currently filtered on, if any.
    pub fn terms_for(products: &[&Product], attribute: Attribute, selected: Option<&str>) -> Self {
        let selected = selected.map(str::to_lowercase);
        let mut counts: HashMap<String, FacetValue> = HashMap::new();

        for product in products {
            let Some(value) = product.attribute(attribute) else {
                continue;
            };
            let key = value.to_lowercase();
            counts
                .entry(key.clone())
                .or_insert_with(|| FacetValue {
                    value: value.to_string(),
                    count: 0,
                    selected: selected.as_deref() == Some(key.as_str()),
                })
                .count += 1;
        }

        let mut values: Vec<FacetValue> = counts.into_values().collect();
        values.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.value.to_lowercase().cmp(&b.value.to_lowercase()))
        });

        Self {
            field: attribute,
            values,
        }
    }

    /// Check if a value is present, ignoring case the way values are grouped.
    pub fn contains(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        self.values.iter().any(|v| v.value.to_lowercase() == value)
    }
}

/// Price summary of a result set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

impl PriceStats {
    /// Summarize prices, or `None` for an empty set.
    pub fn from_products(products: &[&Product]) -> Option<Self> {
        if products.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for product in products {
            min = min.min(product.price);
            max = max.max(product.price);
            sum += product.price;
        }
        Some(Self {
            min,
            max,
            mean: sum / products.len() as f64,
            count: products.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Blue Shirt", 20.0).with_brand("Nike"),
            Product::new(2, "Red Shoes", 50.0).with_brand("nike"),
            Product::new(3, "Green Hat", 15.0).with_brand("Adidas"),
            Product::new(4, "Plain Cap", 5.0),
        ]
    }

    #[test]
    fn test_terms_grouped_case_insensitively() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        let facet = Facet::terms_for(&refs, Attribute::Brand, Some("NIKE"));

        assert_eq!(facet.values.len(), 2);
        assert_eq!(facet.values[0].value, "Nike");
        assert_eq!(facet.values[0].count, 2);
        assert!(facet.values[0].selected);
        assert_eq!(facet.values[1].value, "Adidas");
        assert!(!facet.values[1].selected);
        assert!(facet.contains("adidas"));
    }

    #[test]
    fn test_contains_folds_non_ascii_case() {
        let catalog = vec![
            Product::new(1, "Glider", 120.0).with_brand("Élan"),
            Product::new(2, "Board", 80.0).with_brand("élan"),
        ];
        let refs: Vec<&Product> = catalog.iter().collect();
        let facet = Facet::terms_for(&refs, Attribute::Brand, Some("ÉLAN"));

        assert_eq!(facet.values.len(), 1);
        assert_eq!(facet.values[0].count, 2);
        assert!(facet.values[0].selected);
        assert!(facet.contains("élan"));
        assert!(facet.contains("ÉLAN"));
        assert!(!facet.contains("elan"));
    }

    #[test]
    fn test_price_stats() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        let stats = PriceStats::from_products(&refs).unwrap();
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 50.0);
        assert_eq!(stats.mean, 22.5);
        assert_eq!(stats.count, 4);

        assert!(PriceStats::from_products(&[]).is_none());
    }
}
