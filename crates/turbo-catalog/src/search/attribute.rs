//! Case-insensitive attribute index for exact-match filters.

use std::collections::HashMap;

use tracing::trace;

use crate::catalog::{Attribute, Product};

/// Products grouped by the lower-cased value of one attribute.
///
/// Each bucket keeps the candidates in their original order. Products
/// without the attribute are left out of every bucket.
#[derive(Debug, Clone)]
pub struct AttributeIndex<'a> {
    attribute: Attribute,
    buckets: HashMap<String, Vec<&'a Product>>,
}

impl<'a> AttributeIndex<'a> {
    /// Index `candidates` by `attribute`.
    pub fn build(candidates: &[&'a Product], attribute: Attribute) -> Self {
        let mut buckets: HashMap<String, Vec<&'a Product>> = HashMap::new();
        for &product in candidates {
            if let Some(value) = product.attribute(attribute) {
                buckets.entry(value.to_lowercase()).or_default().push(product);
            }
        }
        trace!(%attribute, values = buckets.len(), "built attribute index");
        Self { attribute, buckets }
    }

    /// The indexed attribute.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Products whose attribute equals `value`, ignoring case.
    pub fn get(&self, value: &str) -> &[&'a Product] {
        self.buckets
            .get(&value.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct lower-cased values present in the index.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Keep the candidates whose `attribute` equals `value`, ignoring case.
pub fn filter_by_attribute<'a>(
    candidates: &[&'a Product],
    attribute: Attribute,
    value: &str,
) -> Vec<&'a Product> {
    AttributeIndex::build(candidates, attribute).get(value).to_vec()
}
