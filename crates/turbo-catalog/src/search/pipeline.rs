//! Fixed-order query pipeline.
//!
//! Stages run in this order, each narrowing the candidates left by the one
//! before, and each skipped when its criterion is absent:
//!
//! 1. price range
//! 2. brand, category, color
//! 3. size, availability, minimum discount
//! 4. text prefix search
//! 5. sort
//!
//! The order is part of the query semantics: a search term only sees
//! products that survived the price and attribute stages.

use std::cmp::Ordering;

use tracing::debug;

use crate::catalog::{Attribute, Product};
use crate::search::attribute::filter_by_attribute;
use crate::search::collation::NameCollator;
use crate::search::range::{filter_price_range, slice_price_range};
use crate::search::sort::quick_sort;
use crate::search::trie::prefix_search;
use crate::search::{FilterCriteria, SearchOptions, SortDirection, SortField, SortKey};

/// Run every stage over `products` and return the matches in display order.
///
/// Inputs are never modified.
pub fn apply_filters<'a>(
    products: &'a [Product],
    criteria: &FilterCriteria,
    options: &SearchOptions,
) -> Vec<&'a Product> {
    run(products.iter().collect(), None, criteria, options)
}

/// Pipeline body. `price_ordered`, when given, must be `candidates` sorted
/// ascending by price with [`quick_sort`].
pub(crate) fn run<'a>(
    candidates: Vec<&'a Product>,
    price_ordered: Option<Vec<&'a Product>>,
    criteria: &FilterCriteria,
    options: &SearchOptions,
) -> Vec<&'a Product> {
    let mut candidates = candidates;
    debug!(candidates = candidates.len(), "query started");

    if let Some(bounds) = criteria.price_bounds() {
        candidates = match price_ordered {
            Some(sorted) => slice_price_range(&sorted, bounds).to_vec(),
            None => filter_price_range(&candidates, bounds),
        };
        debug!(min = bounds.min, max = bounds.max, candidates = candidates.len(), "price stage");
    }

    let attribute_filters = [
        (Attribute::Brand, criteria.brand()),
        (Attribute::Category, criteria.category()),
        (Attribute::Color, criteria.color()),
        (Attribute::Size, criteria.size()),
    ];
    for (attribute, value) in attribute_filters {
        if let Some(value) = value {
            candidates = filter_by_attribute(&candidates, attribute, value);
            debug!(%attribute, value, candidates = candidates.len(), "attribute stage");
        }
    }

    if criteria.available == Some(true) {
        candidates.retain(|p| p.available);
        debug!(candidates = candidates.len(), "availability stage");
    }

    if let Some(min_discount) = criteria.min_discount() {
        candidates.retain(|p| p.discount() >= min_discount);
        debug!(min_discount, candidates = candidates.len(), "discount stage");
    }

    if let Some(term) = criteria.search_term() {
        candidates = prefix_search(&candidates, term, options.token_mode);
        debug!(term, candidates = candidates.len(), "search stage");
    }

    if let Some(key) = &criteria.sort_by {
        candidates = sort_products(&candidates, key);
        debug!(sort = %key, "sort stage");
    }

    candidates
}

/// Order products by a sort key.
///
/// Unrecognized fields leave the order untouched.
pub fn sort_products<'a>(candidates: &[&'a Product], key: &SortKey) -> Vec<&'a Product> {
    if matches!(key.field, SortField::Unrecognized(_)) {
        return candidates.to_vec();
    }
    let names = NameCollator::new();
    quick_sort(candidates, |a, b| compare_products(a, b, key, &names))
}

/// Three-way comparison of two products under a sort key.
pub fn compare_products(
    a: &Product,
    b: &Product,
    key: &SortKey,
    names: &NameCollator,
) -> Ordering {
    let ordering = match key.field {
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Name => names.compare(&a.name, &b.name),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Unrecognized(_) => Ordering::Equal,
    };
    match key.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "banana", 3.0).with_created_at(at(2)),
            Product::new(2, "Apple", 1.0).with_created_at(at(3)),
            Product::new(3, "cherry", 2.0).with_created_at(at(1)),
        ]
    }

    fn names(result: &[&Product]) -> Vec<String> {
        result.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_no_criteria_is_pass_through() {
        let catalog = catalog();
        let result = apply_filters(&catalog, &FilterCriteria::new(), &SearchOptions::default());
        assert_eq!(names(&result), vec!["banana", "Apple", "cherry"]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        let sorted = sort_products(&refs, &SortKey::parse("name_asc").unwrap());
        assert_eq!(names(&sorted), vec!["Apple", "banana", "cherry"]);

        let sorted = sort_products(&refs, &SortKey::parse("name_desc").unwrap());
        assert_eq!(names(&sorted), vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_sort_by_created_at() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        let newest = sort_products(&refs, &SortKey::default());
        assert_eq!(names(&newest), vec!["Apple", "banana", "cherry"]);

        let oldest = sort_products(&refs, &SortKey::parse("createdAt_asc").unwrap());
        assert_eq!(names(&oldest), vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_missing_timestamp_sorts_first() {
        let catalog = vec![
            Product::new(1, "dated", 1.0).with_created_at(at(5)),
            Product::new(2, "undated", 1.0),
        ];
        let refs: Vec<&Product> = catalog.iter().collect();
        let sorted = sort_products(&refs, &SortKey::parse("createdAt_asc").unwrap());
        assert_eq!(names(&sorted), vec!["undated", "dated"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_sort(SortKey::parse("rating_desc").unwrap());
        let result = apply_filters(&catalog, &criteria, &SearchOptions::default());
        assert_eq!(names(&result), vec!["banana", "Apple", "cherry"]);
    }

    #[test]
    fn test_price_stage_orders_by_price() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_max_price(2.5);
        let result = apply_filters(&catalog, &criteria, &SearchOptions::default());
        assert_eq!(names(&result), vec!["Apple", "cherry"]);
    }

    #[test]
    fn test_availability_and_discount_stages() {
        let catalog = vec![
            Product::new(1, "on sale", 10.0).with_discount(25.0),
            Product::new(2, "full price", 10.0),
            Product::new(3, "hidden sale", 10.0).with_discount(50.0).with_available(false),
        ];
        let options = SearchOptions::default();

        let available = apply_filters(&catalog, &FilterCriteria::new().with_available(true), &options);
        assert_eq!(names(&available), vec!["on sale", "full price"]);

        // unticking "only available" puts available=false in the URL: no constraint
        let unticked = apply_filters(&catalog, &FilterCriteria::new().with_available(false), &options);
        assert_eq!(names(&unticked), vec!["on sale", "full price", "hidden sale"]);

        let discounted = apply_filters(&catalog, &FilterCriteria::new().with_min_discount(20.0), &options);
        assert_eq!(names(&discounted), vec!["on sale", "hidden sale"]);
    }

    #[test]
    fn test_search_only_sees_earlier_survivors() {
        let catalog = vec![
            Product::new(1, "Blue Shirt", 20.0).with_brand("Nike"),
            Product::new(2, "Blue Jeans", 80.0).with_brand("Levis"),
        ];
        let criteria = FilterCriteria::new().with_max_price(50.0).with_search_term("blue");
        let result = apply_filters(&catalog, &criteria, &SearchOptions::default());
        assert_eq!(names(&result), vec!["Blue Shirt"]);
    }

    #[test]
    fn test_sort_by_name_places_accented_initials_with_base_letter() {
        let catalog = vec![
            Product::new(1, "zebra", 1.0),
            Product::new(2, "Élan", 1.0),
            Product::new(3, "eagle", 1.0),
        ];
        let refs: Vec<&Product> = catalog.iter().collect();
        let sorted = sort_products(&refs, &SortKey::parse("name_asc").unwrap());
        assert_eq!(names(&sorted), vec!["eagle", "Élan", "zebra"]);

        let sorted = sort_products(&refs, &SortKey::parse("name_desc").unwrap());
        assert_eq!(names(&sorted), vec!["zebra", "Élan", "eagle"]);
    }

    #[test]
    fn test_default_search_matches_field_starts_only() {
        let catalog = vec![Product::new(1, "Blue Shirt", 20.0).with_brand("Nike")];
        let options = SearchOptions::default();

        let inner = apply_filters(&catalog, &FilterCriteria::new().with_search_term("shirt"), &options);
        assert!(inner.is_empty());

        let start = apply_filters(&catalog, &FilterCriteria::new().with_search_term("blue s"), &options);
        assert_eq!(names(&start), vec!["Blue Shirt"]);
    }
}
