//! Property-based tests for the query engine.

use proptest::prelude::*;
use turbo_catalog::prelude::*;
use turbo_catalog::search::{filter_by_attribute, filter_price_range, quick_sort, sort_products};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_product(id: u64) -> impl Strategy<Value = Product> {
    (
        "[a-z]{1,6}( [a-z]{1,6})?",
        0u32..40,
        prop::sample::select(vec!["Nike", "nike", "NIKE", "Adidas", "Puma"]),
        prop::option::of(prop::sample::select(vec!["Red", "blue", "BLUE"])),
    )
        .prop_map(move |(name, price, brand, color)| {
            let mut product = Product::new(id, name, price as f64).with_brand(brand);
            product.color = color.map(String::from);
            product
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    (0usize..30).prop_flat_map(|len| {
        (0..len as u64).map(arb_product).collect::<Vec<_>>()
    })
}

fn ids(products: &[&Product]) -> Vec<u64> {
    products.iter().map(|p| p.id.get()).collect()
}

fn sorted_ids(products: &[&Product]) -> Vec<u64> {
    let mut ids = ids(products);
    ids.sort_unstable();
    ids
}

proptest! {
    #[test]
    fn quick_sort_is_idempotent(values in prop::collection::vec(-50i32..50, 0..60)) {
        let once = quick_sort(&values, |a, b| a.cmp(b));
        let twice = quick_sort(&once, |a, b| a.cmp(b));
        prop_assert_eq!(&once, &twice);

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(once, expected);
    }

    #[test]
    fn product_sort_is_a_permutation(catalog in arb_catalog(), desc in any::<bool>()) {
        let refs: Vec<&Product> = catalog.iter().collect();
        let key = SortKey::parse(if desc { "price_desc" } else { "price_asc" }).unwrap();

        let once = sort_products(&refs, &key);
        let twice = sort_products(&once, &key);

        prop_assert_eq!(sorted_ids(&once), sorted_ids(&refs));
        let once_prices: Vec<f64> = once.iter().map(|p| p.price).collect();
        let twice_prices: Vec<f64> = twice.iter().map(|p| p.price).collect();
        prop_assert_eq!(&once_prices, &twice_prices);
        for pair in once_prices.windows(2) {
            if desc {
                prop_assert!(pair[0] >= pair[1]);
            } else {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }

    #[test]
    fn price_range_is_sound_and_complete(catalog in arb_catalog(), a in 0u32..45, b in 0u32..45) {
        let (min, max) = (a.min(b) as f64, a.max(b) as f64);
        let refs: Vec<&Product> = catalog.iter().collect();
        let result = filter_price_range(&refs, PriceBounds::new(Some(min), Some(max)));

        for product in &result {
            prop_assert!(min <= product.price && product.price <= max);
        }
        let expected: Vec<&Product> = refs
            .iter()
            .copied()
            .filter(|p| min <= p.price && p.price <= max)
            .collect();
        prop_assert_eq!(sorted_ids(&result), sorted_ids(&expected));
    }

    #[test]
    fn inverted_price_range_is_empty(catalog in arb_catalog(), min in 1u32..45, gap in 1u32..10) {
        let refs: Vec<&Product> = catalog.iter().collect();
        let max = min.saturating_sub(gap) as f64;
        let bounds = PriceBounds::new(Some(min as f64), Some(max));
        prop_assert!(filter_price_range(&refs, bounds).is_empty());
    }

    #[test]
    fn attribute_filter_ignores_case(catalog in arb_catalog()) {
        let refs: Vec<&Product> = catalog.iter().collect();
        let upper = filter_by_attribute(&refs, Attribute::Brand, "Nike");
        let lower = filter_by_attribute(&refs, Attribute::Brand, "nike");
        prop_assert_eq!(ids(&upper), ids(&lower));

        let colors = filter_by_attribute(&refs, Attribute::Color, "Blue");
        for product in &colors {
            prop_assert_eq!(product.color.as_deref().map(str::to_lowercase), Some("blue".to_string()));
        }
    }

    #[test]
    fn first_name_word_is_found(catalog in arb_catalog()) {
        for product in &catalog {
            let first_word = product.name.split_whitespace().next().unwrap_or_default();
            let criteria = FilterCriteria::new().with_search_term(first_word);
            let found = apply_filters(&catalog, &criteria, &SearchOptions::default());
            prop_assert!(found.iter().any(|p| p.id == product.id));
        }
    }

    #[test]
    fn snapshot_agrees_with_pipeline(
        catalog in arb_catalog(),
        min in prop::option::of(0u32..40),
        max in prop::option::of(0u32..40),
        brand in prop::option::of(prop::sample::select(vec!["nike", "ADIDAS", "reebok"])),
    ) {
        let criteria = FilterCriteria {
            min_price: min.map(f64::from),
            max_price: max.map(f64::from),
            brand: brand.map(String::from),
            ..FilterCriteria::default()
        };
        let options = SearchOptions::default();
        let snapshot = CatalogSnapshot::new(catalog.clone());

        let direct = apply_filters(&catalog, &criteria, &options);
        let cached = snapshot.query(&criteria, &options);
        prop_assert_eq!(ids(&direct), ids(&cached));
    }

    #[test]
    fn query_string_round_trips(
        brand in "[A-Za-z0-9][A-Za-z0-9 &=+%]{0,8}[A-Za-z0-9]",
        term in "[a-z]{1,8}",
        min in 0.0f64..1000.0,
        available in prop::option::of(any::<bool>()),
    ) {
        let mut criteria = FilterCriteria::new()
            .with_brand(brand)
            .with_search_term(term)
            .with_min_price(min)
            .with_sort(SortKey::parse("createdAt_desc").unwrap());
        criteria.available = available;

        let parsed = FilterCriteria::from_query_string(&criteria.to_query_string());
        prop_assert_eq!(parsed, criteria);
    }
}
