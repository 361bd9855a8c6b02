//! Query command: filter, search, sort and page a catalog.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use turbo_catalog::catalog::{Attribute, Product};
use turbo_catalog::search::{Facet, FilterCriteria, SearchResults};

use super::QueryArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

#[derive(Serialize)]
struct QueryReport<'a> {
    /// Address-bar form of the criteria.
    query_string: String,
    criteria: &'a FilterCriteria,
    #[serde(flatten)]
    results: SearchResults<&'a Product>,
}

/// Run the query command.
pub fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_catalog(args.catalog.as_deref())?;
    let criteria = args.to_criteria(&ctx.config);
    let per_page = args.per_page.unwrap_or(ctx.config.query.page_size);

    let started = Instant::now();
    let matches = snapshot.query(&criteria, &ctx.config.search);
    let elapsed = started.elapsed().as_micros() as u64;

    let facets = if args.facets {
        vec![
            Facet::terms_for(&matches, Attribute::Brand, criteria.brand()),
            Facet::terms_for(&matches, Attribute::Category, criteria.category()),
        ]
    } else {
        Vec::new()
    };

    let results = SearchResults::paginate(matches, args.page, per_page)
        .with_query_time(elapsed)
        .with_facets(facets);

    if ctx.output.is_json() {
        ctx.output.json(&QueryReport {
            query_string: criteria.to_query_string(),
            criteria: &criteria,
            results,
        });
        return Ok(());
    }

    print_results(&criteria, &results, ctx);
    Ok(())
}

fn print_results(criteria: &FilterCriteria, results: &SearchResults<&Product>, ctx: &Context) {
    let pagination = &results.pagination;
    ctx.output.header(&format!(
        "{} products ({})",
        pagination.total,
        criteria
            .sort_by
            .as_ref()
            .map(|key| key.display_name())
            .unwrap_or("Unsorted")
    ));
    ctx.output.kv("query", &format!("?{}", criteria.to_query_string()));
    ctx.output.debug(&format!("query took {}us", results.query_time_us));

    if results.is_empty() {
        if pagination.total > 0 {
            ctx.output.warn(&format!(
                "Page {} is past the last page ({})",
                pagination.page, pagination.total_pages
            ));
        } else {
            ctx.output.info("No products match these filters.");
        }
        return;
    }

    let name_width = ctx.output.term_width().saturating_sub(60).clamp(12, 40);
    let widths = [6, name_width, 12, 12, 16, 14];
    println!();
    ctx.output
        .table_header(&["ID", "NAME", "BRAND", "CATEGORY", "PRICE", "STOCK"], &widths);

    for product in &results.items {
        let id = product.id.to_string();
        let price = if product.discount() > 0.0 {
            format!(
                "{} (-{}%)",
                format_price(product.discounted_price()),
                product.discount()
            )
        } else {
            format_price(product.price)
        };
        let stock = stock_badge(product.available, product.stock);
        ctx.output.table_row(
            &[
                id.as_str(),
                product.name.as_str(),
                product.brand.as_deref().unwrap_or("-"),
                product.category.as_deref().unwrap_or("-"),
                price.as_str(),
                stock.as_str(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));
    if pagination.total_pages > 1 {
        let pages: Vec<String> = pagination
            .page_numbers(5)
            .iter()
            .map(|&n| {
                if n == pagination.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.kv("pages", &pages.join(" "));
    }

    for facet in &results.facets {
        ctx.output.header(&format!("By {}", facet.field));
        for value in &facet.values {
            let marker = if value.selected { " *" } else { "" };
            ctx.output
                .list_item(&format!("{} ({}){}", value.value, value.count, marker));
        }
    }
}
