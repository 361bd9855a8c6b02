//! Facets command: value counts and price summary for a filtered catalog.

use anyhow::Result;
use serde::Serialize;
use turbo_catalog::catalog::Attribute;
use turbo_catalog::search::{Facet, PriceStats};

use super::FacetsArgs;
use crate::context::Context;
use crate::output::format_price;

#[derive(Serialize)]
struct FacetReport {
    total: usize,
    facets: Vec<Facet>,
    price: Option<PriceStats>,
}

/// Run the facets command.
pub fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_catalog(args.catalog.as_deref())?;
    let criteria = args.filters.to_criteria();
    let matches = snapshot.query(&criteria, &ctx.config.search);

    let report = FacetReport {
        total: matches.len(),
        facets: [Attribute::Brand, Attribute::Category, Attribute::Color, Attribute::Size]
            .into_iter()
            .map(|attribute| {
                let selected = match attribute {
                    Attribute::Brand => criteria.brand(),
                    Attribute::Category => criteria.category(),
                    Attribute::Color => criteria.color(),
                    Attribute::Size => criteria.size(),
                };
                Facet::terms_for(&matches, attribute, selected)
            })
            .filter(|facet| !facet.values.is_empty())
            .collect(),
        price: PriceStats::from_products(&matches),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output
        .header(&format!("{} of {} products match", report.total, snapshot.len()));

    if let Some(price) = report.price {
        ctx.output.kv("lowest", &format_price(price.min));
        ctx.output.kv("highest", &format_price(price.max));
        ctx.output.kv("average", &format_price(price.mean));
    }

    for facet in &report.facets {
        ctx.output.header(&format!("By {}", facet.field));
        for value in &facet.values {
            let marker = if value.selected { " *" } else { "" };
            ctx.output
                .list_item(&format!("{} ({}){}", value.value, value.count, marker));
        }
    }

    Ok(())
}
