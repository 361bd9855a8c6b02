//! Filter criteria and sort keys, plus their URL query-string form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::PriceBounds;

/// Field a result list can be ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortField {
    Price,
    Name,
    CreatedAt,
    /// Anything else. Compares every product as equal.
    Unrecognized(String),
}

impl SortField {
    pub fn as_str(&self) -> &str {
        match self {
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::CreatedAt => "createdAt",
            SortField::Unrecognized(raw) => raw,
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "price" => SortField::Price,
            "name" => SortField::Name,
            "createdat" => SortField::CreatedAt,
            _ => SortField::Unrecognized(s.to_string()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A sort key in its wire form `<field>_<direction>`, e.g. `price_desc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse `<field>_<direction>`. Only `desc` means descending.
    ///
    /// Returns `None` for blank input. Unknown fields parse successfully
    /// and sort as a no-op.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let (field, direction) = match s.split_once('_') {
            Some((field, direction)) => (field, direction),
            None => (s, ""),
        };
        let direction = if direction.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Some(Self::new(SortField::parse(field), direction))
    }

    pub fn display_name(&self) -> &'static str {
        match (&self.field, self.direction) {
            (SortField::Price, SortDirection::Asc) => "Price: Low to High",
            (SortField::Price, SortDirection::Desc) => "Price: High to Low",
            (SortField::Name, SortDirection::Asc) => "Name: A-Z",
            (SortField::Name, SortDirection::Desc) => "Name: Z-A",
            (SortField::CreatedAt, SortDirection::Asc) => "Oldest",
            (SortField::CreatedAt, SortDirection::Desc) => "Newest",
            (SortField::Unrecognized(_), _) => "Unsorted",
        }
    }
}

impl Default for SortKey {
    /// Newest first, the storefront's listing order.
    fn default() -> Self {
        Self::new(SortField::CreatedAt, SortDirection::Desc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.field.as_str(), self.direction.as_str())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::parse(&s).unwrap_or_default()
    }
}

/// What the shopper asked for.
///
/// Every field is optional; blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Free text, matched as a word prefix.
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Minimum discount in percent.
    pub min_discount: Option<f64>,
    pub sort_by: Option<SortKey>,
    /// `Some(true)` keeps available products only; `Some(false)` and `None`
    /// leave the candidates alone.
    pub available: Option<bool>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn with_max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn with_min_discount(mut self, percentage: f64) -> Self {
        self.min_discount = Some(percentage);
        self
    }

    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn search_term(&self) -> Option<&str> {
        non_blank(&self.search_term)
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    pub fn brand(&self) -> Option<&str> {
        non_blank(&self.brand)
    }

    pub fn color(&self) -> Option<&str> {
        non_blank(&self.color)
    }

    pub fn size(&self) -> Option<&str> {
        non_blank(&self.size)
    }

    /// Price bounds, or `None` when neither bound was given.
    pub fn price_bounds(&self) -> Option<PriceBounds> {
        if self.min_price.is_none() && self.max_price.is_none() {
            return None;
        }
        Some(PriceBounds::new(self.min_price, self.max_price))
    }

    /// Minimum discount when it actually constrains anything.
    pub fn min_discount(&self) -> Option<f64> {
        self.min_discount.filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Check if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.category().is_none()
            && self.brand().is_none()
            && self.color().is_none()
            && self.size().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_discount().is_none()
            && self.sort_by.is_none()
            && self.available.is_none()
    }

    /// Parse criteria from a URL query string such as
    /// `brand=nike&minPrice=10&sortBy=price_desc`.
    ///
    /// Unknown keys are ignored and unparsable numbers count as absent. A
    /// purely numeric `size` is a page size, not a product size.
    pub fn from_query_string(qs: &str) -> Self {
        let mut criteria = FilterCriteria::default();
        let qs = qs.strip_prefix('?').unwrap_or(qs);

        for pair in qs.split('&').filter(|p| !p.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = urlencoding_decode(parts.next().unwrap_or(""));

            match key {
                "searchTerm" => criteria.search_term = Some(value),
                "category" => criteria.category = Some(value),
                "brand" => criteria.brand = Some(value),
                "color" => criteria.color = Some(value),
                "size" => {
                    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                        criteria.size = Some(value);
                    }
                }
                "minPrice" => criteria.min_price = value.trim().parse().ok(),
                "maxPrice" => criteria.max_price = value.trim().parse().ok(),
                "minDiscount" => criteria.min_discount = value.trim().parse().ok(),
                "sortBy" => criteria.sort_by = SortKey::parse(&value),
                "available" => criteria.available = value.trim().parse().ok(),
                _ => {}
            }
        }

        criteria
    }

    /// Encode the criteria as a URL query string (without leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();

        if let Some(term) = self.search_term() {
            params.push(("searchTerm", term.to_string()));
        }
        if let Some(category) = self.category() {
            params.push(("category", category.to_string()));
        }
        if let Some(brand) = self.brand() {
            params.push(("brand", brand.to_string()));
        }
        if let Some(color) = self.color() {
            params.push(("color", color.to_string()));
        }
        if let Some(size) = self.size() {
            params.push(("size", size.to_string()));
        }
        if let Some(min) = self.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if let Some(discount) = self.min_discount() {
            params.push(("minDiscount", discount.to_string()));
        }
        if let Some(available) = self.available {
            params.push(("available", available.to_string()));
        }
        if let Some(sort) = &self.sort_by {
            params.push(("sortBy", sort.to_string()));
        }

        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding_encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn urlencoding_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();

    while let Some(b) = iter.next() {
        match b {
            b'%' => {
                let hex: Vec<u8> = iter.by_ref().take(2).collect();
                let decoded = std::str::from_utf8(&hex)
                    .ok()
                    .filter(|h| h.len() == 2 && h.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match decoded {
                    Some(byte) => bytes.push(byte),
                    // not an escape: keep the text as written
                    None => {
                        bytes.push(b'%');
                        bytes.extend(hex.iter().map(|&h| if h == b'+' { b' ' } else { h }));
                    }
                }
            }
            b'+' => bytes.push(b' '),
            _ => bytes.push(b),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

fn urlencoding_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char)
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{:02X}", b)),
        }
    }
    result
}
