//! Product types.

use crate::ids::{ProductId, SellerId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product as listed by the storefront backend.
///
/// Products are read-only snapshots: the query engine only ever borrows
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category name (e.g. "Apparel").
    #[serde(default)]
    pub category: Option<String>,
    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,
    /// Color, when the product has one.
    #[serde(default)]
    pub color: Option<String>,
    /// Size label (e.g. "M", "42").
    #[serde(default)]
    pub size: Option<String>,
    /// Unit price, never negative.
    pub price: f64,
    /// Discount in percent (0-100).
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Whether the seller lists the product as purchasable.
    #[serde(default = "default_available")]
    pub available: bool,
    /// Creation time as reported by the backend (no zone).
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Owning seller.
    #[serde(default)]
    pub seller_id: Option<SellerId>,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Create a product with the required fields; everything else is empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: None,
            brand: None,
            color: None,
            size: None,
            price,
            discount_percentage: None,
            stock: 0,
            available: true,
            created_at: None,
            image_url: None,
            seller_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Value of a filterable attribute, if the product has one.
    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Brand => self.brand.as_deref(),
            Attribute::Category => self.category.as_deref(),
            Attribute::Color => self.color.as_deref(),
            Attribute::Size => self.size.as_deref(),
        }
    }

    /// Check if the product can be bought right now.
    pub fn is_in_stock(&self) -> bool {
        self.available && self.stock > 0
    }

    /// Discount in percent, clamped to 0-100. Missing means 0.
    pub fn discount(&self) -> f64 {
        self.discount_percentage
            .filter(|d| d.is_finite())
            .map(|d| d.clamp(0.0, 100.0))
            .unwrap_or(0.0)
    }

    /// Price after discount, rounded to cents.
    pub fn discounted_price(&self) -> f64 {
        let discounted = self.price * (100.0 - self.discount()) / 100.0;
        (discounted * 100.0).round() / 100.0
    }

    /// Text fields indexed for prefix search: name, description, brand, category.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            Some(self.description.as_str()),
            self.brand.as_deref(),
            self.category.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// A product attribute usable as an exact-match filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Brand,
    Category,
    Color,
    Size,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Brand => "brand",
            Attribute::Category => "category",
            Attribute::Color => "color",
            Attribute::Size => "size",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "brand" => Some(Attribute::Brand),
            "category" => Some(Attribute::Category),
            "color" => Some(Attribute::Color),
            "size" => Some(Attribute::Size),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
