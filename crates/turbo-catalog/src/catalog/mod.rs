//! Product catalog module.
//!
//! Contains the product model and the client-held catalog snapshot.

mod product;
mod snapshot;

pub use product::{Attribute, Product};
pub use snapshot::{CatalogSnapshot, ProductPage};
