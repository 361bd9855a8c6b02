//! Catalog error types.

use thiserror::Error;

/// Errors raised while assembling a catalog snapshot.
///
/// Queries themselves never fail: bad criteria degrade to "no match" or
/// "no constraint".
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product or page JSON could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A product or page violates a data model constraint.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
