//! Locale-aware name ordering.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

/// Compares product names the way a shopper reads them.
///
/// Uses the root (language-neutral) collation at default strength: accents
/// and case only break ties between otherwise equal letters, and lowercase
/// comes before uppercase. Build one per sort and reuse it for every
/// comparison.
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    pub fn new() -> Self {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| warn!(error = ?e, "root collation unavailable, using case-folded order"))
            .ok();
        Self { collator }
    }

    /// Three-way comparison of two names. Equal only for identical strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}
