//! Search tuning options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How product text is split into words for the prefix trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    /// Every whitespace-separated word of a field, plus the whole field.
    Words,
    /// Each field as a single word, so matches start at the field start.
    #[default]
    Fields,
}

impl TokenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenMode::Words => "words",
            TokenMode::Fields => "fields",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "words" => Some(TokenMode::Words),
            "fields" => Some(TokenMode::Fields),
            _ => None,
        }
    }
}

impl fmt::Display for TokenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options that change how queries are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Trie tokenization.
    #[serde(default)]
    pub token_mode: TokenMode,
}

impl SearchOptions {
    pub fn with_token_mode(mut self, mode: TokenMode) -> Self {
        self.token_mode = mode;
        self
    }
}
