//! Prefix trie over product text.

use std::collections::HashMap;

use tracing::trace;

use crate::catalog::Product;
use crate::search::TokenMode;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Candidate indices passing through this node, ascending, no repeats.
    products: Vec<usize>,
}

/// Character trie mapping every word prefix to the products that have it.
///
/// Words come from the lower-cased name, description, brand and category:
/// each whole field, plus its inner words under [`TokenMode::Words`].
/// Built per query from the current candidate set and dropped afterwards.
#[derive(Debug, Clone)]
pub struct ProductTrie<'a> {
    root: TrieNode,
    candidates: Vec<&'a Product>,
}

impl<'a> ProductTrie<'a> {
    /// Index every candidate.
    pub fn build(candidates: &[&'a Product], mode: TokenMode) -> Self {
        let mut trie = Self {
            root: TrieNode::default(),
            candidates: candidates.to_vec(),
        };

        for (index, product) in candidates.iter().enumerate() {
            for field in product.searchable_fields() {
                let field = field.to_lowercase();
                trie.insert(&field, index);
                if mode == TokenMode::Words {
                    for word in field.split_whitespace() {
                        trie.insert(word, index);
                    }
                }
            }
        }

        trace!(candidates = candidates.len(), "built product trie");
        trie
    }

    fn insert(&mut self, word: &str, index: usize) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
            // Candidates are inserted in ascending order, so a repeat can
            // only be the most recent entry.
            if node.products.last() != Some(&index) {
                node.products.push(index);
            }
        }
    }

    /// Products with an indexed word starting with `prefix`, ignoring case.
    ///
    /// Results keep candidate order. An empty prefix matches every candidate.
    pub fn search(&self, prefix: &str) -> Vec<&'a Product> {
        if prefix.is_empty() {
            return self.candidates.clone();
        }

        let mut node = &self.root;
        for ch in prefix.to_lowercase().chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        node.products.iter().map(|&i| self.candidates[i]).collect()
    }

    /// Number of indexed candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Keep the candidates with a word starting with `prefix`.
pub fn prefix_search<'a>(candidates: &[&'a Product], prefix: &str, mode: TokenMode) -> Vec<&'a Product> {
    ProductTrie::build(candidates, mode).search(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Blue Shirt", 20.0)
                .with_description("Cotton tee")
                .with_brand("Nike")
                .with_category("Apparel"),
            Product::new(2, "Red Shoes", 50.0)
                .with_description("Running shoes")
                .with_brand("Nike")
                .with_category("Footwear"),
            Product::new(3, "Green Hat", 15.0)
                .with_description("Wool hat")
                .with_brand("Adidas")
                .with_category("Apparel"),
        ]
    }

    fn ids(result: &[&Product]) -> Vec<u64> {
        result.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_first_word_of_name_matches() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        let trie = ProductTrie::build(&refs, TokenMode::Words);
        assert_eq!(ids(&trie.search("blue")), vec![1]);
        assert_eq!(ids(&trie.search("BLU")), vec![1]);
    }

    #[test]
    fn test_matches_deduplicated_and_ordered() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        let trie = ProductTrie::build(&refs, TokenMode::Words);
        // "nike" is the brand of two products; product 2 also has "shoes" twice
        assert_eq!(ids(&trie.search("nik")), vec![1, 2]);
        assert_eq!(ids(&trie.search("sho")), vec![2]);
        assert_eq!(ids(&trie.search("a")), vec![1, 3]);
    }

    #[test]
    fn test_unknown_prefix_is_empty() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        assert!(prefix_search(&refs, "zebra", TokenMode::Words).is_empty());
    }

    #[test]
    fn test_inner_words_depend_on_mode() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        assert_eq!(ids(&prefix_search(&refs, "shirt", TokenMode::Words)), vec![1]);
        assert!(prefix_search(&refs, "shirt", TokenMode::Fields).is_empty());
        // substrings are never matched
        assert!(prefix_search(&refs, "hirt", TokenMode::Words).is_empty());
    }

    #[test]
    fn test_multi_word_prefix() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        assert_eq!(ids(&prefix_search(&refs, "blue sh", TokenMode::Words)), vec![1]);
        assert_eq!(ids(&prefix_search(&refs, "blue sh", TokenMode::Fields)), vec![1]);
    }

    #[test]
    fn test_empty_prefix_returns_all_candidates() {
        let catalog = catalog();
        let refs: Vec<&Product> = catalog.iter().collect();
        assert_eq!(ids(&prefix_search(&refs, "", TokenMode::Words)), vec![1, 2, 3]);
    }
}
