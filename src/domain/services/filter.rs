//! Catalog filtering and search suggestions

use std::collections::HashSet;
use crate::domain::aggregates::Product;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";
/// Shortest query that produces suggestions.
pub const MIN_SUGGESTION_QUERY: usize = 2;
pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub search_term: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self { Self::default() }
    pub fn with_category(mut self, category: impl Into<String>) -> Self { self.category = Some(category.into()); self }
    pub fn with_search(mut self, term: impl Into<String>) -> Self { self.search_term = Some(term.into()); self }

    /// Category to restrict to, ignoring the "all"/"null" sentinels.
    pub fn active_category(&self) -> Option<&str> {
        let category = self.category.as_deref()?.trim();
        if category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES) || category.eq_ignore_ascii_case("null") {
            return None;
        }
        Some(category)
    }

    /// Trimmed search term, if any is left after trimming.
    pub fn active_search(&self) -> Option<&str> {
        self.search_term.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn is_active(&self) -> bool { self.active_category().is_some() || self.active_search().is_some() }
}

/// Narrows `catalog` to the products matching `criteria`, keeping catalog order.
///
/// Search runs first (title, description or category contains the term), then
/// the category restriction, so the two combine as an AND.
pub fn filter_products(catalog: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let needle = criteria.active_search().map(str::to_lowercase);
    let category = criteria.active_category();

    catalog
        .iter()
        .filter(|p| needle.as_deref().map_or(true, |n| p.matches_term(n)))
        .filter(|p| category.map_or(true, |c| p.in_category(c)))
        .cloned()
        .collect()
}

/// Autocomplete suggestions for a partial query: matching titles, matching
/// categories and title words starting with the query (longer than two
/// characters). Unique, in discovery order, at most [`MAX_SUGGESTIONS`].
pub fn suggestions(catalog: &[Product], query: &str) -> Vec<String> {
    if query.chars().count() < MIN_SUGGESTION_QUERY {
        return vec![];
    }
    let needle = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let mut push = |candidate: &str| {
        if out.len() < MAX_SUGGESTIONS && seen.insert(candidate.to_string()) {
            out.push(candidate.to_string());
        }
    };

    for product in catalog {
        if product.title().to_lowercase().contains(&needle) {
            push(product.title());
        }
        if product.category().to_lowercase().contains(&needle) {
            push(product.category());
        }
        for word in product.title().split(' ') {
            if word.chars().count() > 2 && word.to_lowercase().starts_with(&needle) {
                push(word);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1u64, "Samsung Galaxy Phone", Decimal::new(500, 0), "electronics").with_description("Android handset"),
            Product::new(2u64, "Cotton Jacket", Decimal::new(55, 0), "men's clothing").with_description("Great for a phone call outdoors"),
            Product::new(3u64, "SanDisk SSD", Decimal::new(109, 0), "Electronics").with_description("Fast storage"),
            Product::new(4u64, "Gold Ring", Decimal::new(168, 0), "jewelery").with_description("Solid gold"),
            Product::new(5u64, "Phone Stand", Decimal::new(12, 0), "electronics").with_description("Aluminium"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> { products.iter().map(|p| p.id().value()).collect() }

    #[test]
    fn test_no_criteria_returns_full_catalog() {
        let c = catalog();
        assert_eq!(filter_products(&c, &FilterCriteria::new()), c);
        assert_eq!(filter_products(&c, &FilterCriteria::new().with_category("all").with_search("   ")), c);
        assert_eq!(filter_products(&c, &FilterCriteria::new().with_category("null")), c);
    }

    #[test]
    fn test_category_is_case_insensitive_and_ordered() {
        let out = filter_products(&catalog(), &FilterCriteria::new().with_category("electronics"));
        assert_eq!(ids(&out), vec![1, 3, 5]);
    }

    #[test]
    fn test_search_covers_title_description_category() {
        let out = filter_products(&catalog(), &FilterCriteria::new().with_search("PHONE"));
        assert_eq!(ids(&out), vec![1, 2, 5]);
        let out = filter_products(&catalog(), &FilterCriteria::new().with_search("jewel"));
        assert_eq!(ids(&out), vec![4]);
    }

    #[test]
    fn test_search_and_category_combine() {
        let criteria = FilterCriteria::new().with_category("Electronics").with_search(" phone ");
        assert_eq!(ids(&filter_products(&catalog(), &criteria)), vec![1, 5]);
    }

    #[test]
    fn test_single_char_search_still_filters() {
        let out = filter_products(&catalog(), &FilterCriteria::new().with_search("z"));
        assert!(out.is_empty());
        assert!(suggestions(&catalog(), "g").is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let c = catalog();
        let _ = filter_products(&c, &FilterCriteria::new().with_search("ring"));
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_suggestions_discovery_order() {
        let out = suggestions(&catalog(), "ph");
        assert_eq!(out, vec!["Samsung Galaxy Phone", "Phone", "Phone Stand"]);
        let out = suggestions(&catalog(), "elec");
        assert_eq!(out, vec!["electronics", "Electronics"]);
    }

    #[test]
    fn test_suggestions_capped() {
        let many: Vec<Product> = (0..20u64)
            .map(|i| Product::new(i, format!("Widget Model{i}"), Decimal::ONE, "tools"))
            .collect();
        let out = suggestions(&many, "wid");
        assert_eq!(out.len(), MAX_SUGGESTIONS);
        assert_eq!(out[0], "Widget Model0");
        assert_eq!(out[1], "Widget");
    }

    #[test]
    fn test_short_words_not_suggested() {
        let karts = vec![
            Product::new(1u64, "Go Kart", Decimal::new(250, 0), "toys"),
            Product::new(2u64, "Go Kart", Decimal::new(260, 0), "toys"),
        ];
        assert_eq!(suggestions(&karts, "go"), vec!["Go Kart"]);
        assert_eq!(suggestions(&karts, "ka"), vec!["Go Kart", "Kart"]);
    }
}
