// Derived view - which products end up on screen, and in what order
use tracing::debug;

use crate::{filters::FilterConfig, models::Product, models::SortBy};

/// Compose search, category filter and price sort over the catalog
///
/// Always applied in that order: title search (case-insensitive substring),
/// exact category match, then a stable price sort. The input is never
/// touched; products with equal prices keep their catalog order.
pub fn compute_view(catalog: &[Product], filter: &FilterConfig) -> Vec<Product> {
    let query = filter.search_query().to_lowercase();
    let category = filter.selected_category();

    let mut view: Vec<Product> = catalog
        .iter()
        .filter(|product| query.is_empty() || product.title.to_lowercase().contains(&query))
        .filter(|product| category.is_empty() || product.category == category)
        .cloned()
        .collect();

    // sort_by is stable, which is exactly what ties need
    match filter.sort_by() {
        SortBy::None => {}
        SortBy::PriceAscending => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::PriceDescending => view.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    view
}

/// Memoized [`compute_view`]
///
/// Keyed on the catalog revision plus the filter value, so typing the same
/// query twice or re-rendering without changes doesn't refilter.
#[derive(Debug, Default)]
pub struct ViewSelector {
    key: Option<(u64, FilterConfig)>,
    products: Vec<Product>,
    recomputations: usize,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the view for these inputs, recomputing only when they changed
    pub fn select(&mut self, catalog: &[Product], revision: u64, filter: &FilterConfig) -> &[Product] {
        let fresh = matches!(&self.key, Some((rev, cached)) if *rev == revision && cached == filter);

        if !fresh {
            self.products = compute_view(catalog, filter);
            self.key = Some((revision, filter.clone()));
            self.recomputations += 1;
            debug!(
                "Recomputed view: {} of {} products visible",
                self.products.len(),
                catalog.len()
            );
        }

        &self.products
    }

    /// Last computed view
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Forget the cached key so the next select recomputes
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterAction;

    fn product(id: u64, title: &str, category: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            category: category.to_string(),
            image: format!("https://example.com/{}.jpg", id),
            description: String::new(),
            rating: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Smart Phone", "electronics", 599.99),
            product(2, "Laptop", "electronics", 999.99),
            product(3, "Shirt", "clothing", 19.99),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_filter_keeps_catalog_order() {
        let view = compute_view(&catalog(), &FilterConfig::default());
        assert_eq!(view, catalog());
    }

    #[test]
    fn test_empty_catalog() {
        let filter = FilterConfig::new().reduce(FilterAction::SetSearchQuery("phone".into()));
        assert!(compute_view(&[], &filter).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let items = vec![product(1, "Laptop", "electronics", 999.99)];

        let filter = FilterConfig::new().reduce(FilterAction::SetSearchQuery("LAP".into()));
        assert_eq!(ids(&compute_view(&items, &filter)), vec![1]);

        let filter = FilterConfig::new().reduce(FilterAction::SetSearchQuery("zzz".into()));
        assert!(compute_view(&items, &filter).is_empty());
    }

    #[test]
    fn test_search_ignores_category_and_description() {
        let mut items = catalog();
        items[2].description = "Pairs well with a laptop bag".to_string();

        let filter = FilterConfig::new().reduce(FilterAction::SetSearchQuery("electronics".into()));
        assert!(compute_view(&items, &filter).is_empty());

        let filter = FilterConfig::new().reduce(FilterAction::SetSearchQuery("laptop".into()));
        assert_eq!(ids(&compute_view(&items, &filter)), vec![2]);
    }

    #[test]
    fn test_category_is_exact_match() {
        let filter =
            FilterConfig::new().reduce(FilterAction::SetSelectedCategory("electronics".into()));
        let view = compute_view(&catalog(), &filter);
        assert_eq!(ids(&view), vec![1, 2]);
        assert!(view.iter().all(|p| p.category == "electronics"));

        // No case folding and no prefix matching
        for near_miss in ["Electronics", "electronic", "electronics "] {
            let filter =
                FilterConfig::new().reduce(FilterAction::SetSelectedCategory(near_miss.into()));
            assert!(compute_view(&catalog(), &filter).is_empty(), "{}", near_miss);
        }
    }

    #[test]
    fn test_sort_price_ascending_and_descending() {
        let filter = FilterConfig::new().reduce(FilterAction::SetSortBy(SortBy::PriceAscending));
        assert_eq!(ids(&compute_view(&catalog(), &filter)), vec![3, 1, 2]);

        let filter = FilterConfig::new().reduce(FilterAction::SetSortBy(SortBy::PriceDescending));
        assert_eq!(ids(&compute_view(&catalog(), &filter)), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let items = vec![
            product(10, "A", "x", 5.0),
            product(11, "B", "x", 1.0),
            product(12, "C", "x", 5.0),
            product(13, "D", "x", 1.0),
        ];

        let filter = FilterConfig::new().reduce(FilterAction::SetSortBy(SortBy::PriceAscending));
        assert_eq!(ids(&compute_view(&items, &filter)), vec![11, 13, 10, 12]);

        let filter = FilterConfig::new().reduce(FilterAction::SetSortBy(SortBy::PriceDescending));
        assert_eq!(ids(&compute_view(&items, &filter)), vec![10, 12, 11, 13]);
    }

    #[test]
    fn test_combined_category_and_sort() {
        let filter = FilterConfig::new()
            .reduce(FilterAction::SetSelectedCategory("electronics".into()))
            .reduce(FilterAction::SetSortBy(SortBy::PriceAscending));
        assert_eq!(ids(&compute_view(&catalog(), &filter)), vec![1, 2]);
    }

    #[test]
    fn test_combined_search_category_and_sort() {
        let filter = FilterConfig {
            search_query: "phone".to_string(),
            selected_category: "electronics".to_string(),
            sort_by: SortBy::PriceAscending,
        };
        let view = compute_view(&catalog(), &filter);
        assert_eq!(ids(&view), vec![1]);
        assert_eq!(view[0].title, "Smart Phone");
    }

    #[test]
    fn test_input_catalog_untouched() {
        let items = catalog();
        let filter = FilterConfig::new().reduce(FilterAction::SetSortBy(SortBy::PriceAscending));
        let _ = compute_view(&items, &filter);
        assert_eq!(items, catalog());
    }

    #[test]
    fn test_selector_reuses_cached_view() {
        let items = catalog();
        let filter = FilterConfig::default();
        let mut selector = ViewSelector::new();

        assert_eq!(selector.select(&items, 1, &filter).len(), 3);
        assert_eq!(selector.select(&items, 1, &filter).len(), 3);
        assert_eq!(selector.recomputations(), 1);
    }

    #[test]
    fn test_selector_recomputes_on_new_inputs() {
        let items = catalog();
        let mut selector = ViewSelector::new();
        let filter = FilterConfig::default();

        selector.select(&items, 1, &filter);

        let narrowed = filter.clone().reduce(FilterAction::SetSearchQuery("shirt".into()));
        assert_eq!(ids(selector.select(&items, 1, &narrowed)), vec![3]);
        assert_eq!(selector.recomputations(), 2);

        // New catalog revision with the same filter
        let fewer = items[..1].to_vec();
        assert!(selector.select(&fewer, 2, &narrowed).is_empty());
        assert_eq!(selector.recomputations(), 3);

        selector.invalidate();
        selector.select(&fewer, 2, &narrowed);
        assert_eq!(selector.recomputations(), 4);
    }

    #[test]
    fn test_selector_matches_compute_view() {
        let items = catalog();
        let mut selector = ViewSelector::new();

        for sort_by in SortBy::all() {
            let filter = FilterConfig::new().reduce(FilterAction::SetSortBy(sort_by));
            let memoized = selector.select(&items, 7, &filter).to_vec();
            assert_eq!(memoized, compute_view(&items, &filter));
            assert_eq!(selector.products(), memoized.as_slice());
        }
    }
}
