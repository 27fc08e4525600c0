//! Catalog view state: the fetched list, the user's criteria and the current page.

use super::{apply_filters, apply_sort, paginate, CriteriaField, FilterCriteria, PAGE_SIZE};
use crate::hub::Product;
use tracing::debug;

/// Derived catalog state for one browsing session.
///
/// The visible page is always a function of the full list, the criteria and the page number.
/// Criteria changes re-run filter and sort and go back to page 1; page changes only re-slice.
#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<Product>,
    criteria: FilterCriteria,
    sorted: Vec<Product>,
    page: usize,
}

impl CatalogView {
    /// Creates a view over the full product list with no criteria applied.
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_criteria(products, FilterCriteria::default())
    }

    /// Creates a view with initial criteria.
    pub fn with_criteria(products: Vec<Product>, criteria: FilterCriteria) -> Self {
        let mut view = Self { products, criteria, sorted: Vec::new(), page: 1 };
        view.recompute();
        view
    }

    /// Replaces the source list, e.g. after a refetch.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.recompute();
    }

    /// Updates one criteria field from form text.
    pub fn set_field(&mut self, field: CriteriaField, raw: &str) {
        self.criteria = self.criteria.with_field(field, raw);
        self.recompute();
    }

    /// Replaces all criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Resets every criteria field to its default.
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Moves to a page, bounded to `[1, total_pages]`. Returns the page now shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    /// Steps forward one page, stopping at the last.
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    /// Steps back one page, stopping at the first.
    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Products on the current page, in sorted order.
    pub fn visible(&self) -> &[Product] {
        paginate(&self.sorted, self.page, PAGE_SIZE).0
    }

    /// Page count, at least 1.
    pub fn total_pages(&self) -> usize {
        paginate(&self.sorted, self.page, PAGE_SIZE).1
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Number of products matching the criteria across all pages.
    pub fn result_count(&self) -> usize {
        self.sorted.len()
    }

    /// Size of the unfiltered catalog.
    pub fn catalog_size(&self) -> usize {
        self.products.len()
    }

    fn recompute(&mut self) {
        let filtered = apply_filters(&self.products, &self.criteria);
        self.sorted = apply_sort(filtered, self.criteria.sort_key);
        self.page = 1;
        debug!(
            "Catalog recomputed: {} of {} products match",
            self.sorted.len(),
            self.products.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortKey;

    fn make_product(i: usize) -> Product {
        Product {
            id: format!("p{}", i),
            name: if i % 2 == 0 { format!("Coffee Lot {}", i) } else { format!("Copper Coil {}", i) },
            image_url: None,
            price: i as f64,
            origin_country: if i % 2 == 0 { "Brazil".to_string() } else { "Chile".to_string() },
            rating: (i % 5) as f64,
            available_quantity: 1,
            category: None,
            description: None,
            created_at: None,
            user_email: None,
        }
    }

    fn products(n: usize) -> Vec<Product> {
        (1..=n).map(make_product).collect()
    }

    #[test]
    fn test_initial_state() {
        let view = CatalogView::new(products(25));
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.visible().len(), 12);
        assert_eq!(view.result_count(), 25);
        assert_eq!(view.catalog_size(), 25);
        assert!(view.criteria().is_default());
    }

    #[test]
    fn test_empty_catalog() {
        let view = CatalogView::new(Vec::new());
        assert!(view.visible().is_empty());
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_set_page_is_bounded() {
        let mut view = CatalogView::new(products(25));
        assert_eq!(view.set_page(3), 3);
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.visible()[0].id, "p25");

        assert_eq!(view.set_page(10), 3);
        assert_eq!(view.set_page(0), 1);
    }

    #[test]
    fn test_next_and_prev() {
        let mut view = CatalogView::new(products(25));
        assert_eq!(view.prev_page(), 1);
        assert_eq!(view.next_page(), 2);
        assert_eq!(view.next_page(), 3);
        assert_eq!(view.next_page(), 3);
        assert_eq!(view.prev_page(), 2);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = CatalogView::new(products(25));
        view.set_page(3);

        view.set_field(CriteriaField::Country, "brazil");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.result_count(), 12);
        assert_eq!(view.total_pages(), 1);
        assert!(view.visible().iter().all(|p| p.origin_country == "Brazil"));
    }

    #[test]
    fn test_every_field_change_resets_page() {
        for field in CriteriaField::all() {
            let mut view = CatalogView::new(products(40));
            view.set_page(3);
            view.set_field(*field, "");
            assert_eq!(view.current_page(), 1, "field {} did not reset page", field);
        }
    }

    #[test]
    fn test_sort_field() {
        let mut view = CatalogView::new(products(25));
        view.set_field(CriteriaField::Sort, "price-desc");
        assert_eq!(view.criteria().sort_key, SortKey::PriceDesc);
        assert_eq!(view.visible()[0].id, "p25");
        assert_eq!(view.visible()[11].id, "p14");
    }

    #[test]
    fn test_page_change_keeps_sorted_order() {
        let mut view = CatalogView::new(products(25));
        view.set_field(CriteriaField::Sort, "price-desc");
        view.set_page(2);
        assert_eq!(view.visible()[0].id, "p13");
        assert_eq!(view.criteria().sort_key, SortKey::PriceDesc);
    }

    #[test]
    fn test_malformed_numeric_input_is_ignored() {
        let mut view = CatalogView::new(products(25));
        view.set_field(CriteriaField::MinPrice, "lots");
        assert!(view.criteria().min_price.is_none());
        assert_eq!(view.result_count(), 25);
    }

    #[test]
    fn test_clear_filters() {
        let mut view = CatalogView::new(products(25));
        view.set_field(CriteriaField::Search, "coffee");
        view.set_field(CriteriaField::MinRating, "3");
        assert!(view.result_count() < 25);

        view.set_page(2);
        view.clear_filters();
        assert!(view.criteria().is_default());
        assert_eq!(view.result_count(), 25);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_set_products_recomputes() {
        let mut view = CatalogView::new(products(5));
        view.set_field(CriteriaField::MinPrice, "20");
        assert_eq!(view.result_count(), 0);
        assert!(view.visible().is_empty());
        assert_eq!(view.total_pages(), 1);

        view.set_products(products(30));
        assert_eq!(view.result_count(), 11);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_with_criteria() {
        let criteria = FilterCriteria { search_text: "COPPER".to_string(), ..Default::default() };
        let view = CatalogView::with_criteria(products(25), criteria);
        assert_eq!(view.result_count(), 13);
        assert!(view.visible().iter().all(|p| p.name.starts_with("Copper")));
    }
}
