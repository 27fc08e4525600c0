//! Minimum rating filter.

use super::Filter;
use crate::hub::Product;

/// Filters products by minimum star rating.
pub struct RatingFilter {
    min_stars: f64,
}

impl RatingFilter {
    /// Creates a new rating filter with minimum stars.
    pub fn new(min_stars: f64) -> Self {
        Self { min_stars }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, product: &Product) -> bool {
        product.rating >= self.min_stars
    }

    fn description(&self) -> String {
        format!("Rating: >= {:.1} stars", self.min_stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(rating: f64) -> Product {
        Product {
            id: "TEST".to_string(),
            name: "Test".to_string(),
            image_url: None,
            price: 1.0,
            origin_country: "Nowhere".to_string(),
            rating,
            available_quantity: 1,
            category: None,
            description: None,
            created_at: None,
            user_email: None,
        }
    }

    #[test]
    fn test_rating_filter() {
        let filter = RatingFilter::new(4.0);

        assert!(!filter.matches(&make_product(3.5)));
        assert!(filter.matches(&make_product(4.0)));
        assert!(filter.matches(&make_product(4.5)));
        assert!(filter.matches(&make_product(5.0)));
    }

    #[test]
    fn test_unrated_products_fail_positive_minimum() {
        let filter = RatingFilter::new(1.0);
        assert!(!filter.matches(&make_product(0.0)));
    }

    #[test]
    fn test_description() {
        assert_eq!(RatingFilter::new(4.0).description(), "Rating: >= 4.0 stars");
        assert_eq!(RatingFilter::new(3.5).description(), "Rating: >= 3.5 stars");
    }

    #[test]
    fn test_zero_rating() {
        let filter = RatingFilter::new(0.0);
        assert!(filter.matches(&make_product(0.0)));
        assert!(filter.matches(&make_product(5.0)));
    }
}
