//! Category filter.

use super::Filter;
use crate::hub::Product;

/// Keeps products in one category, compared without regard to case.
pub struct CategoryFilter {
    label: String,
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        let label = category.into();
        let category = label.to_lowercase();
        Self { label, category }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        // Unclassified products never match a chosen category
        product.category.as_deref().is_some_and(|c| c.to_lowercase() == self.category)
    }

    fn description(&self) -> String {
        format!("Category: {}", self.label)
    }
}
