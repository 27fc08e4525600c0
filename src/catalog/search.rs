//! Product name search.

use super::Filter;
use crate::hub::Product;

/// Keeps products whose name contains the search text, ignoring case.
pub struct NameFilter {
    text: String,
    needle: String,
}

impl NameFilter {
    /// Creates a new name filter.
    ///
    /// The text is matched as typed; only the decision to filter at all looks at trimmed text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let needle = text.to_lowercase();
        Self { text, needle }
    }
}

impl Filter for NameFilter {
    fn matches(&self, product: &Product) -> bool {
        product.name.to_lowercase().contains(&self.needle)
    }

    fn description(&self) -> String {
        format!("Name contains: \"{}\"", self.text)
    }
}
