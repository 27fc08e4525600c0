//! Origin country filter.

use super::Filter;
use crate::hub::Product;

/// Keeps products whose origin country contains the given text, ignoring case.
pub struct CountryFilter {
    text: String,
    needle: String,
}

impl CountryFilter {
    pub fn new(country: impl Into<String>) -> Self {
        let text = country.into();
        let needle = text.to_lowercase();
        Self { text, needle }
    }
}

impl Filter for CountryFilter {
    fn matches(&self, product: &Product) -> bool {
        product.origin_country.to_lowercase().contains(&self.needle)
    }

    fn description(&self) -> String {
        format!("Country contains: \"{}\"", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(country: &str) -> Product {
        Product {
            id: "TEST".to_string(),
            name: "Test".to_string(),
            image_url: None,
            price: 1.0,
            origin_country: country.to_string(),
            rating: 0.0,
            available_quantity: 1,
            category: None,
            description: None,
            created_at: None,
            user_email: None,
        }
    }

    #[test]
    fn test_country_substring() {
        let filter = CountryFilter::new("brazil");
        assert!(filter.matches(&make_product("Brazil")));
        assert!(!filter.matches(&make_product("Chile")));

        let filter = CountryFilter::new("land");
        assert!(filter.matches(&make_product("Thailand")));
        assert!(filter.matches(&make_product("Netherlands")));
        assert!(!filter.matches(&make_product("Japan")));
    }

    #[test]
    fn test_empty_country_on_product() {
        let filter = CountryFilter::new("a");
        assert!(!filter.matches(&make_product("")));
    }

    #[test]
    fn test_description() {
        assert_eq!(CountryFilter::new("Chile").description(), "Country contains: \"Chile\"");
    }
}
