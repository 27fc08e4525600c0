//! Catalog view-model: composable filters, sorting and pagination over the fetched product list.

pub mod category;
pub mod country;
pub mod criteria;
pub mod page;
pub mod price;
pub mod rating;
pub mod search;
pub mod sort;
pub mod view;

use crate::hub::Product;
use tracing::debug;

pub use category::CategoryFilter;
pub use country::CountryFilter;
pub use criteria::{CriteriaField, FilterCriteria};
pub use page::{paginate, total_pages, PAGE_SIZE};
pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use search::NameFilter;
pub use sort::{apply_sort, SortKey};
pub use view::CatalogView;

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Returns the matching products as a new list; the input is left as is.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain. Unset inputs add nothing.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Builds the chain for a set of criteria, in the fixed evaluation order:
    /// name, category, price, rating, country.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self::new()
            .search(&criteria.search_text)
            .category(&criteria.category)
            .price_range(criteria.min_price, criteria.max_price)
            .min_rating(criteria.min_rating)
            .country(&criteria.country)
    }

    /// Adds a name search filter unless the text is blank.
    pub fn search(mut self, text: &str) -> Self {
        if !text.trim().is_empty() {
            self.chain.add(NameFilter::new(text));
        }
        self
    }

    /// Adds a category filter unless the category is empty.
    pub fn category(mut self, category: &str) -> Self {
        if !category.is_empty() {
            self.chain.add(CategoryFilter::new(category));
        }
        self
    }

    /// Adds a price range filter. Non-finite bounds count as unset.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        match (finite(min), finite(max)) {
            (Some(min), Some(max)) => {
                self.chain.add(PriceFilter::range(min, max));
            }
            (Some(min), None) => {
                self.chain.add(PriceFilter::min(min));
            }
            (None, Some(max)) => {
                self.chain.add(PriceFilter::max(max));
            }
            (None, None) => {}
        }
        self
    }

    /// Adds a minimum rating filter. A non-finite minimum counts as unset.
    pub fn min_rating(mut self, min: Option<f64>) -> Self {
        if let Some(min) = finite(min) {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }

    /// Adds an origin country filter unless the text is blank.
    pub fn country(mut self, country: &str) -> Self {
        if !country.trim().is_empty() {
            self.chain.add(CountryFilter::new(country));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(bound: Option<f64>) -> Option<f64> {
    bound.filter(|n| n.is_finite())
}

/// Filters the full catalog by the given criteria.
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let chain = FilterChainBuilder::from_criteria(criteria).build();
    if chain.is_empty() {
        return products.to_vec();
    }

    debug!("Applying {} filters: {}", chain.len(), chain.descriptions().join(", "));
    chain.apply(products)
}
