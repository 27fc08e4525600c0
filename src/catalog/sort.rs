//! Catalog sort orders.

use crate::hub::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the order the API returned.
    #[default]
    #[serde(alias = "")]
    None,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    /// Newest first.
    DateDesc,
    /// Oldest first.
    DateAsc,
}

impl SortKey {
    /// Returns all sort keys in menu order.
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::None,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::RatingDesc,
            SortKey::DateDesc,
            SortKey::DateAsc,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Default order",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Rating: High to Low",
            SortKey::DateDesc => "Newest First",
            SortKey::DateAsc => "Oldest First",
        }
    }

    /// Parses user text, falling back to [`SortKey::None`] for anything unknown.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "rating-desc" => Ok(SortKey::RatingDesc),
            "date-desc" | "newest" => Ok(SortKey::DateDesc),
            "date-asc" | "oldest" => Ok(SortKey::DateAsc),
            _ => Err(format!(
                "Unknown sort key: {}. Use: none, price-asc, price-desc, rating-desc, date-desc, date-asc",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortKey::None => "none",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
        };
        write!(f, "{}", name)
    }
}

/// Sorts products by the given key.
///
/// All orders are stable. Products without a parseable creation time count as oldest.
pub fn apply_sort(mut products: Vec<Product>, key: SortKey) -> Vec<Product> {
    match key {
        SortKey::None => {}
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::RatingDesc => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::DateDesc => products.sort_by(|a, b| compare_created(b, a)),
        SortKey::DateAsc => products.sort_by(|a, b| compare_created(a, b)),
    }
    products
}

// Option orders None before Some, which puts undated products first when ascending.
fn compare_created(a: &Product, b: &Product) -> Ordering {
    a.created().cmp(&b.created())
}
