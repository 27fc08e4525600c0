//! User-editable catalog criteria.

use super::SortKey;
use serde::{Deserialize, Serialize};

/// Filter and sort parameters chosen by the user.
///
/// Empty text fields and `None` bounds mean "not applied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the product name
    #[serde(default)]
    pub search_text: String,
    /// Exact category, case-insensitive
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// Case-insensitive substring of the origin country
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sort_key: SortKey,
}

/// A single editable criteria field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaField {
    Search,
    Category,
    MinPrice,
    MaxPrice,
    MinRating,
    Country,
    Sort,
}

impl CriteriaField {
    /// Returns all fields in form order.
    pub fn all() -> &'static [CriteriaField] {
        &[
            CriteriaField::Search,
            CriteriaField::Category,
            CriteriaField::MinPrice,
            CriteriaField::MaxPrice,
            CriteriaField::MinRating,
            CriteriaField::Country,
            CriteriaField::Sort,
        ]
    }
}

impl std::str::FromStr for CriteriaField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "search" | "q" | "name" => Ok(CriteriaField::Search),
            "category" => Ok(CriteriaField::Category),
            "min-price" => Ok(CriteriaField::MinPrice),
            "max-price" => Ok(CriteriaField::MaxPrice),
            "min-rating" | "rating" => Ok(CriteriaField::MinRating),
            "country" => Ok(CriteriaField::Country),
            "sort" => Ok(CriteriaField::Sort),
            _ => Err(format!(
                "Unknown field: {}. Use: search, category, min-price, max-price, min-rating, country, sort",
                s
            )),
        }
    }
}

impl std::fmt::Display for CriteriaField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CriteriaField::Search => "search",
            CriteriaField::Category => "category",
            CriteriaField::MinPrice => "min-price",
            CriteriaField::MaxPrice => "max-price",
            CriteriaField::MinRating => "min-rating",
            CriteriaField::Country => "country",
            CriteriaField::Sort => "sort",
        };
        write!(f, "{}", name)
    }
}

/// Reads a numeric bound from form text. Anything that is not a finite number is unset.
pub fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl FilterCriteria {
    /// Returns a copy with one field replaced by the given form text.
    pub fn with_field(&self, field: CriteriaField, raw: &str) -> Self {
        let mut next = self.clone();
        match field {
            CriteriaField::Search => next.search_text = raw.to_string(),
            CriteriaField::Category => next.category = raw.to_string(),
            CriteriaField::MinPrice => next.min_price = parse_bound(raw),
            CriteriaField::MaxPrice => next.max_price = parse_bound(raw),
            CriteriaField::MinRating => next.min_rating = parse_bound(raw),
            CriteriaField::Country => next.country = raw.to_string(),
            CriteriaField::Sort => next.sort_key = SortKey::parse_lenient(raw),
        }
        next
    }

    /// Current form text for a field.
    pub fn field_value(&self, field: CriteriaField) -> String {
        let bound = |b: Option<f64>| b.map(|v| v.to_string()).unwrap_or_default();
        match field {
            CriteriaField::Search => self.search_text.clone(),
            CriteriaField::Category => self.category.clone(),
            CriteriaField::MinPrice => bound(self.min_price),
            CriteriaField::MaxPrice => bound(self.max_price),
            CriteriaField::MinRating => bound(self.min_rating),
            CriteriaField::Country => self.country.clone(),
            CriteriaField::Sort => match self.sort_key {
                SortKey::None => String::new(),
                key => key.to_string(),
            },
        }
    }

    /// Returns true if nothing would be filtered or reordered.
    pub fn is_default(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.category.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_rating.is_none()
            && self.country.trim().is_empty()
            && self.sort_key == SortKey::None
    }
}
