//! Wire models for products, import records and user profiles.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Image shown when a product has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x400?text=No+Image";

/// A listed export product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier assigned by the server
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Display name
    #[serde(rename = "productName", default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Product image URL
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Unit price
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    /// Country the product ships from
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin_country: String,
    /// Star rating (0-5)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    /// Units left to import
    #[serde(default, deserialize_with = "lenient_u64")]
    pub available_quantity: u64,
    /// Category, absent means unclassified
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp as sent by the server; epoch milliseconds are stored as RFC 3339
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Exporter who listed the product
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl Product {
    /// Returns the image URL, or the placeholder when none is set.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Parsed creation time. `None` when missing or unparseable.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Returns true if at least one unit can be imported.
    pub fn in_stock(&self) -> bool {
        self.available_quantity > 0
    }

    /// Category label for display.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => "Unclassified",
        }
    }
}

/// A completed import, scoped to the importing user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Product the quantity was imported from
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub imported_quantity: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: String,
    /// Unit price at import time
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin_country: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<String>,
}

impl ImportRecord {
    /// Price times imported quantity.
    pub fn total(&self) -> f64 {
        self.price * self.imported_quantity as f64
    }

    /// Parsed import time. `None` when missing or unparseable.
    pub fn imported(&self) -> Option<DateTime<Utc>> {
        self.imported_at.as_deref().and_then(parse_timestamp)
    }
}

/// Body for `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(rename = "productName")]
    pub name: String,
    pub image_url: String,
    pub price: f64,
    pub origin_country: String,
    pub rating: f64,
    pub available_quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Body for `PATCH /products/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductUpdate {
    /// Returns true if no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body for `POST /imports`: the quantity plus a snapshot of the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImport {
    pub product_id: String,
    pub imported_quantity: u64,
    pub user_email: String,
    pub product_name: String,
    pub price: f64,
    pub rating: f64,
    pub origin_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewImport {
    /// Builds an import request from the product being imported.
    pub fn for_product(product: &Product, quantity: u64, user_email: impl Into<String>) -> Self {
        Self {
            product_id: product.id.clone(),
            imported_quantity: quantity,
            user_email: user_email.into(),
            product_name: product.name.clone(),
            price: product.price,
            rating: product.rating,
            origin_country: product.origin_country.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Profile record upserted via `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
}

/// Parses the timestamp formats the server is known to emit.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

// Form data reaches the server as strings or nulls often enough that one bad
// field must not fail the whole catalog. Every field of a listed record decodes leniently.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value).unwrap_or(0.0))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.trunc() as u64)
        .unwrap_or(0))
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(text_from_value).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    }))
}

// Strings pass through untouched; numbers are epoch milliseconds.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        _ => None,
    })
}
