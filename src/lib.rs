//! trade-hub - Import/export marketplace client
//!
//! Browse the product catalog with client-side filtering, sorting and
//! pagination, and manage imports and exports through the marketplace API.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod hub;

pub use catalog::{CatalogView, FilterCriteria, SortKey, PAGE_SIZE};
pub use config::Config;
pub use error::{HubError, ValidationError};
pub use hub::{ImportRecord, Product};
