//! Marketplace API client and wire models.

pub mod client;
pub mod models;

pub use client::{fetch_catalog, HubApi, HubClient};
pub use models::{ImportRecord, NewImport, NewProduct, Product, ProductUpdate, UserProfile};
