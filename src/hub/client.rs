//! HTTP client for the marketplace REST API.

use crate::config::Config;
use crate::error::{HubError, HubResult};
use crate::hub::models::{ImportRecord, NewImport, NewProduct, Product, ProductUpdate, UserProfile};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::{Client, RequestBuilder};

/// Marketplace API operations - enables mocking for tests.
#[async_trait]
pub trait HubApi: Send + Sync {
    /// Returns the complete current catalog.
    async fn list_products(&self) -> HubResult<Vec<Product>>;

    /// Returns the most recently listed products.
    async fn latest_products(&self) -> HubResult<Vec<Product>>;

    /// Fetches a single product by id.
    async fn product(&self, id: &str) -> HubResult<Product>;

    /// Lists a new export product.
    async fn create_product(&self, product: &NewProduct) -> HubResult<()>;

    /// Applies a partial update to a product.
    async fn update_product(&self, id: &str, update: &ProductUpdate) -> HubResult<()>;

    async fn delete_product(&self, id: &str) -> HubResult<()>;

    /// Records an import; the server decrements the available quantity.
    async fn create_import(&self, import: &NewImport) -> HubResult<()>;

    async fn delete_import(&self, id: &str) -> HubResult<()>;

    /// Imports made by the given user.
    async fn my_imports(&self, email: &str) -> HubResult<Vec<ImportRecord>>;

    /// Products listed by the given user.
    async fn my_exports(&self, email: &str) -> HubResult<Vec<Product>>;

    /// Creates or refreshes the user's profile record.
    async fn register_user(&self, profile: &UserProfile) -> HubResult<()>;
}

/// Fetches the catalog for the view-model.
///
/// Failures are logged and produce an empty list; the catalog view never errors.
pub async fn fetch_catalog(api: &impl HubApi) -> Vec<Product> {
    match api.list_products().await {
        Ok(products) => {
            debug!("Fetched {} catalog products", products.len());
            products
        }
        Err(e) => {
            warn!("Failed to fetch catalog, showing empty list: {}", e);
            Vec::new()
        }
    }
}

/// Marketplace REST client.
pub struct HubClient {
    client: Client,
    base_url: String,
}

impl HubClient {
    /// Creates a client against the configured API URL.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.api_url.clone())
    }

    /// Creates a client against an explicit base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!("Using API base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> HubResult<String> {
        let response = request.header("Accept", "application/json").send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(HubError::Status { status: status.as_u16(), message });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> HubResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let body = self.send(self.client.get(&url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> HubResult<Vec<T>> {
        let list: Option<Vec<T>> = self.get_json(path).await?;
        Ok(list.unwrap_or_default())
    }

    fn with_json<B: Serialize>(request: RequestBuilder, body: &B) -> HubResult<RequestBuilder> {
        let bytes = serde_json::to_vec(body)?;
        Ok(request.header("Content-Type", "application/json").body(bytes))
    }
}

/// Extracts the `message` field servers put in JSON error bodies.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
        .filter(|m| !m.is_empty())
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw.trim()).into_owned()
}

#[async_trait]
impl HubApi for HubClient {
    async fn list_products(&self) -> HubResult<Vec<Product>> {
        self.get_list("/products").await
    }

    async fn latest_products(&self) -> HubResult<Vec<Product>> {
        self.get_list("/products/latest").await
    }

    async fn product(&self, id: &str) -> HubResult<Product> {
        info!("Fetching product: {}", id);
        self.get_json(&format!("/products/{}", segment(id))).await
    }

    async fn create_product(&self, product: &NewProduct) -> HubResult<()> {
        info!("Creating product: {}", product.name);
        let request = Self::with_json(self.client.post(self.url("/products")), product)?;
        self.send(request).await.map(|_| ())
    }

    async fn update_product(&self, id: &str, update: &ProductUpdate) -> HubResult<()> {
        info!("Updating product: {}", id);
        let url = self.url(&format!("/products/{}", segment(id)));
        let request = Self::with_json(self.client.patch(url), update)?;
        self.send(request).await.map(|_| ())
    }

    async fn delete_product(&self, id: &str) -> HubResult<()> {
        info!("Deleting product: {}", id);
        let url = self.url(&format!("/products/{}", segment(id)));
        self.send(self.client.delete(url)).await.map(|_| ())
    }

    async fn create_import(&self, import: &NewImport) -> HubResult<()> {
        info!("Importing {} x {}", import.imported_quantity, import.product_id);
        let request = Self::with_json(self.client.post(self.url("/imports")), import)?;
        self.send(request).await.map(|_| ())
    }

    async fn delete_import(&self, id: &str) -> HubResult<()> {
        info!("Removing import: {}", id);
        let url = self.url(&format!("/imports/{}", segment(id)));
        self.send(self.client.delete(url)).await.map(|_| ())
    }

    async fn my_imports(&self, email: &str) -> HubResult<Vec<ImportRecord>> {
        self.get_list(&format!("/my-imports/{}", segment(email))).await
    }

    async fn my_exports(&self, email: &str) -> HubResult<Vec<Product>> {
        self.get_list(&format!("/my-exports/{}", segment(email))).await
    }

    async fn register_user(&self, profile: &UserProfile) -> HubResult<()> {
        info!("Registering user profile: {}", profile.email);
        let request = Self::with_json(self.client.post(self.url("/users")), profile)?;
        self.send(request).await.map(|_| ())
    }
}
