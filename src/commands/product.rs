//! Product details command implementation.

use crate::commands::require_id;
use crate::config::Config;
use crate::error::HubError;
use crate::format::Formatter;
use crate::hub::{HubApi, HubClient};
use anyhow::{Context, Result};
use tracing::info;

/// Shows a single product by id.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a product by id and returns formatted output.
    pub async fn execute(&self, id: &str) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, id).await
    }

    /// Fetches a product with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl HubApi, id: &str) -> Result<String> {
        let id = require_id(id, "product id")?;

        info!("Looking up product: {}", id);

        let product = client.product(id).await.map_err(|e| not_found_or(e, id))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&product))
    }
}

/// Turns a 404 into a readable message and wraps anything else with context.
pub(crate) fn not_found_or(err: HubError, id: &str) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("Product not found: {}", id)
    } else {
        anyhow::Error::new(err).context(format!("Failed to fetch product {}", id))
    }
}
