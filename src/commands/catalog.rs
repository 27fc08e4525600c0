//! Catalog command: fetch, filter, sort and show one page.

use crate::catalog::{CatalogView, FilterChainBuilder, FilterCriteria, SortKey};
use crate::config::Config;
use crate::format::Formatter;
use crate::hub::{fetch_catalog, HubApi, HubClient};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Shows a page of the filtered, sorted catalog.
pub struct CatalogCommand {
    config: Config,
}

impl CatalogCommand {
    /// Creates a new catalog command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the catalog and returns the requested page formatted.
    pub async fn execute(&self, criteria: FilterCriteria, page: usize) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, criteria, page).await
    }

    /// Runs the catalog pipeline with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl HubApi,
        criteria: FilterCriteria,
        page: usize,
    ) -> Result<String> {
        let descriptions = describe(&criteria);
        if !descriptions.is_empty() {
            debug!("Active criteria: {}", descriptions.join(", "));
        }

        let products = fetch_catalog(client).await;
        let mut view = CatalogView::with_criteria(products, criteria);

        let shown = view.set_page(page);
        if shown != page.max(1) {
            info!("Page {} is out of range, showing page {}", page, shown);
        }

        info!(
            "{} of {} products match, page {} of {}",
            view.result_count(),
            view.catalog_size(),
            view.current_page(),
            view.total_pages()
        );

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_catalog(&view, &descriptions))
    }

    /// Returns the most recently listed products.
    pub async fn execute_latest(&self) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_latest_with_client(&client).await
    }

    /// Fetches the latest products with a provided client (for testing).
    pub async fn execute_latest_with_client(&self, client: &impl HubApi) -> Result<String> {
        let products =
            client.latest_products().await.context("Failed to fetch latest products")?;

        info!("Fetched {} latest products", products.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}

/// Human-readable list of the active filters and sort order.
pub fn describe(criteria: &FilterCriteria) -> Vec<String> {
    let mut descriptions = FilterChainBuilder::from_criteria(criteria).build().descriptions();
    if criteria.sort_key != SortKey::None {
        descriptions.push(format!("Sorted by: {}", criteria.sort_key.label()));
    }
    descriptions
}
