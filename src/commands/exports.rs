//! Export commands: list, add, update and delete the user's listed products.

use crate::commands::{require_id, validate_email};
use crate::config::Config;
use crate::error::ValidationError;
use crate::format::Formatter;
use crate::hub::{HubApi, HubClient, NewProduct, ProductUpdate};
use anyhow::{Context, Result};
use tracing::info;

/// An export operation requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportAction {
    /// List products exported by a user.
    List { email: String },
    /// List a new product.
    Add(NewProduct),
    /// Change some fields of a listed product.
    Update { id: String, update: ProductUpdate },
    /// Remove a listed product.
    Delete { id: String },
}

/// Executes export operations.
pub struct ExportsCommand {
    config: Config,
}

impl ExportsCommand {
    /// Creates a new exports command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the action against the configured API.
    pub async fn execute(&self, action: ExportAction) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, action).await
    }

    /// Runs the action with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl HubApi,
        action: ExportAction,
    ) -> Result<String> {
        match action {
            ExportAction::List { email } => {
                let email = validate_email(&email)?;
                let products =
                    client.my_exports(email).await.context("Failed to fetch exports")?;
                info!("Found {} exports for {}", products.len(), email);

                let formatter = Formatter::new(self.config.format);
                Ok(formatter.format_products(&products))
            }
            ExportAction::Add(product) => {
                validate_new_product(&product)?;
                client.create_product(&product).await.context("Failed to add export")?;
                info!("Listed export: {}", product.name);

                Ok(format!("Listed export: {}", product.name))
            }
            ExportAction::Update { id, update } => {
                let id = require_id(&id, "product id")?;
                validate_update(&update)?;
                client
                    .update_product(id, &update)
                    .await
                    .with_context(|| format!("Failed to update export {}", id))?;
                info!("Updated export {}", id);

                Ok(format!("Updated export {}", id))
            }
            ExportAction::Delete { id } => {
                let id = require_id(&id, "product id")?;
                client
                    .delete_product(id)
                    .await
                    .with_context(|| format!("Failed to delete export {}", id))?;
                info!("Deleted export {}", id);

                Ok(format!("Deleted export {}", id))
            }
        }
    }
}

/// Checks the fields of a product before it is listed.
pub fn validate_new_product(product: &NewProduct) -> Result<(), ValidationError> {
    require_text(&product.name, "product name")?;
    require_text(&product.image_url, "image URL")?;
    require_text(&product.origin_country, "origin country")?;
    check_price(product.price)?;
    check_rating(product.rating)?;
    if let Some(email) = &product.user_email {
        validate_email(email)?;
    }
    Ok(())
}

/// Checks the fields present in a partial update.
pub fn validate_update(update: &ProductUpdate) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::MissingField("at least one field to update"));
    }
    if let Some(name) = &update.name {
        require_text(name, "product name")?;
    }
    if let Some(url) = &update.image_url {
        require_text(url, "image URL")?;
    }
    if let Some(country) = &update.origin_country {
        require_text(country, "origin country")?;
    }
    if let Some(price) = update.price {
        check_price(price)?;
    }
    if let Some(rating) = update.rating {
        check_rating(rating)?;
    }
    Ok(())
}

fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::InvalidRating(rating));
    }
    Ok(())
}
