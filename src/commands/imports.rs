//! Import commands: import a quantity of a product, list and remove imports.

use crate::commands::product::not_found_or;
use crate::commands::{require_id, validate_email};
use crate::config::Config;
use crate::error::ValidationError;
use crate::format::Formatter;
use crate::hub::{HubApi, HubClient, NewImport, Product};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// An import operation requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportAction {
    /// Import `quantity` units of a product.
    Add { product_id: String, quantity: u64, email: String },
    /// List the user's imports.
    List { email: String },
    /// Remove one of the user's imports.
    Remove { id: String },
}

/// Executes import operations.
pub struct ImportsCommand {
    config: Config,
}

impl ImportsCommand {
    /// Creates a new imports command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the action against the configured API.
    pub async fn execute(&self, action: ImportAction) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, action).await
    }

    /// Runs the action with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl HubApi,
        action: ImportAction,
    ) -> Result<String> {
        match action {
            ImportAction::Add { product_id, quantity, email } => {
                self.add(client, &product_id, quantity, &email).await
            }
            ImportAction::List { email } => self.list(client, &email).await,
            ImportAction::Remove { id } => self.remove(client, &id).await,
        }
    }

    async fn add(
        &self,
        client: &impl HubApi,
        product_id: &str,
        quantity: u64,
        email: &str,
    ) -> Result<String> {
        let product_id = require_id(product_id, "product id")?;
        let email = validate_email(email)?;

        let product = client.product(product_id).await.map_err(|e| not_found_or(e, product_id))?;
        check_import_quantity(&product, quantity)?;

        info!("Importing {} x {} for {}", quantity, product.name, email);
        client
            .create_import(&NewImport::for_product(&product, quantity, email))
            .await
            .context("Import failed")?;

        let message = format!("Imported {} x {}.", quantity, product.name);
        match client.product(product_id).await {
            Ok(updated) => {
                Ok(format!("{} Remaining available: {}", message, updated.available_quantity))
            }
            Err(e) => {
                warn!("Import recorded but refetching {} failed: {}", product_id, e);
                Ok(message)
            }
        }
    }

    async fn list(&self, client: &impl HubApi, email: &str) -> Result<String> {
        let email = validate_email(email)?;

        let imports = client.my_imports(email).await.context("Failed to fetch imports")?;
        info!("Found {} imports for {}", imports.len(), email);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_imports(&imports))
    }

    async fn remove(&self, client: &impl HubApi, id: &str) -> Result<String> {
        let id = require_id(id, "import id")?;

        client.delete_import(id).await.with_context(|| format!("Failed to remove import {}", id))?;
        info!("Removed import {}", id);

        Ok(format!("Removed import {}", id))
    }
}

/// Checks a requested import quantity against the product's stock.
pub fn check_import_quantity(product: &Product, quantity: u64) -> Result<(), ValidationError> {
    if !product.in_stock() {
        return Err(ValidationError::OutOfStock(product.name.clone()));
    }
    if quantity < 1 || quantity > product.available_quantity {
        return Err(ValidationError::InvalidQuantity {
            requested: quantity,
            available: product.available_quantity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{make_import, make_product, MockHub};
    use crate::config::OutputFormat;

    fn make_client() -> MockHub {
        MockHub::new(vec![
            make_product("tea", "Green Tea", 10.0, 5),
            make_product("saffron", "Saffron", 300.0, 0),
        ])
    }

    fn add(product_id: &str, quantity: u64) -> ImportAction {
        ImportAction::Add {
            product_id: product_id.to_string(),
            quantity,
            email: "buyer@example.com".to_string(),
        }
    }

    #[test]
    fn test_check_import_quantity() {
        let product = make_product("tea", "Green Tea", 10.0, 5);
        assert!(check_import_quantity(&product, 1).is_ok());
        assert!(check_import_quantity(&product, 5).is_ok());
        assert_eq!(
            check_import_quantity(&product, 0),
            Err(ValidationError::InvalidQuantity { requested: 0, available: 5 })
        );
        assert_eq!(
            check_import_quantity(&product, 6),
            Err(ValidationError::InvalidQuantity { requested: 6, available: 5 })
        );

        let sold_out = make_product("saffron", "Saffron", 300.0, 0);
        assert_eq!(
            check_import_quantity(&sold_out, 1),
            Err(ValidationError::OutOfStock("Saffron".to_string()))
        );
    }

    #[tokio::test]
    async fn test_import_success_reports_remaining() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let output = cmd.execute_with_client(&client, add("tea", 3)).await.unwrap();
        assert_eq!(output, "Imported 3 x Green Tea. Remaining available: 2");
        assert_eq!(
            client.calls(),
            vec!["GET /products/tea", "POST /imports", "GET /products/tea"]
        );

        let imports = client.imports();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].imported_quantity, 3);
        assert_eq!(imports[0].user_email, "buyer@example.com");
        assert_eq!(imports[0].product_name, "Green Tea");
    }

    #[tokio::test]
    async fn test_import_too_many_fails_before_post() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let err = cmd.execute_with_client(&client, add("tea", 6)).await.unwrap_err();
        assert!(err.to_string().contains("must be between 1 and 5"));
        assert_eq!(client.calls(), vec!["GET /products/tea"]);
        assert!(client.imports().is_empty());
    }

    #[tokio::test]
    async fn test_import_zero_fails() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let err = cmd.execute_with_client(&client, add("tea", 0)).await.unwrap_err();
        assert!(err.to_string().contains("quantity 0 is invalid"));
    }

    #[tokio::test]
    async fn test_import_out_of_stock() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let err = cmd.execute_with_client(&client, add("saffron", 1)).await.unwrap_err();
        assert!(err.to_string().contains("out of stock"));
    }

    #[tokio::test]
    async fn test_import_invalid_email() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let action = ImportAction::Add {
            product_id: "tea".to_string(),
            quantity: 1,
            email: "nobody".to_string(),
        };
        let err = cmd.execute_with_client(&client, action).await.unwrap_err();
        assert!(err.to_string().contains("invalid email address"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_import_unknown_product() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let err = cmd.execute_with_client(&client, add("ghost", 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found: ghost");
    }

    #[tokio::test]
    async fn test_list_imports() {
        let client = make_client().with_imports(vec![
            make_import("i1", "buyer@example.com", 10.0, 2),
            make_import("i2", "other@example.com", 5.0, 1),
        ]);
        let mut config = Config::default();
        config.format = OutputFormat::Csv;
        let cmd = ImportsCommand::new(config);

        let action = ImportAction::List { email: "buyer@example.com".to_string() };
        let output = cmd.execute_with_client(&client, action).await.unwrap();
        assert!(output.contains("i1,"));
        assert!(!output.contains("i2,"));
        assert_eq!(client.calls(), vec!["GET /my-imports/buyer@example.com"]);
    }

    #[tokio::test]
    async fn test_list_imports_empty() {
        let client = make_client();
        let cmd = ImportsCommand::new(Config::default());

        let action = ImportAction::List { email: "buyer@example.com".to_string() };
        let output = cmd.execute_with_client(&client, action).await.unwrap();
        assert_eq!(output, "You have no imports yet.");
    }

    #[tokio::test]
    async fn test_remove_import() {
        let client =
            make_client().with_imports(vec![make_import("i1", "buyer@example.com", 10.0, 2)]);
        let cmd = ImportsCommand::new(Config::default());

        let output = cmd
            .execute_with_client(&client, ImportAction::Remove { id: "i1".to_string() })
            .await
            .unwrap();
        assert_eq!(output, "Removed import i1");
        assert!(client.imports().is_empty());

        let err = cmd
            .execute_with_client(&client, ImportAction::Remove { id: "i1".to_string() })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to remove import i1"));
    }
}
