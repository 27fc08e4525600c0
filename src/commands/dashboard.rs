//! Dashboard command: totals and recent activity for one user.

use crate::commands::validate_email;
use crate::config::Config;
use crate::format::Formatter;
use crate::hub::{HubApi, HubClient, ImportRecord, Product};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Number of transactions shown under recent activity.
pub const RECENT_LIMIT: usize = 5;

/// Whether a transaction was an import or an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Import,
    Export,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Import => write!(f, "import"),
            TransactionKind::Export => write!(f, "export"),
        }
    }
}

/// One line of recent activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub product_name: String,
    pub quantity: u64,
    pub price: f64,
    pub date: Option<DateTime<Utc>>,
}

/// Aggregated figures for a user's trading activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_exports: usize,
    pub total_imports: usize,
    /// Sum of price times quantity over all imports
    pub total_revenue: f64,
    /// Exports with stock left
    pub active_products: usize,
    pub recent: Vec<Transaction>,
}

impl DashboardStats {
    /// Computes the dashboard from a user's exports and imports.
    pub fn summarize(exports: &[Product], imports: &[ImportRecord]) -> Self {
        let mut recent: Vec<Transaction> = imports
            .iter()
            .map(|i| Transaction {
                kind: TransactionKind::Import,
                product_name: i.product_name.clone(),
                quantity: i.imported_quantity,
                price: i.price,
                date: i.imported(),
            })
            .chain(exports.iter().map(|p| Transaction {
                kind: TransactionKind::Export,
                product_name: p.name.clone(),
                quantity: p.available_quantity,
                price: p.price,
                date: p.created(),
            }))
            .collect();

        // Newest first; undated entries go last.
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(RECENT_LIMIT);

        Self {
            total_exports: exports.len(),
            total_imports: imports.len(),
            total_revenue: imports.iter().map(ImportRecord::total).sum(),
            active_products: exports.iter().filter(|p| p.in_stock()).count(),
            recent,
        }
    }
}

/// Shows the dashboard overview for a user.
pub struct DashboardCommand {
    config: Config,
}

impl DashboardCommand {
    /// Creates a new dashboard command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, email: &str) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, email).await
    }

    /// Builds the dashboard with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl HubApi, email: &str) -> Result<String> {
        let email = validate_email(email)?;

        let (exports, imports) = tokio::try_join!(client.my_exports(email), client.my_imports(email))
            .context("Failed to load dashboard data")?;

        let stats = DashboardStats::summarize(&exports, &imports);
        info!(
            "Dashboard for {}: {} exports, {} imports",
            email, stats.total_exports, stats.total_imports
        );

        Ok(Formatter::new(self.config.format).format_dashboard(&stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{make_import, make_product, MockHub};
    use crate::config::OutputFormat;

    const EMAIL: &str = "trader@example.com";

    fn make_exports() -> Vec<Product> {
        let mut a = make_product("e1", "Cashews", 12.0, 10);
        a.created_at = Some("2025-01-10T00:00:00Z".to_string());
        a.user_email = Some(EMAIL.to_string());
        let mut b = make_product("e2", "Cloves", 4.0, 0);
        b.created_at = Some("2025-03-05T00:00:00Z".to_string());
        b.user_email = Some(EMAIL.to_string());
        vec![a, b]
    }

    fn make_imports() -> Vec<ImportRecord> {
        let mut a = make_import("i1", EMAIL, 10.0, 3);
        a.imported_at = Some("2025-02-01T00:00:00Z".to_string());
        let mut b = make_import("i2", EMAIL, 2.5, 4);
        b.imported_at = Some("2025-04-01T00:00:00Z".to_string());
        let c = make_import("i3", EMAIL, 1.0, 1);
        vec![a, b, c]
    }

    #[test]
    fn test_summarize_totals() {
        let stats = DashboardStats::summarize(&make_exports(), &make_imports());
        assert_eq!(stats.total_exports, 2);
        assert_eq!(stats.total_imports, 3);
        assert_eq!(stats.total_revenue, 41.0);
        assert_eq!(stats.active_products, 1);
    }

    #[test]
    fn test_recent_is_newest_first_with_undated_last() {
        let stats = DashboardStats::summarize(&make_exports(), &make_imports());
        let names: Vec<&str> = stats.recent.iter().map(|t| t.product_name.as_str()).collect();
        assert_eq!(names, vec!["Import i2", "Cloves", "Import i1", "Cashews", "Import i3"]);
        assert_eq!(stats.recent[0].kind, TransactionKind::Import);
        assert_eq!(stats.recent[1].kind, TransactionKind::Export);
    }

    #[test]
    fn test_recent_is_capped() {
        let imports: Vec<ImportRecord> =
            (0..8).map(|i| make_import(&format!("i{}", i), EMAIL, 1.0, 1)).collect();
        let stats = DashboardStats::summarize(&[], &imports);
        assert_eq!(stats.recent.len(), RECENT_LIMIT);
        assert_eq!(stats.total_imports, 8);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = DashboardStats::summarize(&[], &[]);
        assert_eq!(stats.total_revenue, 0.0);
        assert!(stats.recent.is_empty());
        let output = Formatter::new(OutputFormat::Table).format_dashboard(&stats);
        assert!(output.contains("No recent activity."));
    }

    #[tokio::test]
    async fn test_dashboard_command() {
        let client = MockHub::new(make_exports()).with_imports(make_imports());
        let cmd = DashboardCommand::new(Config::default());

        let output = cmd.execute_with_client(&client, EMAIL).await.unwrap();
        assert!(output.contains("Total exports:    2"));
        assert!(output.contains("Import value:     $41.00"));
        assert!(output.contains("Active products:  1"));
        assert!(output.contains("2025-04-01  import"));

        let mut calls = client.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![format!("GET /my-exports/{}", EMAIL), format!("GET /my-imports/{}", EMAIL)]
        );
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let client = MockHub::new(make_exports()).with_imports(make_imports());
        let mut config = Config::default();
        config.format = OutputFormat::Json;
        let cmd = DashboardCommand::new(config);

        let output = cmd.execute_with_client(&client, EMAIL).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total_exports"], 2);
        assert_eq!(value["recent"][0]["kind"], "import");
    }

    #[tokio::test]
    async fn test_dashboard_markdown() {
        let client = MockHub::new(make_exports()).with_imports(make_imports());
        let mut config = Config::default();
        config.format = OutputFormat::Markdown;
        let cmd = DashboardCommand::new(config);

        let output = cmd.execute_with_client(&client, EMAIL).await.unwrap();
        assert!(output.starts_with("## Dashboard"));
        assert!(output.contains("| 2025-04-01 | import | 4 | 2.50 | Import i2 |"));
    }

    #[tokio::test]
    async fn test_dashboard_failure() {
        let client = MockHub::failing();
        let cmd = DashboardCommand::new(Config::default());

        let err = cmd.execute_with_client(&client, EMAIL).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load dashboard data"));
    }
}
