//! trade-hub - Import/export marketplace client
//!
//! Browse, filter and page through the product catalog and manage your imports and exports.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use trade_hub::catalog::{FilterCriteria, SortKey};
use trade_hub::commands::{
    BrowseCommand, CatalogCommand, DashboardCommand, ExportAction, ExportsCommand, ImportAction,
    ImportsCommand, ProductCommand, RegisterCommand,
};
use trade_hub::config::{Config, OutputFormat};
use trade_hub::hub::{NewProduct, ProductUpdate, UserProfile};

#[derive(Parser)]
#[command(
    name = "trade-hub",
    version,
    about = "Import/export marketplace client",
    long_about = "Browse the import/export marketplace catalog with filtering, sorting and paging, and manage your imports and exports."
)]
struct Cli {
    /// Marketplace API base URL
    #[arg(long, global = true, env = "HUB_API_URL")]
    api_url: Option<String>,

    /// Your account email (used by imports, exports and dashboard)
    #[arg(short, long, global = true, env = "HUB_EMAIL")]
    email: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Catalog filter and sort flags. Unset flags fall back to the config defaults.
#[derive(Args)]
struct CriteriaArgs {
    /// Name contains (case-insensitive)
    #[arg(short = 'q', long)]
    search: Option<String>,

    /// Exact category (case-insensitive)
    #[arg(long)]
    category: Option<String>,

    /// Minimum price
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum rating (0-5)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Origin country contains (case-insensitive)
    #[arg(long)]
    country: Option<String>,

    /// Sort order (see `sort-keys`)
    #[arg(short, long)]
    sort: Option<SortKey>,
}

impl CriteriaArgs {
    fn apply(self, mut criteria: FilterCriteria) -> FilterCriteria {
        if let Some(search) = self.search {
            criteria.search_text = search;
        }
        if let Some(category) = self.category {
            criteria.category = category;
        }
        // NaN and infinities parse as f64 but are not usable bounds
        if let Some(min) = self.min_price.filter(|n| n.is_finite()) {
            criteria.min_price = Some(min);
        }
        if let Some(max) = self.max_price.filter(|n| n.is_finite()) {
            criteria.max_price = Some(max);
        }
        if let Some(min) = self.min_rating.filter(|n| n.is_finite()) {
            criteria.min_rating = Some(min);
        }
        if let Some(country) = self.country {
            criteria.country = country;
        }
        if let Some(sort) = self.sort {
            criteria.sort_key = sort;
        }
        criteria
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the filtered catalog
    #[command(alias = "c")]
    Catalog {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Browse the catalog interactively
    #[command(alias = "b")]
    Browse {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show the most recently listed products
    Latest,

    /// Show a product by id
    #[command(alias = "p")]
    Product {
        /// Product id
        id: String,
    },

    /// Import a quantity of a product
    #[command(alias = "i")]
    Import {
        /// Product id
        id: String,

        /// Units to import
        #[arg(short = 'n', long)]
        quantity: u64,
    },

    /// List your imports
    #[command(alias = "imports")]
    MyImports,

    /// Remove one of your imports
    RemoveImport {
        /// Import id
        id: String,
    },

    /// List your exported products
    #[command(alias = "exports")]
    MyExports,

    /// List a new export product
    AddExport {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price
        #[arg(long)]
        price: f64,

        /// Origin country
        #[arg(long)]
        country: String,

        /// Rating (0-5)
        #[arg(long)]
        rating: f64,

        /// Units available
        #[arg(long)]
        quantity: u64,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Change fields of one of your export products
    UpdateExport {
        /// Product id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        rating: Option<f64>,

        #[arg(long)]
        quantity: Option<u64>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete one of your export products
    DeleteExport {
        /// Product id
        id: String,
    },

    /// Show totals and recent activity
    #[command(alias = "d")]
    Dashboard,

    /// Create or refresh your profile record
    Register {
        /// Display name
        #[arg(long, default_value = "")]
        name: String,

        /// Profile photo URL
        #[arg(long, default_value = "")]
        photo_url: String,
    },

    /// List supported sort keys
    SortKeys,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(email) = cli.email {
        config.email = Some(email);
    }

    let output = match cli.command {
        Commands::Catalog { criteria, page } => {
            let criteria = criteria.apply(config.criteria());
            CatalogCommand::new(config).execute(criteria, page).await?
        }

        Commands::Browse { criteria } => {
            let criteria = criteria.apply(config.criteria());
            BrowseCommand::new(config).execute(criteria).await?;
            return Ok(());
        }

        Commands::Latest => CatalogCommand::new(config).execute_latest().await?,

        Commands::Product { id } => ProductCommand::new(config).execute(&id).await?,

        Commands::Import { id, quantity } => {
            let email = config.require_email()?.to_string();
            let action = ImportAction::Add { product_id: id, quantity, email };
            ImportsCommand::new(config).execute(action).await?
        }

        Commands::MyImports => {
            let email = config.require_email()?.to_string();
            ImportsCommand::new(config).execute(ImportAction::List { email }).await?
        }

        Commands::RemoveImport { id } => {
            ImportsCommand::new(config).execute(ImportAction::Remove { id }).await?
        }

        Commands::MyExports => {
            let email = config.require_email()?.to_string();
            ExportsCommand::new(config).execute(ExportAction::List { email }).await?
        }

        Commands::AddExport {
            name,
            image_url,
            price,
            country,
            rating,
            quantity,
            description,
            category,
        } => {
            let user_email = Some(config.require_email()?.to_string());
            let product = NewProduct {
                name,
                image_url,
                price,
                origin_country: country,
                rating,
                available_quantity: quantity,
                description,
                category,
                user_email,
            };
            ExportsCommand::new(config).execute(ExportAction::Add(product)).await?
        }

        Commands::UpdateExport {
            id,
            name,
            image_url,
            price,
            country,
            rating,
            quantity,
            description,
            category,
        } => {
            let update = ProductUpdate {
                name,
                image_url,
                price,
                origin_country: country,
                rating,
                available_quantity: quantity,
                description,
                category,
            };
            ExportsCommand::new(config).execute(ExportAction::Update { id, update }).await?
        }

        Commands::DeleteExport { id } => {
            ExportsCommand::new(config).execute(ExportAction::Delete { id }).await?
        }

        Commands::Dashboard => {
            let email = config.require_email()?.to_string();
            DashboardCommand::new(config).execute(&email).await?
        }

        Commands::Register { name, photo_url } => {
            let email = config.require_email()?.to_string();
            RegisterCommand::new(config).execute(UserProfile { name, email, photo_url }).await?
        }

        Commands::SortKeys => {
            let mut lines = vec![
                "Supported sort keys:\n".to_string(),
                format!("{:<12} {}", "Key", "Order"),
                format!("{:-<12} {:-<20}", "", ""),
            ];
            for key in SortKey::all() {
                lines.push(format!("{:<12} {}", key.to_string(), key.label()));
            }
            lines.join("\n")
        }
    };

    println!("{}", output);

    Ok(())
}
