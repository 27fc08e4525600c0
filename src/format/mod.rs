//! Output formatting for products, imports and the dashboard (table, JSON, markdown, CSV).

use crate::catalog::CatalogView;
use crate::commands::dashboard::{DashboardStats, Transaction};
use crate::config::OutputFormat;
use crate::hub::{ImportRecord, Product};
use serde::Serialize;

/// Formats marketplace records for output.
pub struct Formatter {
    format: OutputFormat,
}

#[derive(Serialize)]
struct CatalogPage<'a> {
    page: usize,
    total_pages: usize,
    total_results: usize,
    catalog_size: usize,
    filters: &'a [String],
    products: &'a [Product],
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product's details.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => to_json(product, "{}"),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats a list of products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_product_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => to_json(products, "[]"),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats the visible catalog page with its paging footer.
    pub fn format_catalog(&self, view: &CatalogView, filters: &[String]) -> String {
        let products = view.visible();

        match self.format {
            OutputFormat::Json => to_json(
                &CatalogPage {
                    page: view.current_page(),
                    total_pages: view.total_pages(),
                    total_results: view.result_count(),
                    catalog_size: view.catalog_size(),
                    filters,
                    products,
                },
                "{}",
            ),
            OutputFormat::Csv => self.format_products(products),
            OutputFormat::Table | OutputFormat::Markdown => {
                let mut lines = Vec::new();

                if !filters.is_empty() {
                    lines.push(format!("Filters: {}", filters.join("; ")));
                    lines.push(String::new());
                }

                if products.is_empty() {
                    lines.push("No products found. Try adjusting your filters.".to_string());
                } else if self.format == OutputFormat::Table {
                    lines.push(self.table_rows(products));
                } else {
                    lines.push(self.markdown_rows(products));
                }

                lines.push(String::new());
                lines.push(format!(
                    "Showing {} of {} products (page {} of {})",
                    products.len(),
                    view.result_count(),
                    view.current_page(),
                    view.total_pages()
                ));

                lines.join("\n")
            }
        }
    }

    /// Formats a user's import records.
    pub fn format_imports(&self, imports: &[ImportRecord]) -> String {
        if imports.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_import_header(),
                _ => "You have no imports yet.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => to_json(imports, "[]"),
            OutputFormat::Table => self.table_imports(imports),
            OutputFormat::Markdown => self.markdown_imports(imports),
            OutputFormat::Csv => self.csv_imports(imports),
        }
    }

    /// Formats dashboard totals and recent activity.
    pub fn format_dashboard(&self, stats: &DashboardStats) -> String {
        match self.format {
            OutputFormat::Json => to_json(stats, "{}"),
            OutputFormat::Table => self.table_dashboard(stats),
            OutputFormat::Markdown => self.markdown_dashboard(stats),
            OutputFormat::Csv => self.csv_dashboard(stats),
        }
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:          {}", product.id));
        lines.push(format!("Name:        {}", product.name));
        lines.push(format!("Price:       ${:.2}", product.price));
        lines.push(format!("Country:     {}", product.origin_country));
        lines.push(format!("Rating:      {:.1}/5", product.rating));
        lines.push(format!("Available:   {}", product.available_quantity));
        lines.push(format!("Category:    {}", product.category_label()));
        lines.push(format!("Image:       {}", product.image_or_placeholder()));

        if let Some(created) = &product.created_at {
            lines.push(format!("Listed:      {}", created));
        }
        if let Some(owner) = &product.user_email {
            lines.push(format!("Exporter:    {}", owner));
        }

        lines.push(String::new());
        lines.push(
            product
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("No description provided.")
                .to_string(),
        );

        if !product.in_stock() {
            lines.push(String::new());
            lines.push("Out of stock: import unavailable.".to_string());
        }

        lines.join("\n")
    }

    fn table_rows(&self, products: &[Product]) -> String {
        let id_width = 24;
        let price_width = 10;
        let rating_width = 6;
        let qty_width = 9;
        let country_width = 14;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:>price_width$}  {:>rating_width$}  {:>qty_width$}  {:<country_width$}  {}",
            "ID", "Price", "Rating", "Available", "Country", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<qty_width$}  {:-<country_width$}  {:-<name_width$}",
            "", "", "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:>rating_width$}  {:>qty_width$}  {:<country_width$}  {}",
                truncate(&product.id, id_width),
                format!("{:.2}", product.price),
                format!("{:.1}", product.rating),
                product.available_quantity,
                truncate(&product.origin_country, country_width),
                truncate(&product.name, name_width)
            ));
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        format!("{}\n\nTotal: {} products", self.table_rows(products), products.len())
    }

    fn table_imports(&self, imports: &[ImportRecord]) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{:<24}  {:>10}  {:>6}  {:>12}  {:<14}  {}",
            "ID", "Price", "Qty", "Total", "Country", "Product"
        ));
        lines.push(format!(
            "{:-<24}  {:-<10}  {:-<6}  {:-<12}  {:-<14}  {:-<40}",
            "", "", "", "", "", ""
        ));

        for record in imports {
            lines.push(format!(
                "{:<24}  {:>10}  {:>6}  {:>12}  {:<14}  {}",
                truncate(&record.id, 24),
                format!("{:.2}", record.price),
                record.imported_quantity,
                format!("{:.2}", record.total()),
                truncate(&record.origin_country, 14),
                truncate(&record.product_name, 40)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} imports", imports.len()));

        lines.join("\n")
    }

    fn table_dashboard(&self, stats: &DashboardStats) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Total exports:    {}", stats.total_exports));
        lines.push(format!("Total imports:    {}", stats.total_imports));
        lines.push(format!("Import value:     ${:.2}", stats.total_revenue));
        lines.push(format!("Active products:  {}", stats.active_products));
        lines.push(String::new());

        if stats.recent.is_empty() {
            lines.push("No recent activity.".to_string());
            return lines.join("\n");
        }

        lines.push("Recent activity:".to_string());
        for t in &stats.recent {
            lines.push(format!(
                "  {:<10}  {:<6}  {:>6} x ${:.2}  {}",
                transaction_date(t).unwrap_or_else(|| "----------".to_string()),
                t.kind.to_string(),
                t.quantity,
                t.price,
                t.product_name
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.name));
        lines.push(String::new());
        lines.push(format!("![{}]({})", product.name, product.image_or_placeholder()));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", product.id));
        lines.push(format!("- **Price:** ${:.2}", product.price));
        lines.push(format!("- **Country:** {}", product.origin_country));
        lines.push(format!("- **Rating:** {:.1}/5", product.rating));
        lines.push(format!("- **Available:** {}", product.available_quantity));
        lines.push(format!("- **Category:** {}", product.category_label()));

        lines.push(String::new());
        lines.push(
            product
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("No description provided.")
                .to_string(),
        );

        lines.join("\n")
    }

    fn markdown_rows(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| Name | Price | Rating | Available | Country |".to_string());
        lines.push("|------|-------|--------|-----------|---------|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {:.2} | {:.1} | {} | {} |",
                markdown_escape(&truncate(&product.name, 40)),
                product.price,
                product.rating,
                product.available_quantity,
                markdown_escape(&product.origin_country)
            ));
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        format!("{}\n\n*{} products found*", self.markdown_rows(products), products.len())
    }

    fn markdown_imports(&self, imports: &[ImportRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Product | Price | Qty | Total | Country |".to_string());
        lines.push("|---------|-------|-----|-------|---------|".to_string());

        for record in imports {
            lines.push(format!(
                "| {} | {:.2} | {} | {:.2} | {} |",
                markdown_escape(&record.product_name),
                record.price,
                record.imported_quantity,
                record.total(),
                markdown_escape(&record.origin_country)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} imports*", imports.len()));

        lines.join("\n")
    }

    fn markdown_dashboard(&self, stats: &DashboardStats) -> String {
        let mut lines = Vec::new();

        lines.push("## Dashboard".to_string());
        lines.push(String::new());
        lines.push(format!("- **Total exports:** {}", stats.total_exports));
        lines.push(format!("- **Total imports:** {}", stats.total_imports));
        lines.push(format!("- **Import value:** ${:.2}", stats.total_revenue));
        lines.push(format!("- **Active products:** {}", stats.active_products));
        lines.push(String::new());

        if stats.recent.is_empty() {
            lines.push("*No recent activity.*".to_string());
            return lines.join("\n");
        }

        lines.push("### Recent activity".to_string());
        lines.push(String::new());
        lines.push("| Date | Type | Qty | Price | Product |".to_string());
        lines.push("|------|------|-----|-------|---------|".to_string());

        for t in &stats.recent {
            lines.push(format!(
                "| {} | {} | {} | {:.2} | {} |",
                transaction_date(t).unwrap_or_else(|| "-".to_string()),
                t.kind,
                t.quantity,
                t.price,
                markdown_escape(&t.product_name)
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_product_header() -> String {
        "id,name,price,rating,available_quantity,origin_country,category,created_at,image_url"
            .to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::csv_product_header());

        for product in products {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{}",
                csv_escape(&product.id),
                csv_escape(&product.name),
                product.price,
                product.rating,
                product.available_quantity,
                csv_escape(&product.origin_country),
                product.category.as_deref().map(csv_escape).unwrap_or_default(),
                product.created_at.as_deref().map(csv_escape).unwrap_or_default(),
                csv_escape(product.image_or_placeholder())
            ));
        }

        lines.join("\n")
    }

    fn csv_import_header() -> String {
        "id,product_id,product_name,price,imported_quantity,total,origin_country,imported_at"
            .to_string()
    }

    fn csv_imports(&self, imports: &[ImportRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::csv_import_header());

        for record in imports {
            lines.push(format!(
                "{},{},{},{},{},{},{},{}",
                csv_escape(&record.id),
                csv_escape(&record.product_id),
                csv_escape(&record.product_name),
                record.price,
                record.imported_quantity,
                record.total(),
                csv_escape(&record.origin_country),
                record.imported_at.as_deref().map(csv_escape).unwrap_or_default()
            ));
        }

        lines.join("\n")
    }

    // Summary row, a blank line, then one row per recent transaction.
    fn csv_dashboard(&self, stats: &DashboardStats) -> String {
        let mut lines = Vec::new();

        lines.push("total_exports,total_imports,import_value,active_products".to_string());
        lines.push(format!(
            "{},{},{},{}",
            stats.total_exports, stats.total_imports, stats.total_revenue, stats.active_products
        ));
        lines.push(String::new());
        lines.push("date,kind,quantity,price,product_name".to_string());

        for t in &stats.recent {
            lines.push(format!(
                "{},{},{},{},{}",
                transaction_date(t).unwrap_or_default(),
                t.kind,
                t.quantity,
                t.price,
                csv_escape(&t.product_name)
            ));
        }

        lines.join("\n")
    }
}

fn transaction_date(t: &Transaction) -> Option<String> {
    t.date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

/// Shortens text to `width` characters, marking the cut with "...".
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn markdown_escape(s: &str) -> String {
    s.replace('|', "\\|")
}
