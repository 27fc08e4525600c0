//! Interactive catalog browsing driven by line commands.

use crate::catalog::{CatalogView, CriteriaField, FilterCriteria};
use crate::commands::catalog::describe;
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use crate::hub::{fetch_catalog, HubApi, HubClient};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  set <field> <value>   Change a filter (search, category, min-price, max-price,
                        min-rating, country, sort)
  unset <field>         Clear one filter
  clear                 Clear all filters
  page <n>              Jump to page n
  next | n              Next page
  prev | p              Previous page
  refresh | r           Refetch the catalog
  show | ls             Show the current page again
  help | ?              Show this help
  quit | q              Leave";

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// Print the current page.
    Render,
    /// Refetch the catalog, then print.
    Refresh,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// A browsing session over one catalog view.
pub struct BrowseSession {
    view: CatalogView,
    formatter: Formatter,
}

impl BrowseSession {
    /// Creates a session over an existing view.
    pub fn new(view: CatalogView, format: OutputFormat) -> Self {
        Self { view, formatter: Formatter::new(format) }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Swaps in a freshly fetched catalog, keeping the criteria.
    pub fn replace_products(&mut self, products: Vec<crate::hub::Product>) {
        self.view.set_products(products);
    }

    /// Formats the current page with its footer.
    pub fn render(&self) -> String {
        self.formatter.format_catalog(&self.view, &describe(self.view.criteria()))
    }

    /// Applies one input line. Errors carry a message for the user.
    pub fn handle(&mut self, line: &str) -> std::result::Result<BrowseAction, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (trimmed, ""),
        };

        match command.to_lowercase().as_str() {
            "" | "show" | "ls" => Ok(BrowseAction::Render),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim_start()),
                    None => (rest, ""),
                };
                let field: CriteriaField = field.parse()?;
                debug!("set {} = {:?}", field, value);
                self.view.set_field(field, value);
                Ok(BrowseAction::Render)
            }
            "unset" => {
                let field: CriteriaField = rest.parse()?;
                self.view.set_field(field, "");
                Ok(BrowseAction::Render)
            }
            "clear" => {
                self.view.clear_filters();
                Ok(BrowseAction::Render)
            }
            "page" => {
                let page: usize =
                    rest.trim().parse().map_err(|_| format!("Not a page number: {}", rest.trim()))?;
                self.view.set_page(page);
                Ok(BrowseAction::Render)
            }
            "next" | "n" => {
                self.view.next_page();
                Ok(BrowseAction::Render)
            }
            "prev" | "p" => {
                self.view.prev_page();
                Ok(BrowseAction::Render)
            }
            "refresh" | "r" => Ok(BrowseAction::Refresh),
            "help" | "?" => Ok(BrowseAction::Help),
            "quit" | "q" | "exit" => Ok(BrowseAction::Quit),
            other => Err(format!("Unknown command: {}. Type 'help' for a list.", other)),
        }
    }
}

/// Runs an interactive browsing session.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    /// Creates a new browse command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Browses the live catalog on stdin/stdout.
    pub async fn execute(&self, criteria: FilterCriteria) -> Result<()> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        self.execute_with_client(&client, criteria, stdin.lock(), &mut stdout).await
    }

    /// Runs the session loop over the given input and output (for testing).
    pub async fn execute_with_client<R: BufRead, W: Write>(
        &self,
        client: &impl HubApi,
        criteria: FilterCriteria,
        mut input: R,
        output: &mut W,
    ) -> Result<()> {
        let products = fetch_catalog(client).await;
        let view = CatalogView::with_criteria(products, criteria);
        let mut session = BrowseSession::new(view, self.config.format);

        writeln!(output, "{}", session.render())?;

        let mut line = String::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line).context("Failed to read input")? == 0 {
                writeln!(output)?;
                break;
            }

            match session.handle(&line) {
                Ok(BrowseAction::Render) => writeln!(output, "{}", session.render())?,
                Ok(BrowseAction::Refresh) => {
                    info!("Refetching catalog");
                    session.replace_products(fetch_catalog(client).await);
                    writeln!(output, "{}", session.render())?;
                }
                Ok(BrowseAction::Help) => writeln!(output, "{}", HELP)?,
                Ok(BrowseAction::Quit) => break,
                Err(message) => writeln!(output, "{}", message)?,
            }
        }

        Ok(())
    }
}
