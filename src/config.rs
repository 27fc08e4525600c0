//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::{FilterCriteria, SortKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default marketplace API endpoint.
pub const DEFAULT_API_URL: &str = "https://export-import-server.vercel.app";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the marketplace REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Default user email for exports/imports/dashboard
    #[serde(default)]
    pub email: Option<String>,

    /// Catalog default: category
    #[serde(default)]
    pub category: Option<String>,

    /// Catalog default: minimum price
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Catalog default: maximum price
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Catalog default: minimum rating
    #[serde(default)]
    pub min_rating: Option<f64>,

    /// Catalog default: origin country substring
    #[serde(default)]
    pub country: Option<String>,

    /// Catalog default: sort order
    #[serde(default)]
    pub sort: SortKey,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            email: None,
            category: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            country: None,
            sort: SortKey::None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("trade-hub").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("HUB_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }

        if let Ok(timeout) = std::env::var("HUB_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(email) = std::env::var("HUB_EMAIL") {
            if !email.trim().is_empty() {
                self.email = Some(email);
            }
        }

        self
    }

    /// Catalog criteria seeded from the configured defaults.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: String::new(),
            category: self.category.clone().unwrap_or_default(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            country: self.country.clone().unwrap_or_default(),
            sort_key: self.sort,
        }
    }

    /// Returns the configured email or an error naming the missing setting.
    pub fn require_email(&self) -> Result<&str> {
        self.email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .context("No user email given. Pass --email or set HUB_EMAIL.")
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
