//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod catalog;
pub mod dashboard;
pub mod exports;
pub mod imports;
pub mod product;

#[cfg(test)]
pub(crate) mod mock;

pub use account::RegisterCommand;
pub use browse::{BrowseAction, BrowseCommand, BrowseSession};
pub use catalog::CatalogCommand;
pub use dashboard::{DashboardCommand, DashboardStats};
pub use exports::{ExportAction, ExportsCommand};
pub use imports::{ImportAction, ImportsCommand};
pub use product::ProductCommand;

use crate::error::ValidationError;

/// Checks an email address and returns it trimmed.
///
/// Requires exactly one `@` with non-empty text on both sides and no whitespace.
pub fn validate_email(raw: &str) -> Result<&str, ValidationError> {
    let email = raw.trim();
    let invalid = || ValidationError::InvalidEmail(email.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    Ok(email)
}

/// Trims an id argument, rejecting blanks.
pub(crate) fn require_id<'a>(raw: &'a str, what: &'static str) -> Result<&'a str, ValidationError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationError::MissingField(what));
    }
    Ok(id)
}
