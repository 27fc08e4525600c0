//! Error types for the hub API and for user input validation.

use thiserror::Error;

/// Errors returned by the marketplace REST API client.
#[derive(Debug, Error)]
pub enum HubError {
    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided `message`, or the status reason when absent.
        message: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HubError {
    /// Returns the HTTP status if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            HubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result alias for hub API calls.
pub type HubResult<T> = std::result::Result<T, HubError>;

/// Errors raised when user input is rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Import quantity outside `1..=available`.
    #[error("quantity {requested} is invalid: must be between 1 and {available}")]
    InvalidQuantity {
        /// Quantity the user asked for.
        requested: u64,
        /// Quantity currently available.
        available: u64,
    },

    /// The product has nothing left to import.
    #[error("product '{0}' is out of stock")]
    OutOfStock(String),

    /// Malformed email address.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A required text field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Negative or non-finite price.
    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    /// Rating outside 0-5.
    #[error("rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),
}
