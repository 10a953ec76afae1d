//! Error types for storefront backend calls

use thiserror::Error;

/// Errors that can occur while talking to the storefront backend
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// The request did not complete within the client timeout
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// The backend answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body was not what the endpoint promises
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A quantity input did not contain a number
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    #[error("Invalid selector {selector}: {message}")]
    Selector { selector: &'static str, message: String },

    #[error("Money format error: {0}")]
    Money(#[from] alm_core::MoneyFormatError),

    /// A background request task panicked or was aborted
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A network error occurred while communicating with the backend
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
