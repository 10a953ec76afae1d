//! Storefront backend trait
//!
//! The theme only needs five endpoints from the backend. Implement this
//! trait to drive the cart and search collaborators from another source,
//! such as an in-memory fake in tests.

use async_trait::async_trait;
use alm_core::FormData;

use crate::error::Result;
use crate::models::{Cart, SearchResults};

#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Add the line described by a product form
    ///
    /// Returns the backend's JSON body, which the theme does not inspect.
    async fn add_line(&self, form: &FormData) -> Result<serde_json::Value>;

    /// Set the quantity of a 1-based cart line; 0 removes the line
    async fn change_line(&self, line: u32, quantity: u32) -> Result<()>;

    /// Fetch the current cart
    async fn fetch_cart(&self) -> Result<Cart>;

    /// Fetch the rendered drawer page (HTML)
    async fn fetch_drawer(&self) -> Result<String>;

    /// Run a predictive search for `query`
    async fn predictive_search(&self, query: &str) -> Result<SearchResults>;
}
