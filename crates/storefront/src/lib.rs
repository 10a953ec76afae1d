//! Storefront collaborators and event dispatch
//!
//! This crate provides:
//! - [`StorefrontApi`]: the cart/search backend seam, with a reqwest
//!   implementation in [`HttpStorefront`]
//! - Cart synchronization (add, change quantity, remove, refresh)
//! - Predictive search behind a debounced input sampler
//! - [`Dispatcher`]: typed UI events in, page state out

pub mod api;
pub mod cart;
pub mod dispatcher;
pub mod error;
pub mod fragment;
pub mod http;
pub mod models;
pub mod render;
pub mod search;

// Re-exports
pub use api::StorefrontApi;
pub use cart::CartSync;
pub use dispatcher::Dispatcher;
pub use error::{Result, StorefrontError};
pub use http::HttpStorefront;
pub use models::{Cart, CartItem, Price, ProductMatch, SearchResults};
pub use render::{ListRenderer, ResultRenderer};
pub use search::PredictiveSearch;

use parking_lot::Mutex;
use std::sync::Arc;
use ui::Page;

/// Page state shared between the dispatcher and deferred work
pub type SharedPage = Arc<Mutex<Page>>;

/// Current time on the runtime clock, so paused test clocks apply to toasts
pub(crate) fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}
