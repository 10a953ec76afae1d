//! Shared types for the Almliebe storefront layer
//!
//! This crate provides:
//! - Injected theme configuration (settings, strings, routes, timings)
//! - Typed UI events
//! - Product form fields
//! - Money formatting

pub mod config;
pub mod event;
pub mod form;
pub mod money;

// Re-exports
pub use config::{CartType, ConfigError, ThemeConfig};
pub use event::UiEvent;
pub use form::FormData;
pub use money::{format_money, format_money_str, has_placeholder, MoneyFormatError};
