//! Backend response models
//!
//! Only the fields the theme reads are modeled; everything else in the
//! payloads is ignored.

use alm_core::{format_money, format_money_str, MoneyFormatError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Cart
// ============================================================================

/// Response from the cart endpoint (`/cart.js`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    pub item_count: u32,
    /// Total in cents
    pub total_price: i64,
    pub currency: Option<String>,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    pub key: String,
    pub title: String,
    pub quantity: u32,
    pub variant_id: Option<u64>,
    /// Line total in cents
    pub final_line_price: i64,
}

// ============================================================================
// Predictive search
// ============================================================================

/// A price as the backend sends it: decimal text (`"49.00"`) or cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Cents(i64),
    Text(String),
}

impl Price {
    pub fn format(&self, money_format: &str) -> Result<String, MoneyFormatError> {
        match self {
            Price::Cents(cents) => format_money(*cents, money_format),
            Price::Text(text) => format_money_str(text, money_format),
        }
    }
}

/// One product in a predictive-search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response from the predictive search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub resources: SearchResources,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResources {
    pub results: ResultsByType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsByType {
    pub products: Vec<ProductMatch>,
}

impl SearchResults {
    pub fn from_products(products: Vec<ProductMatch>) -> Self {
        Self {
            resources: SearchResources {
                results: ResultsByType { products },
            },
        }
    }

    pub fn products(&self) -> &[ProductMatch] {
        &self.resources.results.products
    }
}
