//! Cart synchronization
//!
//! Each operation is one backend request followed by a refresh of the
//! count badges and, when the drawer is open, the drawer content. There is
//! no retry or rollback: a failed request shows an error toast and leaves
//! the page as it was before the request.

use alm_core::{CartType, FormData, ThemeConfig};
use std::sync::Arc;
use tracing::{debug, error, info};
use ui::ToastKind;

use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError};
use crate::fragment;
use crate::models::Cart;
use crate::{now, SharedPage};

#[derive(Clone)]
pub struct CartSync {
    api: Arc<dyn StorefrontApi>,
    page: SharedPage,
    config: Arc<ThemeConfig>,
}

impl CartSync {
    pub fn new(api: Arc<dyn StorefrontApi>, page: SharedPage, config: Arc<ThemeConfig>) -> Self {
        Self { api, page, config }
    }

    /// Add the product described by `form`
    ///
    /// The add button is disabled for the duration of the request and
    /// restored afterwards whatever the outcome.
    pub async fn add_item(&self, form: FormData) -> Result<()> {
        let strings = &self.config.strings;
        self.page.lock().add_button.begin(&strings.adding);

        let result = self.try_add(&form).await;

        let mut page = self.page.lock();
        match &result {
            Ok(()) => page.toast(strings.item_added.as_str(), ToastKind::Success, now()),
            Err(e) => {
                error!("Error adding to cart: {}", e);
                page.toast(strings.error_adding.as_str(), ToastKind::Error, now());
            }
        }
        page.add_button.finish(&strings.add_to_cart);
        result
    }

    async fn try_add(&self, form: &FormData) -> Result<()> {
        self.api.add_line(form).await?;
        info!("Added item to cart");

        // Open before refreshing so the drawer shows the new line
        if self.config.settings.cart_type == CartType::Drawer {
            self.page.lock().drawer.open();
        }

        self.refresh().await;
        Ok(())
    }

    /// Apply a quantity input's raw value to a cart line
    pub async fn update_quantity(&self, line: u32, value: &str) -> Result<()> {
        let result = match parse_quantity(value) {
            Some(quantity) => self.change(line, quantity).await,
            None => Err(StorefrontError::InvalidQuantity(value.to_string())),
        };

        if let Err(e) = &result {
            error!("Error updating cart: {}", e);
            self.page
                .lock()
                .toast(self.config.strings.error_updating.as_str(), ToastKind::Error, now());
        }
        result
    }

    /// Remove a cart line (quantity 0)
    pub async fn remove_item(&self, line: u32) -> Result<()> {
        let result = self.change(line, 0).await;

        if let Err(e) = &result {
            error!("Error removing item: {}", e);
            self.page
                .lock()
                .toast(self.config.strings.error_removing.as_str(), ToastKind::Error, now());
        }
        result
    }

    async fn change(&self, line: u32, quantity: u32) -> Result<()> {
        self.api.change_line(line, quantity).await?;
        self.refresh().await;
        Ok(())
    }

    /// Re-read the cart into the count badges and the open drawer
    ///
    /// Failures are logged only; the caller's own outcome is unaffected.
    pub async fn refresh(&self) -> Option<Cart> {
        match self.try_refresh().await {
            Ok(cart) => Some(cart),
            Err(e) => {
                error!("Error refreshing cart: {}", e);
                None
            }
        }
    }

    async fn try_refresh(&self) -> Result<Cart> {
        let cart = self.api.fetch_cart().await?;

        let drawer_open = {
            let mut page = self.page.lock();
            page.cart_count = cart.item_count;
            page.drawer.is_open()
        };

        if drawer_open {
            let html = self.api.fetch_drawer().await?;
            match fragment::drawer_content(&html)? {
                Some(content) => self.page.lock().drawer.replace_content(content),
                None => debug!("Drawer response has no content fragment"),
            }
        }

        Ok(cart)
    }
}

/// Leading integer of a quantity input, ignoring trailing junk (`"3 pcs"` is 3)
pub fn parse_quantity(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(value.len());

    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("  12"), Some(12));
        assert_eq!(parse_quantity("+2"), Some(2));
        assert_eq!(parse_quantity("3 pcs"), Some(3));
        assert_eq!(parse_quantity("0"), Some(0));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity("-1"), None);
    }
}
