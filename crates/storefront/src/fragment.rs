//! Drawer fragment extraction

use crate::error::{Result, StorefrontError};
use scraper::{Html, Selector};

const DRAWER_CONTENT: &str = "[data-cart-drawer-content]";

/// Inner HTML of the first `[data-cart-drawer-content]` in `html`, if any
pub fn drawer_content(html: &str) -> Result<Option<String>> {
    let selector = Selector::parse(DRAWER_CONTENT).map_err(|e| StorefrontError::Selector {
        selector: DRAWER_CONTENT,
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    Ok(document.select(&selector).next().map(|element| element.inner_html()))
}
