//! Cart drawer

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CartDrawer {
    /// Whether the page has a `[data-cart-drawer]` at all
    present: bool,
    open: bool,
    /// Inner HTML of `[data-cart-drawer-content]`
    content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawerView {
    pub present: bool,
    /// `is-active`
    pub active: bool,
    pub content: String,
}

impl CartDrawer {
    pub fn new(present: bool) -> Self {
        Self {
            present,
            open: false,
            content: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if self.present {
            debug!("Opening cart drawer");
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        if self.present {
            debug!("Closing cart drawer");
            self.open = false;
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn replace_content(&mut self, html: String) {
        self.content = html;
    }

    pub fn view(&self) -> DrawerView {
        DrawerView {
            present: self.present,
            active: self.open,
            content: self.content.clone(),
        }
    }
}
