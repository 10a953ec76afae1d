//! Mobile menu toggle

use serde::Serialize;
use tracing::debug;

/// Open/closed state of the mobile navigation menu
#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    open: bool,
    /// Whether the page has a `[data-mobile-menu-overlay]`
    has_overlay: bool,
}

/// Attributes reflected onto the menu elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    /// `is-active` on `[data-mobile-menu]`
    pub menu_active: bool,
    /// `is-active` on the overlay, when present
    pub overlay_active: bool,
    /// `aria-expanded` on the toggle button
    pub aria_expanded: bool,
}

impl MobileMenu {
    pub fn new(has_overlay: bool) -> Self {
        Self {
            open: false,
            has_overlay,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        debug!("Opening mobile menu");
        self.open = true;
    }

    pub fn close(&mut self) {
        debug!("Closing mobile menu");
        self.open = false;
    }

    /// Overlay click closes the menu
    pub fn overlay_clicked(&mut self) {
        if self.has_overlay {
            self.close();
        }
    }

    /// Escape closes the menu only while it is open
    pub fn escape_pressed(&mut self) {
        if self.open {
            self.close();
        }
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            menu_active: self.open,
            overlay_active: self.open && self.has_overlay,
            aria_expanded: self.open,
        }
    }
}
