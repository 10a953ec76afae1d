//! Page-level UI state
//!
//! Owns every component the theme toggles plus the small pieces of
//! markup state (cart badge, add button, search results) that network
//! responses are spliced into.

use crate::drawer::{CartDrawer, DrawerView};
use crate::header::{HeaderView, StickyHeader};
use crate::menu::{MenuView, MobileMenu};
use crate::modal::{ModalSet, ModalView};
use crate::toast::{ToastKind, ToastStack, ToastView};
use alm_core::ThemeConfig;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Which optional elements exist on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub menu_overlay: bool,
    pub cart_drawer: bool,
    pub modal_ids: Vec<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            menu_overlay: true,
            cart_drawer: true,
            modal_ids: Vec::new(),
        }
    }
}

/// `[data-add-to-cart]` button state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddButton {
    pub disabled: bool,
    pub label: String,
}

impl AddButton {
    fn new(label: &str) -> Self {
        Self {
            disabled: false,
            label: label.to_string(),
        }
    }

    /// Disable while a request is in flight
    pub fn begin(&mut self, busy_label: &str) {
        self.disabled = true;
        self.label = busy_label.to_string();
    }

    pub fn finish(&mut self, label: &str) {
        self.disabled = false;
        self.label = label.to_string();
    }
}

/// `[data-predictive-search-results]` container state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPanel {
    /// `is-active`
    pub active: bool,
    /// Query the current markup belongs to
    pub query: Option<String>,
    /// Rendered result markup
    pub markup: String,
}

impl SearchPanel {
    pub fn clear(&mut self) {
        self.active = false;
        self.query = None;
        self.markup.clear();
    }

    pub fn show(&mut self, query: &str, markup: String) {
        self.active = true;
        self.query = Some(query.to_string());
        self.markup = markup;
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub menu: MobileMenu,
    pub modals: ModalSet,
    pub drawer: CartDrawer,
    pub header: StickyHeader,
    pub toasts: ToastStack,
    /// Text of every `[data-cart-count]`
    pub cart_count: u32,
    pub add_button: AddButton,
    pub search: SearchPanel,
    pub loading_overlay_hidden: bool,
}

/// Serializable snapshot of the whole page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub menu: MenuView,
    pub modals: Vec<ModalView>,
    pub drawer: DrawerView,
    pub header: HeaderView,
    pub toasts: Vec<ToastView>,
    pub cart_count: u32,
    pub add_button: AddButton,
    pub search: SearchPanel,
    pub body_scroll_locked: bool,
    pub loading_overlay_hidden: bool,
}

impl Page {
    pub fn new(layout: &PageLayout, config: &ThemeConfig) -> Self {
        Self {
            menu: MobileMenu::new(layout.menu_overlay),
            modals: ModalSet::new(layout.modal_ids.iter().cloned()),
            drawer: CartDrawer::new(layout.cart_drawer),
            header: StickyHeader::new(config.header.clone()),
            toasts: ToastStack::new(config.timing.toast_visible(), config.timing.toast_fade()),
            cart_count: 0,
            add_button: AddButton::new(&config.strings.add_to_cart),
            search: SearchPanel::default(),
            loading_overlay_hidden: false,
        }
    }

    /// Escape closes the menu (when open) and every modal
    pub fn escape_pressed(&mut self) {
        self.menu.escape_pressed();
        self.modals.close_all();
    }

    /// Body scrolling is locked while any overlaying component is open
    pub fn body_scroll_locked(&self) -> bool {
        self.menu.is_open() || self.drawer.is_open() || self.modals.any_open()
    }

    pub fn toast(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        self.toasts.prune(now);
        self.toasts.show(message, kind, now);
    }

    pub fn view(&self, now: Instant) -> PageView {
        PageView {
            menu: self.menu.view(),
            modals: self.modals.views(),
            drawer: self.drawer.view(),
            header: self.header.view(),
            toasts: self.toasts.views(now),
            cart_count: self.cart_count,
            add_button: self.add_button.clone(),
            search: self.search.clone(),
            body_scroll_locked: self.body_scroll_locked(),
            loading_overlay_hidden: self.loading_overlay_hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        let layout = PageLayout {
            modal_ids: vec!["size-guide".to_string()],
            ..PageLayout::default()
        };
        Page::new(&layout, &ThemeConfig::default())
    }

    #[test]
    fn test_initial_view() {
        let page = page();
        let view = page.view(Instant::now());
        assert!(!view.body_scroll_locked);
        assert_eq!(view.add_button.label, "Add to cart");
        assert!(!view.add_button.disabled);
        assert_eq!(view.modals.len(), 1);
        assert!(!view.loading_overlay_hidden);
    }

    #[test]
    fn test_scroll_lock_follows_open_components() {
        let mut page = page();
        page.menu.open();
        page.modals.open("size-guide");
        assert!(page.body_scroll_locked());

        page.modals.close_all();
        assert!(page.body_scroll_locked());

        page.menu.close();
        assert!(!page.body_scroll_locked());

        page.drawer.open();
        assert!(page.body_scroll_locked());
    }

    #[test]
    fn test_escape_closes_menu_and_modals() {
        let mut page = page();
        page.menu.open();
        page.modals.open("size-guide");
        page.escape_pressed();
        assert!(!page.menu.is_open());
        assert!(!page.modals.any_open());
    }

    #[test]
    fn test_add_button_cycle() {
        let mut page = page();
        page.add_button.begin("Adding...");
        assert!(page.add_button.disabled);
        assert_eq!(page.add_button.label, "Adding...");
        page.add_button.finish("Add to cart");
        assert!(!page.add_button.disabled);
    }

    #[test]
    fn test_search_panel() {
        let mut page = page();
        page.search.show("boots", "<li>Boots</li>".to_string());
        assert!(page.search.active);
        page.search.clear();
        assert_eq!(page.search, SearchPanel::default());
    }

    #[test]
    fn test_view_serializes() {
        let page = page();
        let json = serde_json::to_value(page.view(Instant::now())).unwrap();
        assert_eq!(json["cart_count"], 0);
        assert_eq!(json["menu"]["aria_expanded"], false);
    }
}
