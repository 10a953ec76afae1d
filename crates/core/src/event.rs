//! Typed UI events
//!
//! Every DOM trigger the theme reacts to is one variant here. A dispatcher
//! consumes them in order, so behavior can be driven without a document.

use crate::form::FormData;
use serde::{Deserialize, Serialize};

/// A user or page event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Document finished loading
    PageReady,
    /// `[data-mobile-menu-toggle]` clicked
    MenuToggleClicked,
    /// `[data-mobile-menu-overlay]` clicked
    MenuOverlayClicked,
    /// Key pressed anywhere on the page
    KeyPressed { key: String },
    /// `[data-modal-open]` clicked
    ModalOpenClicked { modal_id: String },
    /// `[data-modal-close]` clicked
    ModalCloseClicked,
    /// Cart drawer close control clicked
    DrawerCloseClicked,
    /// `[data-add-to-cart]` clicked inside a product form
    AddToCartClicked { form: FormData },
    /// `[data-cart-item-quantity]` input changed; `value` is the raw input text
    QuantityChanged { line: u32, value: String },
    /// `[data-cart-item-remove]` clicked
    RemoveClicked { line: u32 },
    /// Window scrolled to a vertical offset
    Scrolled { offset: u32 },
    /// `[data-predictive-search-input]` changed
    SearchInput { query: String },
}

impl UiEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::PageReady => "page_ready",
            UiEvent::MenuToggleClicked => "menu_toggle_clicked",
            UiEvent::MenuOverlayClicked => "menu_overlay_clicked",
            UiEvent::KeyPressed { .. } => "key_pressed",
            UiEvent::ModalOpenClicked { .. } => "modal_open_clicked",
            UiEvent::ModalCloseClicked => "modal_close_clicked",
            UiEvent::DrawerCloseClicked => "drawer_close_clicked",
            UiEvent::AddToCartClicked { .. } => "add_to_cart_clicked",
            UiEvent::QuantityChanged { .. } => "quantity_changed",
            UiEvent::RemoveClicked { .. } => "remove_clicked",
            UiEvent::Scrolled { .. } => "scrolled",
            UiEvent::SearchInput { .. } => "search_input",
        }
    }

    /// Whether this is the Escape key
    pub fn is_escape(&self) -> bool {
        matches!(self, UiEvent::KeyPressed { key } if key == "Escape")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        let event: UiEvent = serde_json::from_str(r#"{"type":"scrolled","offset":240}"#).unwrap();
        assert_eq!(event, UiEvent::Scrolled { offset: 240 });

        let event: UiEvent =
            serde_json::from_str(r#"{"type":"add_to_cart_clicked","form":[["id","7"]]}"#).unwrap();
        match event {
            UiEvent::AddToCartClicked { form } => assert_eq!(form.get("id"), Some("7")),
            other => panic!("unexpected event {:?}", other),
        }

        let event: UiEvent = serde_json::from_str(r#"{"type":"page_ready"}"#).unwrap();
        assert_eq!(event.name(), "page_ready");
    }

    #[test]
    fn test_is_escape() {
        assert!(UiEvent::KeyPressed { key: "Escape".into() }.is_escape());
        assert!(!UiEvent::KeyPressed { key: "Enter".into() }.is_escape());
        assert!(!UiEvent::ModalCloseClicked.is_escape());
    }
}
