//! UI toggle state for the storefront
//!
//! This crate provides two-state components mirrored onto CSS classes and
//! ARIA attributes:
//! - Mobile menu, modals and cart drawer
//! - Sticky header driven by scroll samples
//! - Toast notifications
//! - A `Page` aggregate and its serializable `PageView`

pub mod drawer;
pub mod header;
pub mod menu;
pub mod modal;
pub mod page;
pub mod toast;

// Re-exports
pub use drawer::CartDrawer;
pub use header::StickyHeader;
pub use menu::MobileMenu;
pub use modal::ModalSet;
pub use page::{AddButton, Page, PageLayout, PageView, SearchPanel};
pub use toast::{ToastKind, ToastPhase, ToastStack, ToastView};
