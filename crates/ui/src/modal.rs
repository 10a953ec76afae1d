//! Modal dialogs
//!
//! Modals are registered by element id. Opening activates one modal;
//! closing always closes every modal on the page.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ModalSet {
    /// id -> open
    modals: BTreeMap<String, bool>,
}

/// Attributes reflected onto one `.modal` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub id: String,
    /// `is-active`
    pub active: bool,
    /// `aria-hidden`
    pub aria_hidden: bool,
}

impl ModalSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modals: ids.into_iter().map(|id| (id.into(), false)).collect(),
        }
    }

    /// Open the modal with `id`; unknown ids are ignored
    pub fn open(&mut self, id: &str) -> bool {
        match self.modals.get_mut(id) {
            Some(open) => {
                debug!("Opening modal {}", id);
                *open = true;
                true
            }
            None => {
                debug!("No modal with id {}", id);
                false
            }
        }
    }

    pub fn close_all(&mut self) {
        for open in self.modals.values_mut() {
            *open = false;
        }
    }

    pub fn any_open(&self) -> bool {
        self.modals.values().any(|open| *open)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.modals.get(id).copied().unwrap_or(false)
    }

    pub fn views(&self) -> Vec<ModalView> {
        self.modals
            .iter()
            .map(|(id, open)| ModalView {
                id: id.clone(),
                active: *open,
                aria_hidden: !*open,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_known_modal() {
        let mut modals = ModalSet::new(["size-guide", "newsletter"]);
        assert!(modals.open("size-guide"));
        assert!(modals.is_open("size-guide"));
        assert!(!modals.is_open("newsletter"));

        let views = modals.views();
        let guide = views.iter().find(|v| v.id == "size-guide").unwrap();
        assert!(guide.active);
        assert!(!guide.aria_hidden);
    }

    #[test]
    fn test_unknown_modal_ignored() {
        let mut modals = ModalSet::new(["size-guide"]);
        assert!(!modals.open("missing"));
        assert!(!modals.any_open());
    }

    #[test]
    fn test_close_all() {
        let mut modals = ModalSet::new(["a", "b"]);
        modals.open("a");
        modals.open("b");
        modals.close_all();
        assert!(!modals.any_open());
        assert!(modals.views().iter().all(|v| v.aria_hidden && !v.active));
    }
}
