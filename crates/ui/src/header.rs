//! Sticky header scroll state

use alm_core::config::HeaderSettings;
use serde::Serialize;

/// Header classes derived from sampled scroll offsets
#[derive(Debug, Clone)]
pub struct StickyHeader {
    settings: HeaderSettings,
    last_offset: u32,
    scrolled: bool,
    hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    /// `is-scrolled`
    pub scrolled: bool,
    /// `is-hidden`
    pub hidden: bool,
}

impl StickyHeader {
    pub fn new(settings: HeaderSettings) -> Self {
        Self {
            settings,
            last_offset: 0,
            scrolled: false,
            hidden: false,
        }
    }

    /// Apply one scroll sample
    ///
    /// Scrolling down past the hide offset hides the header; any upward
    /// movement, or staying above the hide offset, shows it again.
    pub fn on_scroll(&mut self, offset: u32) {
        self.scrolled = offset > self.settings.scrolled_offset;
        self.hidden = offset > self.last_offset && offset > self.settings.hide_offset;
        self.last_offset = offset;
    }

    pub fn last_offset(&self) -> u32 {
        self.last_offset
    }

    pub fn view(&self) -> HeaderView {
        HeaderView {
            scrolled: self.scrolled,
            hidden: self.hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> StickyHeader {
        StickyHeader::new(HeaderSettings::default())
    }

    #[test]
    fn test_scrolled_threshold() {
        let mut header = header();
        header.on_scroll(100);
        assert!(!header.view().scrolled);

        header.on_scroll(101);
        assert!(header.view().scrolled);
        assert!(!header.view().hidden);
    }

    #[test]
    fn test_hide_on_scroll_down_show_on_scroll_up() {
        let mut header = header();
        header.on_scroll(250);
        assert_eq!(header.view(), HeaderView { scrolled: true, hidden: true });

        header.on_scroll(400);
        assert!(header.view().hidden);

        header.on_scroll(380);
        assert_eq!(header.view(), HeaderView { scrolled: true, hidden: false });
        assert_eq!(header.last_offset(), 380);
    }

    #[test]
    fn test_scroll_down_above_hide_offset_stays_visible() {
        let mut header = header();
        header.on_scroll(50);
        header.on_scroll(150);
        assert_eq!(header.view(), HeaderView { scrolled: true, hidden: false });

        header.on_scroll(0);
        assert_eq!(header.view(), HeaderView { scrolled: false, hidden: false });
    }
}
