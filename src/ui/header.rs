//! Header style toggle on scroll

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    /// Class added while scrolled past the threshold
    pub class: String,
    /// Vertical scroll offset (px) that must be exceeded
    pub threshold: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: "header".to_string(),
            class: "scrolled".to_string(),
            threshold: 50.0,
        }
    }
}

/// Tracks whether the header is in its scrolled style
#[derive(Debug, Clone)]
pub struct HeaderScrollToggle {
    threshold: f64,
    scrolled: bool,
}

impl HeaderScrollToggle {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed a scroll offset; returns the new state only when it flips
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}
