//! One-shot reveal on scroll
//!
//! Elements are registered with an id; the first intersection report marks
//! them revealed for good. The DOM side assigns ids through a data attribute
//! and applies the class when [`RevealTracker::on_intersect`] says so.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub class: String,
    /// Visible fraction that counts as intersecting
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal-up, .reveal-left, .reveal-right, .reveal-fade".to_string(),
            class: "revealed".to_string(),
            threshold: 0.1,
        }
    }
}

/// Reveal state per observed element
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking another element; returns its id
    pub fn register(&mut self) -> usize {
        self.revealed.push(false);
        self.revealed.len() - 1
    }

    /// Number of registered elements
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, id: usize) -> bool {
        self.revealed.get(id).copied().unwrap_or(false)
    }

    /// Feed an intersection report; true exactly once per element, the first
    /// time it intersects
    pub fn on_intersect(&mut self, id: usize, intersecting: bool) -> bool {
        match self.revealed.get_mut(id) {
            Some(revealed) if intersecting && !*revealed => {
                *revealed = true;
                true
            }
            _ => false,
        }
    }

    /// True once every registered element has been revealed
    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|&r| r)
    }
}
