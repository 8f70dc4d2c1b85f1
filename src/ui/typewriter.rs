//! Typewriter text effect
//!
//! Types each phrase one character at a time, holds it, erases it, then
//! moves on to the next phrase, forever. The DOM side calls [`Typewriter::step`],
//! writes the returned text, and schedules the next step after the returned
//! delay.

use serde::{Deserialize, Serialize};

/// Timings and phrases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Element whose text content is replaced
    pub element_id: String,
    pub phrases: Vec<String>,
    /// Delay after typing a character
    pub type_delay_ms: u32,
    /// Delay after erasing a character
    pub delete_delay_ms: u32,
    /// Pause with the full phrase shown
    pub hold_ms: u32,
    /// Pause with the phrase erased, before the next one
    pub next_phrase_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            element_id: "typing-effect".to_string(),
            phrases: vec![
                "Creative Developer.".to_string(),
                "Problem Solver.".to_string(),
                "UI/UX Enthusiast.".to_string(),
                "Tech Architect.".to_string(),
            ],
            type_delay_ms: 150,
            delete_delay_ms: 75,
            hold_ms: 2000,
            next_phrase_ms: 500,
        }
    }
}

/// Output of one step: what to display and how long until the next step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    /// Phrases as char vectors so indexing is by character, not byte
    phrases: Vec<Vec<char>>,
    phrase: usize,
    /// Characters currently shown
    shown: usize,
    deleting: bool,
    type_delay_ms: u32,
    delete_delay_ms: u32,
    hold_ms: u32,
    next_phrase_ms: u32,
}

impl Typewriter {
    /// Build from config; `None` if there is nothing to type
    pub fn new(config: &TypewriterConfig) -> Option<Self> {
        let phrases: Vec<Vec<char>> = config
            .phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            phrase: 0,
            shown: 0,
            deleting: false,
            type_delay_ms: config.type_delay_ms,
            delete_delay_ms: config.delete_delay_ms,
            hold_ms: config.hold_ms,
            next_phrase_ms: config.next_phrase_ms,
        })
    }

    /// Index of the phrase being typed or erased
    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    /// Type or erase one character
    pub fn step(&mut self) -> Frame {
        let len = self.phrases[self.phrase].len();
        if self.deleting {
            self.shown -= 1;
        } else {
            self.shown += 1;
        }
        let text = self.phrases[self.phrase][..self.shown].iter().collect();

        let delay_ms = if !self.deleting && self.shown == len {
            self.deleting = true;
            self.hold_ms
        } else if self.deleting && self.shown == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            self.next_phrase_ms
        } else if self.deleting {
            self.delete_delay_ms
        } else {
            self.type_delay_ms
        };

        Frame { text, delay_ms }
    }
}
