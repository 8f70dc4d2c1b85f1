//! Custom cursor ring that follows the pointer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub enabled: bool,
    /// Ring diameter (px)
    pub size: f64,
    /// Scale while the button is held
    pub pressed_scale: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 20.0,
            pressed_scale: 1.5,
        }
    }
}

impl CursorConfig {
    /// Inline style for the ring element; starts off-screen until the first move
    pub fn css_text(&self) -> String {
        let offscreen = -(self.size + 10.0);
        format!(
            "position: fixed; width: {size}px; height: {size}px; \
             border: 2px solid rgba(196, 181, 253, 0.7); border-radius: 50%; \
             left: {offscreen}px; top: {offscreen}px; pointer-events: none; \
             z-index: 9999; transition: transform 0.2s ease-out; \
             mix-blend-mode: difference;",
            size = self.size,
        )
    }
}

/// Position and press state of the ring
#[derive(Debug, Clone)]
pub struct CursorFollower {
    half: f64,
    pressed_scale: f64,
    left: f64,
    top: f64,
    pressed: bool,
}

impl CursorFollower {
    pub fn new(config: &CursorConfig) -> Self {
        let offscreen = -(config.size + 10.0);
        Self {
            half: config.size / 2.0,
            pressed_scale: config.pressed_scale,
            left: offscreen,
            top: offscreen,
            pressed: false,
        }
    }

    /// Center the ring on a viewport position; returns (left, top)
    pub fn on_move(&mut self, client_x: f64, client_y: f64) -> (f64, f64) {
        self.left = client_x - self.half;
        self.top = client_y - self.half;
        (self.left, self.top)
    }

    pub fn on_down(&mut self) -> String {
        self.pressed = true;
        self.transform()
    }

    pub fn on_up(&mut self) -> String {
        self.pressed = false;
        self.transform()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    pub fn scale(&self) -> f64 {
        if self.pressed { self.pressed_scale } else { 1.0 }
    }

    /// CSS transform for the current press state
    pub fn transform(&self) -> String {
        format!("scale({})", self.scale())
    }
}
