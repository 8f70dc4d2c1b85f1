//! Pointer tracking
//!
//! Browser pointer events arrive in viewport (client) coordinates; the star
//! field lives in page coordinates. The tracker keeps the last client
//! position and the scroll offset so the page-space pointer stays correct
//! when the page scrolls under a stationary mouse.

use glam::Vec2;

use super::state::Scene;

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Last viewport position, `None` until the first pointer event
    client: Option<Vec2>,
    /// Page scroll offset
    scroll: Vec2,
    pressed: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer position in page coordinates
    pub fn pointer(&self) -> Option<Vec2> {
        self.client.map(|c| c + self.scroll)
    }

    /// Last pointer position in viewport coordinates
    pub fn client(&self) -> Option<Vec2> {
        self.client
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn pointer_move(&mut self, client: Vec2, scroll: Vec2) {
        self.client = Some(client);
        self.scroll = scroll;
    }

    /// Page scrolled; the pointer keeps its viewport position
    pub fn scroll_to(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Press: move the pointer there and drop a ripple on the scene
    pub fn pointer_down(&mut self, client: Vec2, scroll: Vec2, scene: &mut Scene) {
        self.pointer_move(client, scroll);
        self.pressed = true;
        let origin = client + scroll;
        scene.spawn_ripple(origin);
        log::debug!("Ripple at ({:.0}, {:.0})", origin.x, origin.y);
    }

    pub fn pointer_up(&mut self) {
        self.pressed = false;
    }
}
