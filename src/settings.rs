//! Page settings
//!
//! Read from an inline JSON block in the page:
//!
//! ```html
//! <script type="application/json" id="constellation-settings">
//!   { "typewriter": { "phrases": ["Hello.", "World."] } }
//! </script>
//! ```
//!
//! Every field is optional; anything missing keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::RESIZE_SETTLE_MS;
use crate::sim::SceneConfig;
use crate::ui::{CursorConfig, HeaderConfig, RevealConfig, TypewriterConfig};

/// Everything a page can tune
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Star field ===
    /// Canvas element id
    pub canvas_id: String,
    pub scene: SceneConfig,
    /// Fixed simulation rate; `None` runs one tick per animation frame
    pub tick_rate_hz: Option<f32>,
    /// Resize events are coalesced over this window
    pub resize_settle_ms: u32,

    // === Page effects ===
    pub cursor: CursorConfig,
    pub header: HeaderConfig,
    pub typewriter: TypewriterConfig,
    pub reveal: RevealConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_id: "constellation-canvas".to_string(),
            scene: SceneConfig::default(),
            tick_rate_hz: None,
            resize_settle_ms: RESIZE_SETTLE_MS,

            cursor: CursorConfig::default(),
            header: HeaderConfig::default(),
            typewriter: TypewriterConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

impl Settings {
    /// Element id of the inline settings block
    pub const ELEMENT_ID: &'static str = "constellation-settings";

    /// Parse a (possibly partial) settings document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
