//! Page effects outside the star field
//!
//! Each effect is a small state machine; the wasm entry point wires them to
//! DOM events and applies what they return.

pub mod cursor;
pub mod header;
pub mod reveal;
pub mod typewriter;

pub use cursor::{CursorConfig, CursorFollower};
pub use header::{HeaderConfig, HeaderScrollToggle};
pub use reveal::{RevealConfig, RevealTracker};
pub use typewriter::{Typewriter, TypewriterConfig};
