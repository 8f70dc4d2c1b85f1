//! Platform helpers
//!
//! Browser-agnostic pieces of the event loop:
//! - Frame pacing for `requestAnimationFrame`
//! - Debounced timers for resize bursts

pub mod clock;
pub mod debounce;

pub use clock::FrameClock;
pub use debounce::Debouncer;
