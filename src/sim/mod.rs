//! Star field simulation
//!
//! All per-frame logic lives here. This module must stay platform-free:
//! - Seeded RNG only
//! - Pointer state is passed in, never read from globals
//! - Output goes through a `DrawList`, never a rendering API

pub mod config;
pub mod input;
pub mod links;
pub mod state;
pub mod tick;

pub use config::SceneConfig;
pub use input::InputTracker;
pub use links::{Link, LinkGrid};
pub use state::{Ripple, Scene, ShootingStar, Star};
pub use tick::{draw, tick};
