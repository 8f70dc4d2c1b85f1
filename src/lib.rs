//! Constellation - interactive starfield background for a portfolio page
//!
//! Core modules:
//! - `sim`: Star field simulation (stars, shooting stars, ripples, links)
//! - `draw`: Backend-neutral draw list the simulation renders into
//! - `renderer`: WebGPU tessellation and render pipeline
//! - `ui`: Page effects (cursor, header, typewriter, scroll reveal)
//! - `platform`: Frame pacing and debounced timers
//! - `settings`: Tunables, loadable from an inline JSON block

pub mod draw;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use draw::{DrawList, Primitive};
pub use settings::Settings;

/// Default tuning constants
///
/// Velocities and distances are in CSS pixels per tick; one tick is one
/// animation frame unless a fixed tick rate is configured.
pub mod consts {
    /// Canvas area (px²) per star
    pub const STAR_DENSITY_AREA: f32 = 9000.0;
    /// Star radius is sampled from `[0, STAR_MAX_RADIUS)`
    pub const STAR_MAX_RADIUS: f32 = 1.5;

    /// Number of concurrent shooting stars
    pub const SHOOTING_STAR_COUNT: usize = 3;
    /// Shooting star streak length range
    pub const SHOOTING_STAR_LEN: (f32, f32) = (10.0, 90.0);
    /// Shooting star speed range
    pub const SHOOTING_STAR_SPEED: (f32, f32) = (6.0, 16.0);
    /// Shooting star stroke width range
    pub const SHOOTING_STAR_SIZE: (f32, f32) = (0.1, 1.1);
    /// Always shoot down-right
    pub const SHOOTING_STAR_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Pointer attraction only applies within this distance
    pub const POINTER_RADIUS: f32 = 200.0;
    /// Pointer attraction per tick (unit direction scale)
    pub const POINTER_FORCE: f32 = 0.05;

    /// Ripple starting radius
    pub const RIPPLE_START_RADIUS: f32 = 1.0;
    /// Ripple radius growth per tick
    pub const RIPPLE_SPEED: f32 = 5.0;
    /// Strength starts decaying past this radius
    pub const RIPPLE_MAX_RADIUS: f32 = 200.0;
    /// Strength lost per tick past the cap
    pub const RIPPLE_DECAY: f32 = 0.02;
    /// Width of the repulsion band just inside the ring
    pub const RIPPLE_BAND: f32 = 50.0;
    /// Repulsion scale
    pub const RIPPLE_FORCE: f32 = 0.1;
    /// Ring stroke width
    pub const RIPPLE_LINE_WIDTH: f32 = 2.0;

    /// Spring constant pulling a star to its base position
    pub const SPRING: f32 = 0.01;
    /// Velocity multiplier applied after integration
    pub const DAMPING: f32 = 0.95;

    /// Max distance for a connecting line
    pub const LINK_DISTANCE: f32 = 120.0;
    /// Line alpha at zero distance
    pub const LINK_OPACITY: f32 = 0.3;

    /// Resize events are coalesced over this window
    pub const RESIZE_SETTLE_MS: u32 = 250;
    /// Maximum substeps per frame when a fixed tick rate is configured
    pub const MAX_SUBSTEPS: u32 = 8;
}
