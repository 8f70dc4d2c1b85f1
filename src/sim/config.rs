//! Tunable scene parameters
//!
//! Defaults come from [`crate::consts`]. Every field can be overridden from
//! the page's settings block; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // === Population ===
    /// Canvas area (px²) per star
    pub density_area: f32,
    /// Star radius upper bound (exclusive)
    pub star_max_radius: f32,
    /// Number of shooting stars kept alive
    pub shooting_star_count: usize,
    /// Shooting star length range [min, max)
    pub shooting_star_len: (f32, f32),
    /// Shooting star speed range [min, max)
    pub shooting_star_speed: (f32, f32),
    /// Shooting star stroke width range [min, max)
    pub shooting_star_size: (f32, f32),

    // === Forces ===
    pub pointer_radius: f32,
    pub pointer_force: f32,
    pub spring: f32,
    pub damping: f32,

    // === Ripples ===
    pub ripple_speed: f32,
    pub ripple_max_radius: f32,
    pub ripple_decay: f32,
    pub ripple_band: f32,
    pub ripple_force: f32,

    // === Links ===
    pub link_distance: f32,
    pub link_opacity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            density_area: STAR_DENSITY_AREA,
            star_max_radius: STAR_MAX_RADIUS,
            shooting_star_count: SHOOTING_STAR_COUNT,
            shooting_star_len: SHOOTING_STAR_LEN,
            shooting_star_speed: SHOOTING_STAR_SPEED,
            shooting_star_size: SHOOTING_STAR_SIZE,

            pointer_radius: POINTER_RADIUS,
            pointer_force: POINTER_FORCE,
            spring: SPRING,
            damping: DAMPING,

            ripple_speed: RIPPLE_SPEED,
            ripple_max_radius: RIPPLE_MAX_RADIUS,
            ripple_decay: RIPPLE_DECAY,
            ripple_band: RIPPLE_BAND,
            ripple_force: RIPPLE_FORCE,

            link_distance: LINK_DISTANCE,
            link_opacity: LINK_OPACITY,
        }
    }
}

impl SceneConfig {
    /// Number of stars for a canvas of the given size
    pub fn star_count(&self, width: f32, height: f32) -> usize {
        if width <= 0.0 || height <= 0.0 || self.density_area <= 0.0 {
            return 0;
        }
        // Page areas pass 2^24 px², beyond exact f32 integers
        (f64::from(width) * f64::from(height) / f64::from(self.density_area)).floor() as usize
    }
}
