//! Scene state and entity types
//!
//! Everything the per-frame tick reads or mutates lives here. Randomness
//! comes only from the scene's seeded RNG, so a scene built from the same
//! seed and fed the same input evolves identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::config::SceneConfig;
use super::links::{Link, LinkGrid};
use crate::consts::{RIPPLE_START_RADIUS, SHOOTING_STAR_ANGLE};

/// Sample from `[lo, hi)`, or `lo` when the range is empty
pub(crate) fn sample(rng: &mut Pcg32, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// A background point pulled by the pointer, pushed by ripples, and sprung
/// back to where it spawned
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Rest position, fixed at creation
    pub base: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Star {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            base: pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Accumulate pointer attraction, ripple repulsion and the base spring
    /// into the velocity
    pub fn apply_forces(&mut self, pointer: Option<Vec2>, ripples: &[Ripple], cfg: &SceneConfig) {
        if let Some(pointer) = pointer {
            let to_pointer = pointer - self.pos;
            let dist = to_pointer.length();
            if dist > 0.0 && dist < cfg.pointer_radius {
                self.vel += to_pointer / dist * cfg.pointer_force;
            }
        }

        for ripple in ripples {
            let away = self.pos - ripple.origin;
            let dist = away.length();
            if dist > 0.0 && dist < ripple.radius && dist > ripple.radius - cfg.ripple_band {
                self.vel += away / dist
                    * (ripple.radius / dist)
                    * cfg.ripple_force
                    * ripple.strength;
            }
        }

        self.vel += (self.base - self.pos) * cfg.spring;
    }

    /// Move by the current velocity, then damp it
    pub fn integrate(&mut self, damping: f32) {
        self.pos += self.vel;
        self.vel *= damping;
    }
}

/// A diagonal streak that restarts from the top edge after leaving the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Head of the streak
    pub pos: Vec2,
    pub len: f32,
    pub speed: f32,
    /// Stroke width
    pub size: f32,
    /// Travel direction (radians), constant for the entity's lifetime
    pub angle: f32,
}

impl ShootingStar {
    pub fn new(rng: &mut Pcg32, width: f32, cfg: &SceneConfig) -> Self {
        let mut star = Self {
            pos: Vec2::ZERO,
            len: 0.0,
            speed: 0.0,
            size: 0.0,
            angle: SHOOTING_STAR_ANGLE,
        };
        star.reset(rng, width, cfg);
        star
    }

    /// Pick a new random trajectory starting on the top edge
    pub fn reset(&mut self, rng: &mut Pcg32, width: f32, cfg: &SceneConfig) {
        self.pos = Vec2::new(sample(rng, (0.0, width)), 0.0);
        self.len = sample(rng, cfg.shooting_star_len);
        self.speed = sample(rng, cfg.shooting_star_speed);
        self.size = sample(rng, cfg.shooting_star_size);
        self.angle = SHOOTING_STAR_ANGLE;
    }

    /// Unit travel direction
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// End of the streak, `len` ahead of the head
    pub fn tail(&self) -> Vec2 {
        self.pos + self.direction() * self.len
    }

    /// True once the head has left the canvas through the bottom or right edge
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.y > height || self.pos.x > width
    }

    /// Move one tick along the trajectory, resetting if it left the canvas
    pub fn advance(&mut self, rng: &mut Pcg32, width: f32, height: f32, cfg: &SceneConfig) {
        self.pos += self.direction() * self.speed;
        if self.is_out_of_bounds(width, height) {
            self.reset(rng, width, cfg);
        }
    }
}

/// An expanding ring spawned by a click
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    pub origin: Vec2,
    pub radius: f32,
    /// 1 at spawn; starts decaying once the radius passes the cap
    pub strength: f32,
}

impl Ripple {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            radius: RIPPLE_START_RADIUS,
            strength: 1.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.strength > 0.0
    }

    /// Grow by one tick; decay strength once past the cap
    pub fn advance(&mut self, cfg: &SceneConfig) {
        self.radius += cfg.ripple_speed;
        if self.radius > cfg.ripple_max_radius {
            self.strength -= cfg.ripple_decay;
        }
    }

    /// Stroke alpha for the ring
    pub fn alpha(&self) -> f32 {
        (self.strength * 0.5).clamp(0.0, 1.0)
    }
}

/// The whole star field
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: SceneConfig,
    /// Drawing surface size in page pixels
    pub width: f32,
    pub height: f32,
    pub stars: Vec<Star>,
    pub shooting_stars: Vec<ShootingStar>,
    /// Active ripples, oldest first
    pub ripples: Vec<Ripple>,
    /// Star pairs close enough to connect, rebuilt every tick
    pub links: Vec<Link>,
    /// Ticks since creation
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) grid: LinkGrid,
}

impl Scene {
    /// Create an empty scene; call [`Scene::resize`] and
    /// [`Scene::initialize`] before ticking
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let grid = LinkGrid::new(config.link_distance);
        Self {
            config,
            width: 0.0,
            height: 0.0,
            stars: Vec::new(),
            shooting_stars: Vec::new(),
            ripples: Vec::new(),
            links: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            grid,
        }
    }

    /// Set the drawing surface size (negative sizes clamp to zero)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Repopulate stars and shooting stars for the current size
    ///
    /// Ripples in flight are kept.
    pub fn initialize(&mut self) {
        let count = self.config.star_count(self.width, self.height);
        let (width, height) = (self.width, self.height);

        self.stars.clear();
        self.stars.reserve(count);
        for _ in 0..count {
            let radius = sample(&mut self.rng, (0.0, self.config.star_max_radius));
            let x = sample(&mut self.rng, (0.0, width));
            let y = sample(&mut self.rng, (0.0, height));
            self.stars.push(Star::new(Vec2::new(x, y), radius));
        }

        self.shooting_stars.clear();
        for _ in 0..self.config.shooting_star_count {
            let star = ShootingStar::new(&mut self.rng, width, &self.config);
            self.shooting_stars.push(star);
        }

        self.links.clear();
    }

    /// Spawn a ripple centered on a page-space point
    pub fn spawn_ripple(&mut self, origin: Vec2) {
        self.ripples.push(Ripple::new(origin));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_star_spring_pulls_back_to_base() {
        let cfg = SceneConfig::default();
        let mut star = Star::new(Vec2::new(50.0, 50.0), 1.0);
        star.pos = Vec2::new(60.0, 50.0);
        for _ in 0..2000 {
            star.apply_forces(None, &[], &cfg);
            star.integrate(cfg.damping);
        }
        assert!((star.pos - star.base).length() < 0.01);
    }

    #[test]
    fn test_pointer_attracts_within_radius() {
        let cfg = SceneConfig::default();
        let mut star = Star::new(Vec2::new(100.0, 100.0), 1.0);
        star.apply_forces(Some(Vec2::new(200.0, 100.0)), &[], &cfg);
        assert!((star.vel.x - cfg.pointer_force).abs() < 1e-6);
        assert_eq!(star.vel.y, 0.0);

        let mut far = Star::new(Vec2::new(100.0, 100.0), 1.0);
        far.apply_forces(Some(Vec2::new(400.0, 100.0)), &[], &cfg);
        assert_eq!(far.vel, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_on_star_is_ignored() {
        let cfg = SceneConfig::default();
        let mut star = Star::new(Vec2::new(10.0, 10.0), 1.0);
        star.apply_forces(Some(Vec2::new(10.0, 10.0)), &[], &cfg);
        assert!(star.vel.is_finite());
        assert_eq!(star.vel, Vec2::ZERO);
    }

    #[test]
    fn test_ripple_repels_only_inside_band() {
        let cfg = SceneConfig::default();
        let ripple = Ripple {
            origin: Vec2::ZERO,
            radius: 100.0,
            strength: 1.0,
        };

        // dist 80: inside (50, 100)
        let mut inside = Star::new(Vec2::new(80.0, 0.0), 1.0);
        inside.apply_forces(None, std::slice::from_ref(&ripple), &cfg);
        let expected = (100.0 / 80.0) * cfg.ripple_force;
        assert!((inside.vel.x - expected).abs() < 1e-6);

        // dist 30: behind the band
        let mut behind = Star::new(Vec2::new(30.0, 0.0), 1.0);
        behind.apply_forces(None, std::slice::from_ref(&ripple), &cfg);
        assert_eq!(behind.vel, Vec2::ZERO);

        // dist 120: ring hasn't reached it yet
        let mut ahead = Star::new(Vec2::new(0.0, 120.0), 1.0);
        ahead.apply_forces(None, std::slice::from_ref(&ripple), &cfg);
        assert_eq!(ahead.vel, Vec2::ZERO);
    }

    #[test]
    fn test_ripple_strength_scales_repulsion() {
        let cfg = SceneConfig::default();
        let weak = Ripple {
            origin: Vec2::ZERO,
            radius: 100.0,
            strength: 0.25,
        };
        let mut star = Star::new(Vec2::new(0.0, 75.0), 1.0);
        star.apply_forces(None, &[weak], &cfg);
        let expected = (100.0 / 75.0) * cfg.ripple_force * 0.25;
        assert!((star.vel.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_ripple_growth_and_decay() {
        let cfg = SceneConfig::default();
        let mut ripple = Ripple::new(Vec2::new(5.0, 5.0));
        assert_eq!(ripple.radius, 1.0);
        assert_eq!(ripple.strength, 1.0);

        for _ in 0..39 {
            ripple.advance(&cfg);
        }
        assert_eq!(ripple.radius, 196.0);
        assert_eq!(ripple.strength, 1.0);

        ripple.advance(&cfg);
        assert_eq!(ripple.radius, 201.0);
        assert!(ripple.strength < 1.0);
        assert!((ripple.alpha() - ripple.strength * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shooting_star_moves_down_right() {
        let cfg = SceneConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut star = ShootingStar::new(&mut rng, 800.0, &cfg);
        star.pos = Vec2::new(100.0, 100.0);
        star.speed = 10.0;
        star.advance(&mut rng, 800.0, 600.0, &cfg);
        let step = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((star.pos.x - (100.0 + step)).abs() < 1e-4);
        assert!((star.pos.y - (100.0 + step)).abs() < 1e-4);
        assert!(star.tail().x > star.pos.x && star.tail().y > star.pos.y);
    }

    #[test]
    fn test_shooting_star_resets_past_bottom() {
        let cfg = SceneConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut star = ShootingStar::new(&mut rng, 800.0, &cfg);
        star.pos = Vec2::new(10.0, 599.0);
        star.speed = 15.0;
        star.advance(&mut rng, 800.0, 600.0, &cfg);
        assert_eq!(star.pos.y, 0.0);
        assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
        assert_eq!(star.angle, SHOOTING_STAR_ANGLE);
    }

    #[test]
    fn test_zero_width_scene_has_nothing_to_sample() {
        let mut scene = Scene::new(SceneConfig::default(), 1);
        scene.resize(0.0, 900.0);
        scene.initialize();
        assert!(scene.stars.is_empty());
        assert_eq!(scene.shooting_stars.len(), 3);
        assert!(scene.shooting_stars.iter().all(|s| s.pos == Vec2::ZERO));
    }

    #[test]
    fn test_initialize_keeps_ripples() {
        let mut scene = Scene::new(SceneConfig::default(), 1);
        scene.resize(300.0, 300.0);
        scene.initialize();
        scene.spawn_ripple(Vec2::new(10.0, 10.0));
        scene.initialize();
        assert_eq!(scene.ripples.len(), 1);
    }

    #[test]
    fn test_same_seed_same_population() {
        let mut a = Scene::new(SceneConfig::default(), 42);
        let mut b = Scene::new(SceneConfig::default(), 42);
        for scene in [&mut a, &mut b] {
            scene.resize(640.0, 480.0);
            scene.initialize();
        }
        assert_eq!(a.stars, b.stars);
        assert_eq!(a.shooting_stars, b.shooting_stars);
    }

    #[test]
    fn test_initialize_tall_page() {
        let mut scene = Scene::new(SceneConfig::default(), 11);
        scene.resize(1439.0, 14041.0);
        scene.initialize();
        assert_eq!(scene.stars.len(), 2244);
        assert!(scene.stars.iter().all(|s| {
            (0.0..1439.0).contains(&s.pos.x) && (0.0..14041.0).contains(&s.pos.y)
        }));
    }

    proptest! {
        #[test]
        fn prop_initialize_count_and_bounds(w in 1u32..2560, h in 1u32..40_000, seed in any::<u64>()) {
            let expected = (u64::from(w) * u64::from(h) / 9000) as usize;
            let (w, h) = (w as f32, h as f32);
            let mut scene = Scene::new(SceneConfig::default(), seed);
            scene.resize(w, h);
            scene.initialize();

            prop_assert_eq!(scene.stars.len(), expected);
            prop_assert_eq!(scene.shooting_stars.len(), 3);
            for star in &scene.stars {
                prop_assert!(star.pos.x >= 0.0 && star.pos.x < w);
                prop_assert!(star.pos.y >= 0.0 && star.pos.y < h);
                prop_assert!(star.radius >= 0.0 && star.radius < 1.5);
                prop_assert_eq!(star.pos, star.base);
                prop_assert_eq!(star.vel, Vec2::ZERO);
            }
        }

        #[test]
        fn prop_shooting_star_reset_ranges(w in 1u32..4000, seed in any::<u64>()) {
            let cfg = SceneConfig::default();
            let w = w as f32;
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut star = ShootingStar::new(&mut rng, w, &cfg);
            star.pos = Vec2::new(w + 1.0, 5.0);
            star.advance(&mut rng, w, 10_000.0, &cfg);

            prop_assert!(star.pos.x >= 0.0 && star.pos.x < w);
            prop_assert_eq!(star.pos.y, 0.0);
            prop_assert!(star.len >= 10.0 && star.len < 90.0);
            prop_assert!(star.speed >= 6.0 && star.speed < 16.0);
            prop_assert!(star.size >= 0.1 && star.size < 1.1);
        }

        #[test]
        fn prop_resize_same_size_same_count(w in 1u32..2000, h in 1u32..3000, seed in any::<u64>()) {
            let mut scene = Scene::new(SceneConfig::default(), seed);
            scene.resize(w as f32, h as f32);
            scene.initialize();
            let first = scene.stars.len();
            scene.resize(w as f32, h as f32);
            scene.initialize();
            prop_assert_eq!(scene.stars.len(), first);
        }
    }
}
