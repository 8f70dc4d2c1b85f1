//! Per-frame simulation step and draw emission

use super::input::InputTracker;
use super::state::Scene;
use crate::consts::RIPPLE_LINE_WIDTH;
use crate::draw::{DrawList, palette};

/// Advance the scene by one tick
///
/// Order within a tick is fixed: stars, shooting stars, ripple expiry and
/// growth, then the link pass. Stars see the ripples as they were at the
/// start of the tick.
pub fn tick(scene: &mut Scene, input: &InputTracker) {
    let pointer = input.pointer();
    let (width, height) = (scene.width, scene.height);
    let cfg = &scene.config;

    for star in &mut scene.stars {
        star.apply_forces(pointer, &scene.ripples, cfg);
        star.integrate(cfg.damping);
    }

    for shooting in &mut scene.shooting_stars {
        shooting.advance(&mut scene.rng, width, height, cfg);
    }

    scene.ripples.retain(|r| r.is_alive());
    for ripple in &mut scene.ripples {
        ripple.advance(cfg);
    }

    scene
        .grid
        .collect(&scene.stars, width, height, &mut scene.links);

    scene.time_ticks += 1;
}

/// Emit the current scene: stars, shooting stars, ripples, then links
pub fn draw(scene: &Scene, list: &mut DrawList) {
    let cfg = &scene.config;

    for star in &scene.stars {
        list.disc(star.pos, star.radius, palette::STAR);
    }

    for shooting in &scene.shooting_stars {
        list.segment(shooting.pos, shooting.tail(), shooting.size, palette::SHOOTING_STAR);
    }

    for ripple in &scene.ripples {
        let color = palette::with_alpha(palette::LAVENDER, ripple.alpha());
        list.ring(ripple.origin, ripple.radius, RIPPLE_LINE_WIDTH, color);
    }

    for link in &scene.links {
        let alpha = link.opacity(cfg.link_distance, cfg.link_opacity);
        let color = palette::with_alpha(palette::VIOLET, alpha);
        list.segment(scene.stars[link.a].pos, scene.stars[link.b].pos, 1.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Primitive;
    use crate::sim::{SceneConfig, Star};
    use glam::Vec2;

    fn scene(width: f32, height: f32, seed: u64) -> Scene {
        let mut scene = Scene::new(SceneConfig::default(), seed);
        scene.resize(width, height);
        scene.initialize();
        scene
    }

    #[test]
    fn test_click_ripple_lifecycle() {
        let mut scene = scene(800.0, 600.0, 12345);
        let mut input = InputTracker::new();
        input.pointer_down(Vec2::new(100.0, 100.0), Vec2::ZERO, &mut scene);
        input.pointer_up();

        assert_eq!(scene.ripples.len(), 1);
        assert_eq!(scene.ripples[0].origin, Vec2::new(100.0, 100.0));
        assert_eq!(scene.ripples[0].radius, 1.0);
        assert_eq!(scene.ripples[0].strength, 1.0);

        let mut last_strength = 1.0;
        let mut passed_cap = false;
        let mut removed_at = None;
        for n in 0..500 {
            let expired_before = scene.ripples.first().map(|r| r.strength <= 0.0);
            tick(&mut scene, &input);

            match scene.ripples.first() {
                Some(ripple) => {
                    assert_ne!(expired_before, Some(true), "expired ripple survived a tick");
                    assert!(ripple.strength <= last_strength);
                    if ripple.radius > 200.0 {
                        passed_cap = true;
                    } else {
                        assert_eq!(ripple.strength, 1.0);
                    }
                    last_strength = ripple.strength;
                }
                None => {
                    assert_eq!(expired_before, Some(true));
                    removed_at = Some(n);
                    break;
                }
            }
        }

        assert!(passed_cap);
        let removed_at = removed_at.expect("ripple never expired");
        // 40 ticks to pass the cap, ~50 to decay, one to drop it
        assert!((85..=95).contains(&removed_at), "removed at tick {removed_at}");

        for _ in 0..100 {
            tick(&mut scene, &input);
            assert!(scene.ripples.is_empty());
        }
    }

    #[test]
    fn test_stars_settle_without_input() {
        let mut scene = scene(600.0, 600.0, 9);
        let input = InputTracker::new();
        for _ in 0..50 {
            tick(&mut scene, &input);
        }
        for star in &scene.stars {
            assert_eq!(star.pos, star.base);
            assert_eq!(star.vel, Vec2::ZERO);
        }
        assert_eq!(scene.time_ticks, 50);
    }

    #[test]
    fn test_pointer_pulls_nearby_star() {
        let mut scene = Scene::new(SceneConfig::default(), 1);
        scene.resize(500.0, 500.0);
        scene.stars.push(Star::new(Vec2::new(100.0, 100.0), 1.0));

        let mut input = InputTracker::new();
        input.pointer_move(Vec2::new(150.0, 100.0), Vec2::ZERO);
        tick(&mut scene, &input);

        let star = &scene.stars[0];
        assert!(star.pos.x > 100.0);
        assert!((star.pos.y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_shooting_stars_stay_on_canvas() {
        let mut scene = scene(400.0, 300.0, 77);
        let input = InputTracker::new();
        for _ in 0..1000 {
            tick(&mut scene, &input);
            for s in &scene.shooting_stars {
                assert!(s.pos.x <= 400.0 && s.pos.y <= 300.0);
                assert!(s.pos.x >= 0.0 && s.pos.y >= 0.0);
            }
        }
        assert_eq!(scene.shooting_stars.len(), 3);
    }

    #[test]
    fn test_draw_order_and_counts() {
        let mut scene = Scene::new(SceneConfig::default(), 5);
        scene.resize(1000.0, 1000.0);
        scene.stars.push(Star::new(Vec2::new(10.0, 10.0), 1.0));
        scene.stars.push(Star::new(Vec2::new(70.0, 10.0), 1.2));
        scene.stars.push(Star::new(Vec2::new(900.0, 900.0), 0.5));
        scene.spawn_ripple(Vec2::new(500.0, 500.0));

        let input = InputTracker::new();
        tick(&mut scene, &input);

        let mut list = DrawList::new();
        draw(&scene, &mut list);

        let kinds: Vec<&str> = list
            .iter()
            .map(|p| match p {
                Primitive::Disc { .. } => "disc",
                Primitive::Segment { .. } => "segment",
                Primitive::Ring { .. } => "ring",
            })
            .collect();
        assert_eq!(
            kinds,
            ["disc", "disc", "disc", "ring", "segment"],
        );

        match list.primitives[4] {
            Primitive::Segment { width, color, .. } => {
                assert_eq!(width, 1.0);
                assert!((color[3] - 0.5 * 0.3).abs() < 1e-5);
                assert_eq!(&color[..3], &palette::VIOLET);
            }
            other => panic!("expected link segment, got {other:?}"),
        }
        match list.primitives[3] {
            Primitive::Ring { radius, width, color, .. } => {
                assert_eq!(radius, 6.0);
                assert_eq!(width, 2.0);
                assert!((color[3] - 0.5).abs() < 1e-6);
            }
            other => panic!("expected ripple ring, got {other:?}"),
        }
    }

    #[test]
    fn test_shooting_stars_drawn_after_stars() {
        let mut scene = scene(300.0, 300.0, 4);
        let input = InputTracker::new();
        tick(&mut scene, &input);
        let mut list = DrawList::new();
        draw(&scene, &mut list);

        let stars = scene.stars.len();
        for (i, p) in list.iter().enumerate() {
            match p {
                Primitive::Disc { color, .. } => {
                    assert!(i < stars);
                    assert_eq!(*color, palette::STAR);
                }
                Primitive::Segment { color, .. } if i < stars + 3 => {
                    assert_eq!(*color, palette::SHOOTING_STAR);
                }
                _ => assert!(i >= stars + 3),
            }
        }
    }
}
