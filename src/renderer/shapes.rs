//! Tessellation of draw primitives into triangles
//!
//! Only primitives overlapping the visible part of the page are emitted.
//! Strokes thinner than a pixel are widened to one pixel with their alpha
//! scaled down by the same factor, approximating the coverage a 2D canvas
//! would give them.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::draw::{Color, DrawList, Primitive};

/// Thinnest stroke actually rasterized
const MIN_STROKE: f32 = 1.0;
/// Smallest disc radius actually rasterized
const MIN_RADIUS: f32 = 0.5;

/// Visible rectangle of the page, in page pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Page position of the viewport's top-left corner (the scroll offset)
    pub origin: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// True if the box (min, max) touches the viewport
    pub fn overlaps(&self, (min, max): (Vec2, Vec2)) -> bool {
        let view_max = self.origin + self.size;
        max.x >= self.origin.x && max.y >= self.origin.y && min.x <= view_max.x && min.y <= view_max.y
    }

    /// Map a page position to clip space (-1..1, y up)
    pub fn to_ndc(&self, pos: Vec2) -> Vec2 {
        let local = (pos - self.origin) / self.size;
        Vec2::new(local.x * 2.0 - 1.0, 1.0 - local.y * 2.0)
    }
}

/// Circle segment count that keeps edges smooth at any radius
fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(8, 96)
}

/// Alpha scaled by how much of the minimum size the shape really covers
fn scaled(color: Color, factor: f32) -> Color {
    [color[0], color[1], color[2], color[3] * factor]
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: Color, out: &mut Vec<Vertex>) {
    let (radius, color) = if radius < MIN_RADIUS {
        let coverage = (radius / MIN_RADIUS).powi(2);
        (MIN_RADIUS, scaled(color, coverage))
    } else {
        (radius, color)
    };

    let segments = segments_for(radius);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        out.push(Vertex::at(center, color));
        out.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        out.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }
}

/// Circle outline of the given stroke width
pub fn ring(center: Vec2, radius: f32, width: f32, color: Color, out: &mut Vec<Vertex>) {
    let (width, color) = stroke(width, color);
    let inner_radius = (radius - width / 2.0).max(0.0);
    let outer_radius = radius + width / 2.0;

    let segments = segments_for(outer_radius);
    for i in 0..segments {
        let dir1 = Vec2::from_angle((i as f32 / segments as f32) * TAU);
        let dir2 = Vec2::from_angle(((i + 1) as f32 / segments as f32) * TAU);

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        out.push(Vertex::at(inner1, color));
        out.push(Vertex::at(outer1, color));
        out.push(Vertex::at(inner2, color));

        out.push(Vertex::at(inner2, color));
        out.push(Vertex::at(outer1, color));
        out.push(Vertex::at(outer2, color));
    }
}

/// Straight line of the given stroke width, as a quad
pub fn segment(from: Vec2, to: Vec2, width: f32, color: Color, out: &mut Vec<Vertex>) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let (width, color) = stroke(width, color);
    let perp = dir.perp() * (width / 2.0);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    out.push(Vertex::at(a1, color));
    out.push(Vertex::at(a2, color));
    out.push(Vertex::at(b1, color));

    out.push(Vertex::at(b1, color));
    out.push(Vertex::at(a2, color));
    out.push(Vertex::at(b2, color));
}

fn stroke(width: f32, color: Color) -> (f32, Color) {
    if width < MIN_STROKE {
        (MIN_STROKE, scaled(color, width.max(0.0) / MIN_STROKE))
    } else {
        (width, color)
    }
}

/// Tessellate every visible primitive, replacing the contents of `out`
pub fn tessellate(list: &DrawList, view: &Viewport, out: &mut Vec<Vertex>) {
    out.clear();
    for primitive in list.iter() {
        if primitive.alpha() <= 0.0 || !view.overlaps(primitive.bounds()) {
            continue;
        }
        match *primitive {
            Primitive::Disc { center, radius, color } => circle(center, radius, color, out),
            Primitive::Segment { from, to, width, color } => segment(from, to, width, color, out),
            Primitive::Ring { center, radius, width, color } => {
                ring(center, radius, width, color, out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::palette;

    fn view() -> Viewport {
        Viewport::new(Vec2::new(0.0, 1000.0), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_ndc_mapping_follows_scroll() {
        let v = view();
        assert_eq!(v.to_ndc(Vec2::new(0.0, 1000.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(v.to_ndc(Vec2::new(800.0, 1600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(v.to_ndc(Vec2::new(400.0, 1300.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_offscreen_primitives_culled() {
        let mut list = DrawList::new();
        list.disc(Vec2::new(100.0, 100.0), 1.0, palette::STAR); // above the fold
        list.disc(Vec2::new(100.0, 1100.0), 1.0, palette::STAR); // visible
        list.ring(Vec2::new(100.0, 800.0), 250.0, 2.0, palette::STAR); // reaches in
        list.segment(
            Vec2::new(10.0, 2000.0),
            Vec2::new(20.0, 2010.0),
            1.0,
            palette::STAR,
        ); // below

        let mut out = Vec::new();
        tessellate(&list, &view(), &mut out);

        let disc = segments_for(1.0) as usize * 3;
        let ring = segments_for(251.0) as usize * 6;
        assert_eq!(out.len(), disc + ring);
    }

    #[test]
    fn test_transparent_primitives_skipped() {
        let mut list = DrawList::new();
        list.ring(Vec2::new(100.0, 1100.0), 50.0, 2.0, palette::with_alpha(palette::LAVENDER, 0.0));
        let mut out = Vec::new();
        tessellate(&list, &view(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_hairline_widened_and_faded() {
        let mut out = Vec::new();
        segment(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.25, [1.0, 1.0, 1.0, 0.8], &mut out);
        assert_eq!(out.len(), 6);
        for v in &out {
            assert!((v.position[1].abs() - 0.5).abs() < 1e-6);
            assert!((v.color[3] - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_segment_emits_nothing() {
        let mut out = Vec::new();
        segment(Vec2::ONE, Vec2::ONE, 1.0, palette::STAR, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_tiny_disc_keeps_coverage() {
        let mut out = Vec::new();
        circle(Vec2::ZERO, 0.25, [1.0, 1.0, 1.0, 1.0], &mut out);
        assert!(!out.is_empty());
        assert!((out[0].color[3] - 0.25).abs() < 1e-6);
    }
}
