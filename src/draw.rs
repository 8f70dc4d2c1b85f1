//! Backend-neutral draw list
//!
//! The simulation describes each frame as a flat list of primitives in page
//! coordinates. The renderer turns them into triangles; tests inspect them
//! directly.

use glam::Vec2;

/// RGBA color, straight (non-premultiplied) alpha, components in 0-1
pub type Color = [f32; 4];

/// Page palette
pub mod palette {
    use super::Color;

    /// Lavender, rgb(196, 181, 253)
    pub const LAVENDER: [f32; 3] = [196.0 / 255.0, 181.0 / 255.0, 253.0 / 255.0];
    /// Violet, rgb(139, 92, 246)
    pub const VIOLET: [f32; 3] = [139.0 / 255.0, 92.0 / 255.0, 246.0 / 255.0];

    pub const STAR: Color = with_alpha(LAVENDER, 0.7);
    pub const SHOOTING_STAR: Color = with_alpha(LAVENDER, 0.5);

    /// Attach an alpha channel to an rgb triple
    pub const fn with_alpha(rgb: [f32; 3], alpha: f32) -> Color {
        [rgb[0], rgb[1], rgb[2], alpha]
    }
}

/// A single drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled circle
    Disc { center: Vec2, radius: f32, color: Color },
    /// Stroked straight line
    Segment { from: Vec2, to: Vec2, width: f32, color: Color },
    /// Stroked circle outline
    Ring { center: Vec2, radius: f32, width: f32, color: Color },
}

impl Primitive {
    /// Axis-aligned bounds (min, max), including stroke width
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match *self {
            Primitive::Disc { center, radius, .. } => {
                (center - Vec2::splat(radius), center + Vec2::splat(radius))
            }
            Primitive::Segment { from, to, width, .. } => {
                let pad = Vec2::splat(width / 2.0);
                (from.min(to) - pad, from.max(to) + pad)
            }
            Primitive::Ring { center, radius, width, .. } => {
                let r = radius + width / 2.0;
                (center - Vec2::splat(r), center + Vec2::splat(r))
            }
        }
    }

    /// Alpha channel of the primitive's color
    pub fn alpha(&self) -> f32 {
        match self {
            Primitive::Disc { color, .. }
            | Primitive::Segment { color, .. }
            | Primitive::Ring { color, .. } => color[3],
        }
    }
}

/// Ordered primitives for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything from the previous frame, keeping the allocation
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.primitives.push(Primitive::Disc { center, radius, color });
    }

    pub fn segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.primitives.push(Primitive::Segment { from, to, width, color });
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.primitives.push(Primitive::Ring { center, radius, width, color });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }
}
