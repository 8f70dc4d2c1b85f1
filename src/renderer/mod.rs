//! WebGPU rendering module
//!
//! Draw lists are tessellated on the CPU into colored triangles and drawn
//! with a single alpha-blended pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use shapes::Viewport;
pub use vertex::Vertex;
