//! WebGPU rendering module
//!
//! Shapes are built on the CPU as vertex-colored triangles each frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;
