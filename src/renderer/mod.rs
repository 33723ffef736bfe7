//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles in logical
//! pixel coordinates; the pipeline maps them to the surface with letterboxing.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
