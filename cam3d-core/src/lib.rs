//! cam3d Core Library - transform and camera math
//!
//! This library provides the stateless math core for the demo renderers:
//! vector and matrix types for the model/view/projection pipeline, a camera
//! wrapper, and the geometry primitives the front-ends draw.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod mat4;
pub mod vec3;

// Re-export commonly used types
pub use camera::{project_to_screen, Camera, ProjectionMode};
pub use error::MathError;
pub use geometry::{Mesh, Triangle, Vertex};
pub use mat4::Mat4;
pub use vec3::Vec3;
