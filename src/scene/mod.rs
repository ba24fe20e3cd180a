//! Scene graph module.
//!
//! Manages the scene hierarchy and its components:
//! - [`Node`]: a scene node with parent/child links and a transform
//! - [`Transform`]: TRS component with cached local/world matrices
//! - [`Scene`]: the container that owns nodes, meshes, cameras, and lights
//! - [`Camera`] / [`Light`]: components referenced from nodes
//! - [`Mesh`] / [`Geometry`]: renderable surface data

pub mod camera;
pub mod light;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::{Camera, ProjectionType};
pub use light::{Light, LightKind};
pub use mesh::{Geometry, Mesh};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
