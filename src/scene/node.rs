use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};
use glam::Affine3A;

/// A scene node.
///
/// Nodes form a tree through parent/child handles and carry a [`Transform`]
/// plus optional component keys into the scene's mesh, camera, and light
/// storages. The name is used by the animation binder to resolve keyframe
/// tracks to nodes.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    /// Parent node handle (None for root nodes)
    pub(crate) parent: Option<NodeHandle>,
    /// Child node handles
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,
    pub visible: bool,

    pub mesh: Option<MeshKey>,
    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
            camera: None,
            light: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the world transformation matrix.
    ///
    /// Updated by [`Scene::update_matrix_world`] each frame.
    ///
    /// [`Scene::update_matrix_world`]: crate::scene::Scene::update_matrix_world
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        self.transform.world_matrix()
    }
}
