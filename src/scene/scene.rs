use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// The scene container.
///
/// Owns all nodes and their components in slotmap storages. Nodes reference
/// meshes, cameras, and lights by key; the hierarchy is expressed through
/// parent/child handles on the nodes themselves plus the `root_nodes` list.
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    root_nodes: Vec<NodeHandle>,

    meshes: SlotMap<MeshKey, Mesh>,
    cameras: SlotMap<CameraKey, Camera>,
    lights: SlotMap<LightKey, Light>,

    /// The camera node used for rendering.
    pub active_camera: Option<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            active_camera: None,
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Inserts a node without attaching it to the hierarchy.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        self.nodes.insert(node)
    }

    /// Creates a named root-level node.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeHandle {
        let handle = self.nodes.insert(Node::new(name));
        self.root_nodes.push(handle);
        handle
    }

    /// Attaches `child` under `parent`, detaching it from any previous parent
    /// and removing it from the root list if it was there.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle) {
        if parent == child {
            return;
        }

        if let Some(old_parent) = self.nodes.get(child).and_then(Node::parent) {
            if old_parent == parent {
                return;
            }
            if let Some(old) = self.nodes.get_mut(old_parent) {
                old.children.retain(|&c| c != child);
            }
        }
        self.root_nodes.retain(|&r| r != child);

        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn root_nodes(&self) -> &[NodeHandle] {
        &self.root_nodes
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    /// Depth-first search for a node by name under `root` (inclusive).
    #[must_use]
    pub fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                if node.name == name {
                    return Some(handle);
                }
                stack.extend(node.children.iter().copied());
            }
        }
        None
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    #[inline]
    #[must_use]
    pub fn get_mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    /// Creates a root node carrying a camera component and marks it active if
    /// no camera was active yet.
    pub fn add_camera_node(&mut self, name: impl Into<String>, camera: Camera) -> NodeHandle {
        let key = self.cameras.insert(camera);
        let handle = self.create_node(name);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.camera = Some(key);
        }
        if self.active_camera.is_none() {
            self.active_camera = Some(handle);
        }
        handle
    }

    /// Creates a root node carrying a light component.
    pub fn add_light_node(&mut self, name: impl Into<String>, light: Light) -> NodeHandle {
        let key = self.lights.insert(light);
        let handle = self.create_node(name);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.light = Some(key);
        }
        handle
    }

    #[inline]
    #[must_use]
    pub fn get_camera(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key)
    }

    #[inline]
    pub fn get_camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key)
    }

    #[inline]
    #[must_use]
    pub fn get_light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    /// Mutable access to the active camera node's transform and camera
    /// component together. Used by camera controllers.
    pub fn query_active_camera(&mut self) -> Option<(&mut crate::scene::Transform, &mut Camera)> {
        let handle = self.active_camera?;
        let node = self.nodes.get_mut(handle)?;
        let key = node.camera?;
        let camera = self.cameras.get_mut(key)?;
        Some((&mut node.transform, camera))
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Propagates world matrices through the hierarchy, then refreshes camera
    /// view matrices from their nodes' world transforms.
    pub fn update(&mut self) {
        self.update_matrix_world();

        let mut camera_updates = Vec::new();
        for (_, node) in &self.nodes {
            if let Some(key) = node.camera {
                camera_updates.push((key, *node.transform.world_matrix()));
            }
        }
        for (key, world) in camera_updates {
            if let Some(camera) = self.cameras.get_mut(key) {
                camera.update_view(&world);
            }
        }
    }

    /// Recomputes local matrices where needed and propagates world matrices
    /// down the tree iteratively.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&h| (h, Affine3A::IDENTITY))
            .collect();

        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            node.transform.update_local_matrix();
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);

            for &child in &node.children {
                stack.push((child, world));
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
