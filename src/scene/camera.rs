use glam::{Affine3A, Mat4, Vec3};

#[derive(Debug, Clone, Copy)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

/// Camera component.
///
/// Holds projection parameters and the cached view/projection matrices. The
/// view matrix is derived from the owning node's world transform during
/// [`Scene::update`].
///
/// [`Scene::update`]: crate::scene::Scene::update
#[derive(Debug, Clone)]
pub struct Camera {
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians (perspective only).
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Half-height of the view volume (orthographic only).
    pub ortho_size: f32,

    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
    pub(crate) world_position: Vec3,
}

impl Camera {
    /// Creates a perspective camera. `fov` is in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            projection_type: ProjectionType::Perspective,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,

            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            world_position: Vec3::ZERO,
        };
        cam.update_projection_matrix();
        cam
    }

    /// Creates an orthographic camera with the given half-height.
    #[must_use]
    pub fn new_orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            projection_type: ProjectionType::Orthographic,
            fov: 45.0_f32.to_radians(),
            aspect,
            near,
            far,
            ortho_size,

            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            world_position: Vec3::ZERO,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective => {
                // glam's perspective_rh targets the WGPU/Vulkan [0, 1] depth range
                Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let w = self.ortho_size * self.aspect;
                let h = self.ortho_size;
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        };

        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    /// Rebuilds the view matrix from the owning node's world transform.
    pub fn update_view(&mut self, world_transform: &Affine3A) {
        self.world_position = world_transform.translation.into();
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }
}
