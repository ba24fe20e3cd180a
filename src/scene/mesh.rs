use glam::{Vec3, Vec4};

/// CPU-side surface data.
///
/// Positions and normals are parallel arrays; indices reference into them.
/// Normals may be absent in the source asset, in which case flat normals are
/// computed from the index triangles.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Geometry {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            positions,
            normals,
            indices,
        };
        if geometry.normals.len() != geometry.positions.len() {
            geometry.compute_flat_normals();
        }
        geometry
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Derives per-vertex normals by accumulating face normals.
    ///
    /// Vertices shared between faces get the normalized sum, which gives a
    /// smooth result on closed surfaces and a reasonable one everywhere else.
    pub fn compute_flat_normals(&mut self) {
        self.normals = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let e1 = self.positions[i1] - self.positions[i0];
            let e2 = self.positions[i2] - self.positions[i0];
            let face_normal = e1.cross(e2);

            self.normals[i0] += face_normal;
            self.normals[i1] += face_normal;
            self.normals[i2] += face_normal;
        }

        for n in &mut self.normals {
            *n = n.normalize_or_zero();
        }
    }
}

/// A renderable mesh: geometry plus a flat base color.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub base_color: Vec4,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            base_color: Vec4::ONE,
        }
    }

    #[must_use]
    pub fn with_base_color(mut self, color: Vec4) -> Self {
        self.base_color = color;
        self
    }
}
