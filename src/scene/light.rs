use glam::Vec3;

/// Light kind.
///
/// Ambient lights contribute a constant term; directional lights shine from
/// the owning node's world position toward the scene origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
}

#[derive(Debug, Clone)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    #[must_use]
    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    #[must_use]
    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
        }
    }

    /// Color premultiplied by intensity, the form the shader consumes.
    #[inline]
    #[must_use]
    pub fn scaled_color(&self) -> Vec3 {
        self.color * self.intensity
    }
}
