use glam::{Quat, Vec3, Vec4};

/// Value types that keyframe tracks can interpolate.
///
/// Cubic interpolation follows the glTF cubic-spline formulation, where each
/// keyframe stores an in-tangent, the value, and an out-tangent.
pub trait Interpolatable: Clone {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self;

    /// Hermite interpolation between `v0` and `v1` with out-tangent `t0` and
    /// in-tangent `t1`, over a keyframe interval of duration `dt`.
    fn interpolate_cubic(v0: &Self, t0: &Self, v1: &Self, t1: &Self, t: f32, dt: f32) -> Self;
}

fn hermite_weights(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    (
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    )
}

impl Interpolatable for f32 {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self {
        a + (b - a) * t
    }

    fn interpolate_cubic(v0: &Self, t0: &Self, v1: &Self, t1: &Self, t: f32, dt: f32) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        h00 * v0 + h10 * dt * t0 + h01 * v1 + h11 * dt * t1
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self {
        a.lerp(*b, t)
    }

    fn interpolate_cubic(v0: &Self, t0: &Self, v1: &Self, t1: &Self, t: f32, dt: f32) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        h00 * *v0 + h10 * dt * *t0 + h01 * *v1 + h11 * dt * *t1
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self {
        a.slerp(*b, t)
    }

    /// Component-wise Hermite followed by normalization, as glTF specifies
    /// for cubic-spline rotation channels.
    fn interpolate_cubic(v0: &Self, t0: &Self, v1: &Self, t1: &Self, t: f32, dt: f32) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        let raw = Vec4::from(*v0) * h00
            + Vec4::from(*t0) * (h10 * dt)
            + Vec4::from(*v1) * h01
            + Vec4::from(*t1) * (h11 * dt);
        Quat::from_vec4(raw).normalize()
    }
}
