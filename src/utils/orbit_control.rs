//! Orbit camera controller.
//!
//! Left drag rotates around the target, scroll zooms, right drag pans. The
//! camera position is kept on a sphere described by (radius, theta, phi)
//! around `center`, with exponential damping on rotation.

use glam::{Vec2, Vec3};
use winit::event::MouseButton;

use crate::app::input::Input;
use crate::scene::transform::Transform;

pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub center: Vec3,
    pub radius: f32,
    /// Azimuth angle around the Y axis
    pub theta: f32,
    /// Polar angle from the Y axis
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,

            center,
            radius,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Derives the spherical coordinates from an existing camera position so
    /// the first update does not snap.
    #[must_use]
    pub fn from_position(center: Vec3, position: Vec3) -> Self {
        let offset = position - center;
        let radius = offset.length().max(1e-3);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let theta = offset.x.atan2(offset.z);

        let mut controls = Self::new(center, radius);
        controls.theta = theta;
        controls.phi = phi;
        controls
    }

    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_degrees: f32, dt: f32) {
        let screen_height = input.screen_size.y.max(1.0);

        if input.is_button_pressed(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * std::f32::consts::PI / screen_height;
            self.rotate_delta -= input.cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            // Frame-rate independent damping, normalized against 60 fps
            let retention = (1.0 - self.damping_factor).powf(dt * 60.0);
            let applied = self.rotate_delta * (1.0 - retention);

            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        const EPS: f32 = 0.0001;
        self.phi = self.phi.clamp(EPS, std::f32::consts::PI - EPS);

        if input.scroll_delta.y != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(input.scroll_delta.y.abs());
            if input.scroll_delta.y > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.is_button_pressed(MouseButton::Right) {
            let half_fov = fov_degrees.to_radians() / 2.0;
            let target_world_height = 2.0 * self.radius * half_fov.tan();
            let pixels_to_world = target_world_height / screen_height;

            let offset = self.unit_offset();
            let forward = -offset;
            let right = forward.cross(Vec3::Y).normalize();
            let up = right.cross(forward).normalize();

            self.center += (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * pixels_to_world
                * self.pan_speed;
        }

        transform.position = self.center + self.unit_offset() * self.radius;
        transform.look_at(self.center, Vec3::Y);
    }

    fn unit_offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}
