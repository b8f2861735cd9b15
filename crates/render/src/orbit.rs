use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use crate::camera::PerspectiveCamera;

/// Keeps the polar angle off the poles, where the view basis degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// Radius, polar angle from +Y and azimuth about +Y measured from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(ring * self.theta.sin(), self.phi.cos() * self.radius, ring * self.theta.cos())
    }
}

/// Orbit-style camera manipulator: rotates, pans and zooms around `target`.
///
/// Input calls accumulate deltas; [`OrbitControls::update`] applies them to
/// the camera and re-aims it at the target.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    pending_pan: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Orbit by a pointer delta; a drag across the full viewport height turns
    /// one full revolution.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        self.pending_theta -= TAU * delta.x / height * self.rotate_speed;
        self.pending_phi -= TAU * delta.y / height * self.rotate_speed;
    }

    /// Positive steps move toward the target.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_scale *= 0.95_f32.powf(self.zoom_speed * steps);
    }

    /// Move the target in the camera's screen plane so that content follows
    /// the pointer.
    pub fn pan(&mut self, delta: Vec2, viewport_height: u32, camera: &PerspectiveCamera) {
        let height = viewport_height.max(1) as f32;
        let half_fov = (camera.fov.to_radians() / 2.0).tan();
        let distance = (camera.position - self.target).length() * half_fov;
        let scale = 2.0 * distance / height * self.pan_speed;
        self.pending_pan += camera.right() * (-delta.x * scale) + camera.up() * (delta.y * scale);
    }

    /// Apply pending input to `camera`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut spherical = Spherical::from_offset(camera.position - self.target);
        spherical.theta += self.pending_theta;
        spherical.phi = (spherical.phi + self.pending_phi).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        spherical.radius =
            (spherical.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pending_pan;
        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
        self.pending_pan = Vec3::ZERO;
    }

    pub fn distance(&self, camera: &PerspectiveCamera) -> f32 {
        (camera.position - self.target).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_camera() -> (PerspectiveCamera, OrbitControls) {
        let mut camera = PerspectiveCamera::new(60.0, 1920.0 / 1080.0, 1.0, 20000.0);
        camera.position = Vec3::new(75.0, 20.0, 0.0);
        let mut controls = OrbitControls::new(Vec3::new(0.0, 20.0, 0.0));
        controls.update(&mut camera);
        (camera, controls)
    }

    #[test]
    fn spherical_round_trip() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        let back = Spherical::from_offset(v).to_offset();
        assert!((back - v).length() < 1e-4);
    }

    #[test]
    fn initial_update_keeps_position_and_aims() {
        let (camera, controls) = demo_camera();
        assert!((camera.position - Vec3::new(75.0, 20.0, 0.0)).length() < 1e-3);
        assert_eq!(camera.target, controls.target);
    }

    #[test]
    fn rotation_preserves_distance() {
        let (mut camera, mut controls) = demo_camera();
        controls.rotate(Vec2::new(120.0, 40.0), 1080);
        controls.update(&mut camera);
        assert!((controls.distance(&camera) - 75.0).abs() < 1e-3);
        assert!((camera.position - Vec3::new(75.0, 20.0, 0.0)).length() > 1.0);
    }

    #[test]
    fn full_height_drag_is_full_turn() {
        let (mut camera, mut controls) = demo_camera();
        controls.rotate(Vec2::new(1080.0, 0.0), 1080);
        controls.update(&mut camera);
        assert!((camera.position - Vec3::new(75.0, 20.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn polar_angle_never_reaches_pole() {
        let (mut camera, mut controls) = demo_camera();
        controls.rotate(Vec2::new(0.0, 100_000.0), 1080);
        controls.update(&mut camera);
        let offset = camera.position - controls.target;
        assert!(offset.y > 0.0);
        assert!(offset.x.abs() + offset.z.abs() > 0.0);
    }

    #[test]
    fn zoom_in_shrinks_distance() {
        let (mut camera, mut controls) = demo_camera();
        controls.zoom(1.0);
        controls.update(&mut camera);
        assert!((controls.distance(&camera) - 75.0 * 0.95).abs() < 1e-3);
        controls.zoom(-2.0);
        controls.update(&mut camera);
        assert!((controls.distance(&camera) - 75.0 / 0.95).abs() < 1e-2);
    }

    #[test]
    fn zoom_respects_limits() {
        let (mut camera, mut controls) = demo_camera();
        controls.min_distance = 50.0;
        controls.zoom(100.0);
        controls.update(&mut camera);
        assert!((controls.distance(&camera) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let (mut camera, mut controls) = demo_camera();
        let offset_before = camera.position - controls.target;
        controls.pan(Vec2::new(100.0, 0.0), 1080, &camera);
        controls.update(&mut camera);
        let offset_after = camera.position - controls.target;
        assert!((offset_after - offset_before).length() < 1e-3);
        assert!((controls.target - Vec3::new(0.0, 20.0, 0.0)).length() > 0.1);
        // Target stays in the horizontal plane for a horizontal drag.
        assert!((controls.target.y - 20.0).abs() < 1e-4);
    }
}
