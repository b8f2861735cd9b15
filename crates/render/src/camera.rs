use glam::{Mat4, Vec3};

/// Perspective camera aimed at a target point.
///
/// The projection matrix is cached: after changing `fov`, `aspect`, `near`
/// or `far`, call [`PerspectiveCamera::update_projection_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Screen-space right in world coordinates.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or(Vec3::X)
    }

    /// Screen-space up in world coordinates.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_cached_until_updated() {
        let mut cam = PerspectiveCamera::new(60.0, 1920.0 / 1080.0, 1.0, 20000.0);
        let before = cam.projection_matrix();
        cam.aspect = 1.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        assert_eq!(
            cam.projection_matrix(),
            Mat4::perspective_rh(60f32.to_radians(), 1.0, 1.0, 20000.0)
        );
    }

    #[test]
    fn target_lands_in_view_centre() {
        let mut cam = PerspectiveCamera::new(60.0, 16.0 / 9.0, 1.0, 20000.0);
        cam.position = Vec3::new(75.0, 20.0, 0.0);
        cam.look_at(Vec3::new(0.0, 20.0, 0.0));
        let clip = cam.view_projection() * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut cam = PerspectiveCamera::new(60.0, 1.0, 1.0, 100.0);
        cam.position = Vec3::new(10.0, 5.0, 3.0);
        cam.look_at(Vec3::ZERO);
        let (f, r, u) = (cam.forward(), cam.right(), cam.up());
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(u.y > 0.0);
    }
}
