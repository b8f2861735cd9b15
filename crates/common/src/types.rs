use glam::{Mat4, Quat, Vec3};

/// Handle to a node owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_order_by_value() {
        assert!(NodeId(1) < NodeId(2));
        assert_eq!(NodeId(7), NodeId(7));
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_applies_rotation_before_translation() {
        let t = Transform {
            position: Vec3::new(0.0, 5.0, 0.0),
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            scale: Vec3::ONE,
        };
        // +Z rotated by -90 degrees about X points up.
        let normal = t.matrix().transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-6);
        let origin = t.matrix().transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(0.0, 5.0, 0.0));
    }
}
