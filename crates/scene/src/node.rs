use basicworld_common::{Color, Transform};
use glam::{Mat4, UVec2, Vec3};

use crate::sky::SkyUniforms;

/// Shape of a mesh, tessellated by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere centred on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Rectangle in the XY plane facing +Z.
    Plane { width: f32, height: f32 },
}

/// Which faces of a mesh are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    /// Inside faces only, for meshes that surround the camera.
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse-only shading.
    Lambert { color: Color },
    Standard {
        color: Color,
        roughness: f32,
        metalness: f32,
    },
    /// Unlit vertical gradient, see [`SkyUniforms`].
    SkyGradient(SkyUniforms),
}

impl Material {
    /// Fully rough, non-metallic standard material.
    pub fn standard(color: Color) -> Self {
        Material::Standard {
            color,
            roughness: 1.0,
            metalness: 0.0,
        }
    }

    /// Base color of lit materials. The sky has none.
    pub fn color(&self) -> Option<Color> {
        match self {
            Material::Lambert { color } | Material::Standard { color, .. } => Some(*color),
            Material::SkyGradient(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub side: Side,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            side: Side::Front,
            transform: Transform::default(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// Orthographic frustum of a directional light's shadow camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            top: 5.0,
            bottom: -5.0,
            near: 0.5,
            far: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalShadow {
    /// Added to the fragment's light-space depth before the comparison.
    pub bias: f32,
    pub map_size: UVec2,
    pub camera: ShadowCamera,
}

impl Default for DirectionalShadow {
    fn default() -> Self {
        Self {
            bias: 0.0,
            map_size: UVec2::splat(512),
            camera: ShadowCamera::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub cast_shadow: bool,
    pub shadow: DirectionalShadow,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::Y,
            target: Vec3::ZERO,
            cast_shadow: false,
            shadow: DirectionalShadow::default(),
        }
    }

    /// Unit vector pointing from the target towards the light.
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).normalize_or(Vec3::Y)
    }

    /// View-projection of the shadow camera, looking from `position` at `target`.
    pub fn light_view_projection(&self) -> Mat4 {
        let forward = self.target - self.position;
        let up = if forward.normalize_or(Vec3::NEG_Y).cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, self.target, up);
        let c = &self.shadow.camera;
        let projection = Mat4::orthographic_rh(c.left, c.right, c.bottom, c.top, c.near, c.far);
        projection * view
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    /// Light arriving from above.
    pub sky_color: Color,
    /// Light arriving from below.
    pub ground_color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl HemisphereLight {
    pub fn new(sky_color: Color, ground_color: Color, intensity: f32) -> Self {
        Self {
            sky_color,
            ground_color,
            intensity,
            position: Vec3::Y,
        }
    }
}

/// Anything that can live in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    DirectionalLight(DirectionalLight),
    HemisphereLight(HemisphereLight),
    Mesh(Mesh),
}

impl From<DirectionalLight> for Node {
    fn from(light: DirectionalLight) -> Self {
        Node::DirectionalLight(light)
    }
}

impl From<HemisphereLight> for Node {
    fn from(light: HemisphereLight) -> Self {
        Node::HemisphereLight(light)
    }
}

impl From<Mesh> for Node {
    fn from(mesh: Mesh) -> Self {
        Node::Mesh(mesh)
    }
}
