//! The demo scene: sun and sky lights, gradient sky dome, ground, balls.

use basicworld_common::{Color, NodeId, Transform};
use glam::{Quat, UVec2, Vec3};
use rand::Rng;

use crate::ball_grid;
use crate::node::{
    DirectionalLight, DirectionalShadow, Geometry, HemisphereLight, Material, Mesh, ShadowCamera,
    Side,
};
use crate::scene::{FogExp2, Scene};
use crate::sky::SkyUniforms;

pub const SKY_RADIUS: f32 = 5000.0;
pub const GROUND_SIZE: f32 = 10000.0;
pub const BALL_RADIUS: f32 = 2.0;
const SPHERE_SEGMENTS: u32 = 32;

/// The scene plus the ball handles kept for per-object updates.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub scene: Scene,
    pub balls: Vec<NodeId>,
}

impl DemoScene {
    /// Build the full scene. `rng` jitters the ball positions.
    pub fn build(rng: &mut impl Rng) -> Self {
        let mut scene = Scene::new();
        scene.background = Color::from_hsl(0.6, 0.0, 1.0);
        scene.fog = Some(FogExp2::new(Color::from_hex(0x89b2eb), 0.002));

        load_light(&mut scene);
        load_sky(&mut scene);
        load_ground(&mut scene);
        let balls = load_objects(&mut scene, rng);

        tracing::debug!(
            nodes = scene.node_count(),
            balls = balls.len(),
            "demo scene built"
        );

        Self { scene, balls }
    }
}

fn load_light(scene: &mut Scene) {
    let mut sun = DirectionalLight::new(Color::WHITE, 1.0);
    sun.position = Vec3::new(-10.0, 500.0, 10.0);
    sun.target = Vec3::ZERO;
    sun.cast_shadow = true;
    sun.shadow = DirectionalShadow {
        bias: -0.001,
        map_size: UVec2::splat(4096),
        camera: ShadowCamera {
            left: 100.0,
            right: -100.0,
            top: 100.0,
            bottom: -100.0,
            near: 0.1,
            far: 1000.0,
        },
    };
    scene.add(sun);
}

fn load_sky(scene: &mut Scene) {
    let mut hemisphere = HemisphereLight::new(
        Color::from_hsl(0.6, 1.0, 0.6),
        Color::from_hsl(0.095, 1.0, 0.75),
        0.6,
    );
    hemisphere.position = Vec3::new(0.0, 1000.0, 0.0);
    scene.add(hemisphere);

    let uniforms = SkyUniforms {
        top_color: hemisphere.sky_color,
        ..SkyUniforms::default()
    };

    if let Some(fog) = scene.fog.as_mut() {
        fog.color = uniforms.bottom_color;
    }

    let mut sky = Mesh::new(
        Geometry::Sphere {
            radius: SKY_RADIUS,
            width_segments: SPHERE_SEGMENTS,
            height_segments: SPHERE_SEGMENTS,
        },
        Material::SkyGradient(uniforms),
    );
    sky.side = Side::Back;
    scene.add(sky);
}

fn load_ground(scene: &mut Scene) {
    let mut ground = Mesh::new(
        Geometry::Plane {
            width: GROUND_SIZE,
            height: GROUND_SIZE,
        },
        Material::Lambert {
            color: Color::from_hex(0x55aa33),
        },
    );
    ground.transform.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
    ground.cast_shadow = false;
    ground.receive_shadow = true;
    scene.add(ground);
}

fn load_objects(scene: &mut Scene, rng: &mut impl Rng) -> Vec<NodeId> {
    let mut ball = Mesh::new(
        Geometry::Sphere {
            radius: BALL_RADIUS,
            width_segments: SPHERE_SEGMENTS,
            height_segments: SPHERE_SEGMENTS,
        },
        Material::standard(Color::WHITE),
    );
    ball.cast_shadow = true;
    ball.receive_shadow = true;

    ball_grid::positions(rng)
        .into_iter()
        .map(|position| {
            let mut clone = ball.clone();
            clone.transform = Transform::from_position(position);
            scene.add(clone)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn demo() -> DemoScene {
        DemoScene::build(&mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn node_inventory() {
        let demo = demo();
        // sun, hemisphere, sky, ground, 64 balls
        assert_eq!(demo.scene.node_count(), 68);
        assert_eq!(demo.scene.directional_lights().count(), 1);
        assert_eq!(demo.scene.hemisphere_lights().count(), 1);
        assert_eq!(demo.scene.meshes().count(), 66);
    }

    #[test]
    fn balls_are_distinct_scene_meshes() {
        let demo = demo();
        assert_eq!(demo.balls.len(), 64);
        let mut ids = demo.balls.clone();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        for id in &demo.balls {
            let mesh = demo.scene.mesh(*id).expect("ball is a mesh");
            assert!(mesh.cast_shadow && mesh.receive_shadow);
            let p = mesh.transform.position;
            assert!(p.y >= 2.0 && p.y < 12.0);
        }
    }

    #[test]
    fn sky_takes_hemisphere_color_and_fog_takes_bottom() {
        let demo = demo();
        let hemi = *demo.scene.hemisphere_lights().next().expect("hemisphere");
        let sky = demo
            .scene
            .meshes()
            .find_map(|(_, m)| match m.material {
                Material::SkyGradient(u) => Some((m.side, u)),
                _ => None,
            })
            .expect("sky mesh");
        assert_eq!(sky.0, Side::Back);
        assert_eq!(sky.1.top_color, hemi.sky_color);
        assert_eq!(sky.1.bottom_color, Color::WHITE);
        assert_eq!(sky.1.offset, -10.0);
        assert_eq!(sky.1.exponent, 0.7);
        assert_eq!(demo.scene.fog.map(|f| f.color), Some(Color::WHITE));
        assert_eq!(demo.scene.fog.map(|f| f.density), Some(0.002));
    }

    #[test]
    fn ground_receives_but_does_not_cast() {
        let demo = demo();
        let ground = demo
            .scene
            .meshes()
            .find(|(_, m)| matches!(m.geometry, Geometry::Plane { .. }))
            .map(|(_, m)| m.clone())
            .expect("ground");
        assert!(ground.receive_shadow);
        assert!(!ground.cast_shadow);
        let up = ground.transform.matrix().transform_vector3(Vec3::Z);
        assert!((up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn sun_shadow_settings() {
        let demo = demo();
        let sun = demo.scene.directional_lights().next().expect("sun");
        assert!(sun.cast_shadow);
        assert_eq!(sun.shadow.map_size, UVec2::new(4096, 4096));
        assert_eq!(sun.shadow.bias, -0.001);
        assert_eq!(sun.position, Vec3::new(-10.0, 500.0, 10.0));
        assert!(matches!(
            demo.scene.get(NodeId(0)),
            Some(Node::DirectionalLight(_))
        ));
    }
}
