//! Per-frame CPU work: uniform packing and instance batching.

use basicworld_common::Color;
use basicworld_render::{PerspectiveCamera, RendererConfig, ShadowFilter};
use basicworld_scene::{Geometry, Material, Scene, Side, SkyUniforms};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::BTreeMap;
use std::ops::Range;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub light_direction: [f32; 4],
    pub light_color: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    pub fog: [f32; 4],
    pub shadow: [f32; 4],
}

impl Globals {
    /// Shadow sampling stays off unless `plan` has shadow casters, since the
    /// shadow pass only runs for them.
    pub fn pack(
        scene: &Scene,
        camera: &PerspectiveCamera,
        config: &RendererConfig,
        plan: &FramePlan,
    ) -> Self {
        let sun = scene.directional_lights().next();
        let hemisphere = scene.hemisphere_lights().next();

        let (light_direction, light_color, light_view_proj) = match sun {
            Some(sun) => (
                sun.direction().extend(sun.intensity).to_array(),
                sun.color.extend(1.0),
                sun.light_view_projection(),
            ),
            None => ([0.0, 1.0, 0.0, 0.0], Color::BLACK.extend(1.0), Mat4::IDENTITY),
        };

        let (hemi_sky, hemi_ground) = match hemisphere {
            Some(h) => (h.sky_color.extend(h.intensity), h.ground_color.extend(1.0)),
            None => (Color::BLACK.extend(0.0), Color::BLACK.extend(1.0)),
        };

        let has_casters = !plan.shadow.is_empty();
        let shadow = match sun {
            Some(sun) if config.shadow_map.enabled && sun.cast_shadow && has_casters => [
                sun.shadow.bias,
                1.0 / sun.shadow.map_size.x.max(1) as f32,
                1.0,
                (config.shadow_map.filter == ShadowFilter::PcfSoft) as u32 as f32,
            ],
            _ => [0.0; 4],
        };

        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            light_view_proj: light_view_proj.to_cols_array_2d(),
            camera_position: camera.position.extend(1.0).to_array(),
            light_direction,
            light_color,
            hemi_sky,
            hemi_ground,
            fog: scene
                .fog
                .map(|f| f.color.extend(f.density))
                .unwrap_or([0.0; 4]),
            shadow,
        }
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadow[2] > 0.5
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SkyUniformsRaw {
    pub top_color: [f32; 3],
    pub offset: f32,
    pub bottom_color: [f32; 3],
    pub exponent: f32,
}

impl From<SkyUniforms> for SkyUniformsRaw {
    fn from(sky: SkyUniforms) -> Self {
        Self {
            top_color: sky.top_color.to_array(),
            offset: sky.offset,
            bottom_color: sky.bottom_color.to_array(),
            exponent: sky.exponent,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl InstanceData {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One instanced draw of a single geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Index into [`FramePlan::geometries`].
    pub geometry: usize,
    pub side: Side,
    pub instances: Range<u32>,
}

/// Everything the GPU passes need, grouped per geometry.
#[derive(Debug, Default)]
pub struct FramePlan {
    pub geometries: Vec<Geometry>,
    pub instances: Vec<InstanceData>,
    pub sky: Vec<Batch>,
    pub lit: Vec<Batch>,
    pub shadow: Vec<Batch>,
    /// Uniforms of the first sky mesh; every sky batch is drawn with them.
    pub sky_uniforms: Option<SkyUniforms>,
}

type BatchKey = (usize, bool);

impl FramePlan {
    pub fn build(scene: &Scene) -> Self {
        let mut plan = FramePlan::default();
        let mut sky: BTreeMap<BatchKey, Vec<InstanceData>> = BTreeMap::new();
        let mut lit: BTreeMap<BatchKey, Vec<InstanceData>> = BTreeMap::new();
        let mut casters: BTreeMap<BatchKey, Vec<InstanceData>> = BTreeMap::new();

        for (id, mesh) in scene.meshes() {
            let geometry = plan.geometry_index(mesh.geometry);
            let key = (geometry, mesh.side == Side::Back);
            let instance = InstanceData {
                model: mesh.transform.matrix().to_cols_array_2d(),
                color: mesh.material.color().unwrap_or(Color::WHITE).extend(1.0),
                params: [mesh.receive_shadow as u32 as f32, 0.0, 0.0, 0.0],
            };

            match mesh.material {
                Material::SkyGradient(uniforms) => {
                    match plan.sky_uniforms {
                        None => plan.sky_uniforms = Some(uniforms),
                        Some(first) if first != uniforms => {
                            tracing::warn!(?id, "extra sky mesh uses the first sky's uniforms");
                        }
                        Some(_) => {}
                    }
                    sky.entry(key).or_default().push(instance);
                }
                _ => {
                    lit.entry(key).or_default().push(instance);
                    if mesh.cast_shadow {
                        casters.entry(key).or_default().push(instance);
                    }
                }
            }
        }

        plan.sky = plan.append(sky);
        plan.lit = plan.append(lit);
        plan.shadow = plan.append(casters);
        plan
    }

    fn geometry_index(&mut self, geometry: Geometry) -> usize {
        match self.geometries.iter().position(|g| *g == geometry) {
            Some(i) => i,
            None => {
                self.geometries.push(geometry);
                self.geometries.len() - 1
            }
        }
    }

    fn append(&mut self, groups: BTreeMap<BatchKey, Vec<InstanceData>>) -> Vec<Batch> {
        groups
            .into_iter()
            .map(|((geometry, back), instances)| {
                let start = self.instances.len() as u32;
                self.instances.extend(instances);
                Batch {
                    geometry,
                    side: if back { Side::Back } else { Side::Front },
                    instances: start..self.instances.len() as u32,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basicworld_render::ShadowMapConfig;
    use basicworld_scene::{DemoScene, DirectionalLight, Mesh};
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn instance_origin(instance: &InstanceData) -> Vec3 {
        Mat4::from_cols_array_2d(&instance.model).transform_point3(Vec3::ZERO)
    }

    fn demo() -> DemoScene {
        DemoScene::build(&mut StdRng::seed_from_u64(9))
    }

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(60.0, 16.0 / 9.0, 1.0, 20000.0);
        cam.position = Vec3::new(75.0, 20.0, 0.0);
        cam.look_at(Vec3::new(0.0, 20.0, 0.0));
        cam
    }

    #[test]
    fn uniform_blocks_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<Globals>(), 2 * 64 + 7 * 16);
        assert_eq!(std::mem::size_of::<SkyUniformsRaw>(), 32);
        assert_eq!(std::mem::size_of::<InstanceData>(), 96);
    }

    #[test]
    fn demo_plan_batches() {
        let demo = demo();
        let plan = FramePlan::build(&demo.scene);

        // sky sphere, ground plane, ball sphere
        assert_eq!(plan.geometries.len(), 3);
        assert_eq!(plan.sky.len(), 1);
        assert_eq!(plan.sky[0].side, Side::Back);
        assert_eq!(plan.sky[0].instances.len(), 1);

        let lit: usize = plan.lit.iter().map(|b| b.instances.len()).sum();
        let shadow: usize = plan.shadow.iter().map(|b| b.instances.len()).sum();
        assert_eq!(lit, 65);
        assert_eq!(shadow, 64);
        assert_eq!(plan.instances.len(), 1 + 65 + 64);
        assert!(plan.sky_uniforms.is_some());
    }

    #[test]
    fn batch_ranges_are_disjoint_and_cover_buffer() {
        let plan = FramePlan::build(&demo().scene);
        let mut ranges: Vec<Range<u32>> = plan
            .sky
            .iter()
            .chain(&plan.lit)
            .chain(&plan.shadow)
            .map(|b| b.instances.clone())
            .collect();
        ranges.sort_by_key(|r| r.start);
        let mut next = 0;
        for r in ranges {
            assert_eq!(r.start, next);
            next = r.end;
        }
        assert_eq!(next as usize, plan.instances.len());
    }

    #[test]
    fn ball_instances_keep_positions() {
        let demo = demo();
        let plan = FramePlan::build(&demo.scene);
        let ball_geometry = plan
            .shadow
            .first()
            .map(|b| b.geometry)
            .expect("casters exist");
        let batch = plan
            .lit
            .iter()
            .find(|b| b.geometry == ball_geometry)
            .expect("balls are lit");
        for (i, id) in demo.balls.iter().enumerate() {
            let expected = demo.scene.mesh(*id).map(|m| m.transform.position);
            let instance = &plan.instances[batch.instances.start as usize + i];
            assert_eq!(Some(instance_origin(instance)), expected);
            assert_eq!(instance.params[0], 1.0);
        }
    }

    #[test]
    fn globals_from_demo() {
        let demo = demo();
        let plan = FramePlan::build(&demo.scene);
        let g = Globals::pack(&demo.scene, &camera(), &RendererConfig::default(), &plan);
        assert_eq!(g.light_direction[3], 1.0);
        assert_eq!(g.hemi_sky[3], 0.6);
        assert_eq!(g.fog[3], 0.002);
        assert!(g.shadows_enabled());
        assert_eq!(g.shadow[0], -0.001);
        assert_eq!(g.shadow[1], 1.0 / 4096.0);
        assert_eq!(g.shadow[3], 1.0);
        assert_eq!(g.camera_position, [75.0, 20.0, 0.0, 1.0]);
    }

    #[test]
    fn globals_without_lights_or_fog() {
        let scene = Scene::new();
        let plan = FramePlan::build(&scene);
        let g = Globals::pack(&scene, &camera(), &RendererConfig::default(), &plan);
        assert_eq!(g.light_direction[3], 0.0);
        assert_eq!(g.hemi_sky[3], 0.0);
        assert_eq!(g.fog, [0.0; 4]);
        assert!(!g.shadows_enabled());
    }

    #[test]
    fn disabled_shadow_map_turns_shadows_off() {
        let config = RendererConfig {
            shadow_map: ShadowMapConfig {
                enabled: false,
                ..ShadowMapConfig::default()
            },
            ..RendererConfig::default()
        };
        let demo = demo();
        let plan = FramePlan::build(&demo.scene);
        let g = Globals::pack(&demo.scene, &camera(), &config, &plan);
        assert!(!g.shadows_enabled());
    }

    #[test]
    fn receivers_without_casters_skip_shadow_sampling() {
        let mut scene = Scene::new();
        let mut sun = DirectionalLight::new(Color::WHITE, 1.0);
        sun.cast_shadow = true;
        scene.add(sun);
        let mut ground = Mesh::new(
            Geometry::Plane {
                width: 100.0,
                height: 100.0,
            },
            Material::Lambert {
                color: Color::from_hex(0x55aa33),
            },
        );
        ground.receive_shadow = true;
        scene.add(ground);

        let plan = FramePlan::build(&scene);
        assert!(plan.shadow.is_empty());
        let g = Globals::pack(&scene, &camera(), &RendererConfig::default(), &plan);
        assert!(!g.shadows_enabled());
        assert_eq!(g.shadow, [0.0; 4]);
    }
}
