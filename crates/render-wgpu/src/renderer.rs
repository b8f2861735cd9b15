use basicworld_render::{PerspectiveCamera, RenderError, Renderer, RendererConfig};
use basicworld_scene::{Geometry, Scene, Side};
use glam::UVec2;
use wgpu::util::DeviceExt;

use crate::frame::{Batch, FramePlan, Globals, InstanceData, SkyUniformsRaw};
use crate::gpu::{GpuContext, GpuError};
use crate::mesh::{self, Vertex};
use crate::shaders;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCE_CAPACITY: u64 = 256;

struct GpuMesh {
    geometry: Geometry,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct ShadowMap {
    size: UVec2,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
}

/// Front-face and back-face variants of one surface pipeline.
struct SidedPipeline {
    front: wgpu::RenderPipeline,
    back: wgpu::RenderPipeline,
}

impl SidedPipeline {
    fn new(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::PipelineLayout,
        module: &wgpu::ShaderModule,
        entry_points: (&str, &str),
        format: wgpu::TextureFormat,
        samples: u32,
    ) -> Self {
        let build = |side: Side, suffix: &str| {
            create_surface_pipeline(
                device,
                &format!("{label}_{suffix}"),
                layout,
                module,
                entry_points,
                format,
                samples,
                side,
            )
        };
        Self {
            front: build(Side::Front, "front"),
            back: build(Side::Back, "back"),
        }
    }

    fn get(&self, side: Side) -> &wgpu::RenderPipeline {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }
}

/// wgpu scene renderer: shadow depth pass, then sky and lit meshes into a
/// multisampled target resolved to the surface.
pub struct WgpuRenderer {
    gpu: GpuContext,
    config: RendererConfig,
    lit_pipeline: SidedPipeline,
    sky_pipeline: SidedPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    sky_buffer: wgpu::Buffer,
    sky_bind_group: wgpu::BindGroup,
    shadow_layout: wgpu::BindGroupLayout,
    shadow_sampler: wgpu::Sampler,
    shadow_map: ShadowMap,
    meshes: Vec<GpuMesh>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u64,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
}

impl WgpuRenderer {
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        config: RendererConfig,
    ) -> Result<Self, GpuError> {
        let gpu = GpuContext::new(target, width, height)?;
        let device = &gpu.device;
        let format = gpu.format();
        let samples = config.sample_count();

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_buffer"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_layout = uniform_layout(
            device,
            "globals_bind_group_layout",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let globals_bind_group =
            uniform_bind_group(device, "globals_bind_group", &globals_layout, &globals_buffer);

        let sky_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sky_buffer"),
            size: std::mem::size_of::<SkyUniformsRaw>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sky_layout =
            uniform_layout(device, "sky_bind_group_layout", wgpu::ShaderStages::FRAGMENT);
        let sky_bind_group = uniform_bind_group(device, "sky_bind_group", &sky_layout, &sky_buffer);

        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        // Replaced by the sun's map size on the first shadowed frame.
        let shadow_map = create_shadow_map(device, &shadow_layout, &shadow_sampler, UVec2::ONE);

        let lit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lit_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &shadow_layout],
            push_constant_ranges: &[],
        });
        let sky_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &sky_layout],
            push_constant_ranges: &[],
        });
        let shadow_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pipeline_layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LIT_SHADER.into()),
        });
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SKY_SHADER.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHADOW_SHADER.into()),
        });

        let lit_pipeline = SidedPipeline::new(
            device,
            "lit_pipeline",
            &lit_layout,
            &lit_shader,
            ("vs_main", "fs_main"),
            format,
            samples,
        );
        let sky_pipeline = SidedPipeline::new(
            device,
            "sky_pipeline",
            &sky_pipeline_layout,
            &sky_shader,
            ("vs_sky", "fs_sky"),
            format,
            samples,
        );

        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout(), InstanceData::layout()],
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The shadow frustum may be mirrored, which flips winding.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);
        let (w, h) = gpu.size();
        let depth_view = create_depth_texture(device, w, h, samples);
        let msaa_view = (samples > 1).then(|| create_msaa_texture(device, format, w, h, samples));

        tracing::debug!(samples, ?format, "renderer pipelines created");

        Ok(Self {
            gpu,
            config,
            lit_pipeline,
            sky_pipeline,
            shadow_pipeline,
            globals_buffer,
            globals_bind_group,
            sky_buffer,
            sky_bind_group,
            shadow_layout,
            shadow_sampler,
            shadow_map,
            meshes: Vec::new(),
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            depth_view,
            msaa_view,
        })
    }

    /// Index of the uploaded mesh for `geometry`, tessellating on first use.
    fn ensure_mesh(&mut self, geometry: &Geometry) -> usize {
        if let Some(i) = self.meshes.iter().position(|m| m.geometry == *geometry) {
            return i;
        }
        let (vertices, indices) = mesh::tessellate(geometry);
        let device = &self.gpu.device;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        tracing::debug!(?geometry, vertices = vertices.len(), "uploaded mesh");
        self.meshes.push(GpuMesh {
            geometry: *geometry,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        });
        self.meshes.len() - 1
    }

    fn ensure_instance_capacity(&mut self, count: usize) {
        let needed = count as u64;
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        self.instance_buffer = create_instance_buffer(&self.gpu.device, capacity);
        self.instance_capacity = capacity;
        tracing::debug!(capacity, "grew instance buffer");
    }

    fn ensure_shadow_map(&mut self, size: UVec2) {
        let size = size.max(UVec2::ONE);
        if self.shadow_map.size != size {
            self.shadow_map = create_shadow_map(
                &self.gpu.device,
                &self.shadow_layout,
                &self.shadow_sampler,
                size,
            );
            tracing::debug!(width = size.x, height = size.y, "created shadow map");
        }
    }

    fn draw_batches(&self, pass: &mut wgpu::RenderPass<'_>, batches: &[Batch], slots: &[usize]) {
        for batch in batches {
            let mesh = &self.meshes[slots[batch.geometry]];
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
        }
    }
}

impl Renderer for WgpuRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        let _span = tracing::info_span!("render_frame").entered();

        let (width, height) = self.gpu.size();
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroSized);
        }

        let plan = FramePlan::build(scene);
        let slots: Vec<usize> = plan.geometries.iter().map(|g| self.ensure_mesh(g)).collect();
        self.ensure_instance_capacity(plan.instances.len());

        let globals = Globals::pack(scene, camera, &self.config, &plan);
        let shadowed = globals.shadows_enabled();
        if let Some(sun) = scene.directional_lights().next().filter(|_| shadowed) {
            self.ensure_shadow_map(sun.shadow.map_size);
        }

        let queue = &self.gpu.queue;
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        if !plan.instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&plan.instances));
        }
        if let Some(sky) = plan.sky_uniforms {
            queue.write_buffer(&self.sky_buffer, 0, bytemuck::bytes_of(&SkyUniformsRaw::from(sky)));
        }

        let frame = self.gpu.acquire()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        if shadowed {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_pipeline(&self.shadow_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            self.draw_batches(&mut pass, &plan.shadow, &slots);
        }

        {
            let (view, resolve_target) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(&surface_view)),
                None => (&surface_view, None),
            };
            let bg = scene.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            pass.set_bind_group(1, &self.sky_bind_group, &[]);
            for side in [Side::Front, Side::Back] {
                let batches: Vec<Batch> =
                    plan.sky.iter().filter(|b| b.side == side).cloned().collect();
                if !batches.is_empty() {
                    pass.set_pipeline(self.sky_pipeline.get(side));
                    self.draw_batches(&mut pass, &batches, &slots);
                }
            }

            pass.set_bind_group(1, &self.shadow_map.bind_group, &[]);
            for side in [Side::Front, Side::Back] {
                let batches: Vec<Batch> =
                    plan.lit.iter().filter(|b| b.side == side).cloned().collect();
                if !batches.is_empty() {
                    pass.set_pipeline(self.lit_pipeline.get(side));
                    self.draw_batches(&mut pass, &batches, &slots);
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        let samples = self.config.sample_count();
        self.depth_view = create_depth_texture(&self.gpu.device, width, height, samples);
        self.msaa_view = (samples > 1).then(|| {
            create_msaa_texture(&self.gpu.device, self.gpu.format(), width, height, samples)
        });
    }

    fn size(&self) -> (u32, u32) {
        self.gpu.size()
    }
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn uniform_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

#[allow(clippy::too_many_arguments)]
fn create_surface_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    (vs, fs): (&str, &str),
    format: wgpu::TextureFormat,
    samples: u32,
    side: Side,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some(vs),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout(), InstanceData::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(match side {
                Side::Front => wgpu::Face::Back,
                Side::Back => wgpu::Face::Front,
            }),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: samples,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

fn create_instance_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_buffer"),
        size: capacity * std::mem::size_of::<InstanceData>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_shadow_map(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    size: UVec2,
) -> ShadowMap {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("shadow_map"),
        size: wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&Default::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("shadow_bind_group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    ShadowMap {
        size,
        view,
        bind_group,
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    samples: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: samples,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

fn create_msaa_texture(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    samples: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("msaa_color_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: samples,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
