//! WGSL sources. Every module shares the per-frame `Globals` block and the
//! mesh vertex/instance inputs.

macro_rules! shared_wgsl {
    () => {
        r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    // xyz: unit vector toward the sun, w: intensity
    light_direction: vec4<f32>,
    light_color: vec4<f32>,
    // w: hemisphere intensity
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    // rgb: color, w: exp2 density
    fog: vec4<f32>,
    // x: bias, y: texel size, z: enabled, w: pcf
    shadow: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    // x: receives shadows
    @location(7) params: vec4<f32>,
};

fn model_matrix(instance: InstanceInput) -> mat4x4<f32> {
    return mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
}
"#
    };
}

/// Hemisphere + directional lighting with PCF shadows and exp2 fog.
pub const LIT_SHADER: &str = concat!(
    shared_wgsl!(),
    r#"
@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) light_space: vec4<f32>,
    @location(4) receive_shadow: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = model_matrix(instance);
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = instance.color;
    out.light_space = globals.light_view_proj * world_pos;
    out.receive_shadow = instance.params.x;
    return out;
}

fn shadow_visibility(light_space: vec4<f32>) -> f32 {
    let ndc = light_space.xyz / light_space.w;
    let uv = vec2<f32>(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5);
    if (uv.x < 0.0 || uv.x > 1.0 || uv.y < 0.0 || uv.y > 1.0 || ndc.z > 1.0) {
        return 1.0;
    }
    let depth = ndc.z + globals.shadow.x;

    if (globals.shadow.w < 0.5) {
        return textureSampleCompareLevel(shadow_map, shadow_sampler, uv, depth);
    }

    let texel = globals.shadow.y;
    var lit = 0.0;
    for (var y = -1; y <= 1; y += 1) {
        for (var x = -1; x <= 1; x += 1) {
            let offset = vec2<f32>(f32(x), f32(y)) * texel;
            lit += textureSampleCompareLevel(shadow_map, shadow_sampler, uv + offset, depth);
        }
    }
    return lit / 9.0;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);

    let hemi_weight = 0.5 * n.y + 0.5;
    let hemi = mix(globals.hemi_ground.rgb, globals.hemi_sky.rgb, hemi_weight) * globals.hemi_sky.w;

    var visibility = 1.0;
    if (in.receive_shadow > 0.5 && globals.shadow.z > 0.5) {
        visibility = shadow_visibility(in.light_space);
    }
    let l = globals.light_direction.xyz;
    let irradiance = globals.light_color.rgb * globals.light_direction.w;
    let direct = irradiance * max(dot(n, l), 0.0) * visibility;

    var color = in.color.rgb * (hemi + direct);

    let distance = length(in.world_position - globals.camera_position.xyz);
    let density = globals.fog.w;
    let fog_factor = clamp(1.0 - exp(-density * density * distance * distance), 0.0, 1.0);
    color = mix(color, globals.fog.rgb, fog_factor);

    return vec4<f32>(color, in.color.a);
}
"#
);

/// Two-color vertical gradient for the sky dome. Unlit and unfogged.
pub const SKY_SHADER: &str = concat!(
    shared_wgsl!(),
    r#"
struct SkyUniforms {
    top_color: vec3<f32>,
    offset: f32,
    bottom_color: vec3<f32>,
    exponent: f32,
};

@group(1) @binding(0)
var<uniform> sky: SkyUniforms;

struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
};

@vertex
fn vs_sky(vertex: VertexInput, instance: InstanceInput) -> SkyOutput {
    let world_pos = model_matrix(instance) * vec4<f32>(vertex.position, 1.0);

    var out: SkyOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    return out;
}

@fragment
fn fs_sky(in: SkyOutput) -> @location(0) vec4<f32> {
    let h = normalize(in.world_position + vec3<f32>(sky.offset)).y;
    let t = max(pow(max(h, 0.0), sky.exponent), 0.0);
    return vec4<f32>(mix(sky.bottom_color, sky.top_color, t), 1.0);
}
"#
);

/// Depth-only pass from the sun's shadow camera.
pub const SHADOW_SHADER: &str = concat!(
    shared_wgsl!(),
    r#"
@vertex
fn vs_shadow(vertex: VertexInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    return globals.light_view_proj * model_matrix(instance) * vec4<f32>(vertex.position, 1.0);
}
"#
);
