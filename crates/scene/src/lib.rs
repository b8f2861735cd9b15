//! Scene graph: lights, meshes and the demo scene built from them.
//!
//! # Invariants
//! - Nodes are owned by the scene and never removed.
//! - The ball sequence holds handles into the same scene, in creation order.

pub mod ball_grid;
pub mod demo;
pub mod node;
pub mod scene;
pub mod sky;

pub use demo::DemoScene;
pub use node::{
    DirectionalLight, DirectionalShadow, Geometry, HemisphereLight, Material, Mesh, Node,
    ShadowCamera, Side,
};
pub use scene::{FogExp2, Scene};
pub use sky::SkyUniforms;
