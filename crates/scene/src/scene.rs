use basicworld_common::{Color, NodeId};
use std::collections::BTreeMap;

use crate::node::{DirectionalLight, HemisphereLight, Mesh, Node};

/// Exponential-squared distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogExp2 {
    pub color: Color,
    pub density: f32,
}

impl FogExp2 {
    pub fn new(color: Color, density: f32) -> Self {
        Self { color, density }
    }
}

/// Flat container of lights and meshes traversed once per frame.
///
/// Nodes are only ever added. BTreeMap keeps traversal in insertion order,
/// since ids are handed out sequentially.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
    pub background: Color,
    pub fog: Option<FogExp2>,
}

impl Scene {
    /// Empty scene with a white background and no fog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a node and return its handle.
    pub fn add(&mut self, node: impl Into<Node>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node.into());
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn mesh(&self, id: NodeId) -> Option<&Mesh> {
        match self.nodes.get(&id) {
            Some(Node::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Mesh)> {
        self.nodes.iter().filter_map(|(id, node)| match node {
            Node::Mesh(mesh) => Some((*id, mesh)),
            _ => None,
        })
    }

    pub fn directional_lights(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.nodes.values().filter_map(|node| match node {
            Node::DirectionalLight(light) => Some(light),
            _ => None,
        })
    }

    pub fn hemisphere_lights(&self) -> impl Iterator<Item = &HemisphereLight> {
        self.nodes.values().filter_map(|node| match node {
            Node::HemisphereLight(light) => Some(light),
            _ => None,
        })
    }
}
