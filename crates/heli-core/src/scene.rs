//! Retained scene graph: named nodes with local transforms, plus the scene's
//! two lights.

use crate::error::CoreError;
use crate::mesh::Shape;
use crate::transform::Transform;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Image-backed texture slots; the host decides where each one comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Body,
    Rotor,
    Ground,
    Sky,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 4] = [
        TextureSlot::Body,
        TextureSlot::Rotor,
        TextureSlot::Ground,
        TextureSlot::Sky,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Color and texture only, ignores lights.
    Unlit,
    /// Ambient plus Lambert term from the directional light.
    Lit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: [f32; 3],
    pub texture: Option<TextureSlot>,
}

impl Material {
    pub fn unlit(color: [f32; 3]) -> Self {
        Self {
            shading: Shading::Unlit,
            color,
            texture: None,
        }
    }

    pub fn textured(shading: Shading, slot: TextureSlot) -> Self {
        Self {
            shading,
            color: crate::constants::WHITE,
            texture: Some(slot),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshDesc {
    pub shape: Shape,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(MeshDesc),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: &'static str,
    pub kind: NodeKind,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 12]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Directional light. Its `position` is what drag input rotates; it shines
/// from that position toward the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from the origin toward the light.
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    by_name: FnvHashMap<&'static str, NodeId>,
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
}

impl Scene {
    pub fn new(ambient: AmbientLight, sun: DirectionalLight) -> Self {
        Self {
            nodes: Vec::new(),
            by_name: FnvHashMap::default(),
            ambient,
            sun,
        }
    }

    /// Add a node at the root of the scene.
    pub fn add(
        &mut self,
        name: &'static str,
        kind: NodeKind,
        transform: Transform,
    ) -> Result<NodeId, CoreError> {
        self.insert(name, kind, transform, None)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: &'static str,
        kind: NodeKind,
        transform: Transform,
    ) -> Result<NodeId, CoreError> {
        if parent.0 >= self.nodes.len() {
            return Err(CoreError::UnknownNode(parent));
        }
        self.insert(name, kind, transform, Some(parent))
    }

    fn insert(
        &mut self,
        name: &'static str,
        kind: NodeKind,
        transform: Transform,
        parent: Option<NodeId>,
    ) -> Result<NodeId, CoreError> {
        if self.by_name.contains_key(name) {
            return Err(CoreError::DuplicateNode(name));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            kind,
            transform,
            parent,
            children: SmallVec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, CoreError> {
        self.nodes.get(id.0).ok_or(CoreError::UnknownNode(id))
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, CoreError> {
        self.nodes
            .get_mut(id.0)
            .map(|n| &mut n.transform)
            .ok_or(CoreError::UnknownNode(id))
    }

    /// Local-to-world matrix, composing every ancestor's transform.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, CoreError> {
        let mut node = self.node(id)?;
        let mut m = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            m = node.transform.matrix() * m;
        }
        Ok(m)
    }

    /// Every mesh node in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &MeshDesc)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match &n.kind {
                NodeKind::Mesh(desc) => Some((NodeId(i), desc)),
                NodeKind::Group => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WHITE;

    fn empty_scene() -> Scene {
        Scene::new(
            AmbientLight {
                color: WHITE,
                intensity: 1.0,
            },
            DirectionalLight {
                color: WHITE,
                intensity: 1.0,
                position: Vec3::ONE,
            },
        )
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut scene = empty_scene();
        scene.add("a", NodeKind::Group, Transform::default()).unwrap();
        let err = scene.add("a", NodeKind::Group, Transform::default());
        assert_eq!(err, Err(CoreError::DuplicateNode("a")));
    }

    #[test]
    fn child_of_unknown_parent_is_rejected() {
        let mut scene = empty_scene();
        let err = scene.add_child(NodeId(7), "x", NodeKind::Group, Transform::default());
        assert_eq!(err, Err(CoreError::UnknownNode(NodeId(7))));
        assert!(scene.is_empty());
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = empty_scene();
        let root = scene
            .add("root", NodeKind::Group, Transform::at(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let mid = scene
            .add_child(root, "mid", NodeKind::Group, Transform::at(Vec3::new(0.0, 2.0, 0.0)))
            .unwrap();
        let leaf = scene
            .add_child(mid, "leaf", NodeKind::Group, Transform::at(Vec3::new(0.0, 0.0, 3.0)))
            .unwrap();
        let p = scene.world_matrix(leaf).unwrap().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.node(root).unwrap().children.as_slice(), &[mid]);
    }
}
