//! Creature model: an arena of transform nodes built from primitive boxes
//!
//! Nodes reference each other by `NodeId` (an index into the arena), so the
//! part hierarchy has a single owner and no reference cycles. The creature's
//! world placement (the root transform) lives outside the model, which keeps
//! it stable across regeneration.

use glam::{Affine3A, EulerRot, Quat, Vec3};

use crate::ledger::MeshLedger;
use crate::palette::Color;
use crate::parts::SpeciesParts;
use crate::types::{EntityId, Species};

/// Stable index of a node inside a `NodeArena`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Local transform: translation, XYZ euler rotation (radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Affine matrix (scale, then rotation X·Y·Z, then translation)
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.translation,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned box in its node's local space
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPrimitive {
    pub size: Vec3,
    pub offset: Vec3,
    pub color: Color,
    pub mesh: EntityId,
}

/// A node of the part hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    pub name: &'static str,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub transform: Transform,
    pub boxes: Vec<BoxPrimitive>,
}

/// A box placed in world space: `transform` maps the unit cube
/// `[-0.5, 0.5]^3` onto the box
#[derive(Debug, Clone, Copy)]
pub struct WorldBox {
    pub transform: Affine3A,
    pub color: Color,
}

/// Flat storage for a node tree
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless node
    pub fn add_root(&mut self, name: &'static str) -> NodeId {
        self.push(name, None, Transform::IDENTITY)
    }

    /// Add a node under `parent`
    pub fn add_child(&mut self, parent: NodeId, name: &'static str, transform: Transform) -> NodeId {
        let id = self.push(name, Some(parent), transform);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, name: &'static str, parent: Option<NodeId>, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent,
            children: Vec::new(),
            transform,
            boxes: Vec::new(),
        });
        id
    }

    /// Attach a box to `node`, registering its mesh with the ledger
    pub fn add_box(
        &mut self,
        node: NodeId,
        ledger: &mut MeshLedger,
        size: Vec3,
        offset: Vec3,
        color: Color,
    ) {
        let mesh = ledger.alloc();
        self.nodes[node.0].boxes.push(BoxPrimitive {
            size,
            offset,
            color,
            mesh,
        });
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the first node with a given name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// World matrix of `id`, with `base` as the parent of the arena's roots
    pub fn world_matrix(&self, id: NodeId, base: Affine3A) -> Affine3A {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.nodes[node.0].parent;
        }
        chain
            .iter()
            .rev()
            .fold(base, |acc, node| acc * self.nodes[node.0].transform.matrix())
    }

    /// Every box below `root` in world space
    pub fn world_boxes(&self, root: NodeId, base: Affine3A) -> Vec<WorldBox> {
        let mut out = Vec::new();
        let mut stack = vec![(root, base * self.nodes[root.0].transform.matrix())];
        while let Some((id, matrix)) = stack.pop() {
            let node = &self.nodes[id.0];
            for primitive in &node.boxes {
                out.push(WorldBox {
                    transform: matrix
                        * Affine3A::from_scale_rotation_translation(
                            primitive.size,
                            Quat::IDENTITY,
                            primitive.offset,
                        ),
                    color: primitive.color,
                });
            }
            for child in &node.children {
                stack.push((*child, matrix * self.nodes[child.0].transform.matrix()));
            }
        }
        out
    }

    /// Mesh handles of every box in the arena
    pub fn meshes(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes
            .iter()
            .flat_map(|node| node.boxes.iter().map(|b| b.mesh))
    }
}

/// Resting values the animator offsets from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestPose {
    /// Body node height above the model origin
    pub body_height: f32,
}

/// The assembled creature: arena, named parts, and generation results
#[derive(Debug)]
pub struct CreatureModel {
    pub arena: NodeArena,
    /// Subtree root; sleep and photo poses tilt this node
    pub model: NodeId,
    pub parts: SpeciesParts,
    pub species: Species,
    pub palette_name: &'static str,
    pub scale: f32,
    pub rest: RestPose,
    disposed: bool,
}

impl CreatureModel {
    pub(crate) fn new(
        arena: NodeArena,
        model: NodeId,
        parts: SpeciesParts,
        species: Species,
        palette_name: &'static str,
        scale: f32,
        rest: RestPose,
    ) -> Self {
        Self {
            arena,
            model,
            parts,
            species,
            palette_name,
            scale,
            rest,
            disposed: false,
        }
    }

    /// World-space boxes given the creature's root transform
    pub fn world_boxes(&self, root: &Transform) -> Vec<WorldBox> {
        self.arena.world_boxes(self.model, root.matrix())
    }

    pub fn model_transform(&self) -> &Transform {
        self.arena.transform(self.model)
    }

    pub fn model_transform_mut(&mut self) -> &mut Transform {
        self.arena.transform_mut(self.model)
    }

    /// Number of primitive boxes in the model
    pub fn box_count(&self) -> usize {
        self.arena.meshes().count()
    }

    /// Release every mesh handle; safe to call more than once
    pub fn dispose(&mut self, ledger: &mut MeshLedger) {
        if self.disposed {
            return;
        }
        let released = ledger.release_all(self.arena.meshes());
        log::debug!("Disposed creature model ({} meshes)", released);
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_parenting() {
        let mut arena = NodeArena::new();
        let root = arena.add_root("root");
        let child = arena.add_child(root, "child", Transform::from_translation(Vec3::Y));
        assert_eq!(arena.get(child).parent, Some(root));
        assert_eq!(arena.get(root).children, vec![child]);
        assert_eq!(arena.find("child"), Some(child));
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut arena = NodeArena::new();
        let root = arena.add_root("root");
        arena.transform_mut(root).translation = Vec3::new(1.0, 0.0, 0.0);
        let child = arena.add_child(root, "child", Transform::from_translation(Vec3::Y));

        let base = Affine3A::from_translation(Vec3::new(0.0, 0.0, 2.0));
        let point = arena.world_matrix(child, base).transform_point3(Vec3::ZERO);
        assert!((point - Vec3::new(1.0, 1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_world_boxes_apply_size_and_offset() {
        let mut ledger = MeshLedger::new();
        let mut arena = NodeArena::new();
        let root = arena.add_root("root");
        arena.add_box(
            root,
            &mut ledger,
            Vec3::new(2.0, 1.0, 1.0),
            Vec3::new(0.0, 3.0, 0.0),
            [255; 4],
        );
        let boxes = arena.world_boxes(root, Affine3A::IDENTITY);
        assert_eq!(boxes.len(), 1);
        let corner = boxes[0].transform.transform_point3(Vec3::splat(0.5));
        assert!((corner - Vec3::new(1.0, 3.5, 0.5)).length() < 1e-5);
        assert_eq!(ledger.live_count(), 1);
    }

    #[test]
    fn test_rotation_matches_xyz_order() {
        let t = Transform::IDENTITY.with_rotation(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5);
    }
}
