//! Scene graph: node storage and hierarchy edits.
//!
//! [`SceneGraph`] owns every [`SpatialNode`] in a slot map. Children are kept
//! as ordered id lists on their parent; the parent link on each node is a
//! plain id used for lookups. Stale ids are reported as
//! [`Error::NodeNotFound`] rather than panicking.
//!
//! Propagation passes live in [`crate::propagate`].
//!
//! # Example
//!
//! ```rust
//! use spatia_scene::SceneGraph;
//! use spatia_math::Vec3;
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.create_node("root");
//! let arm = graph.create_node("arm");
//! graph.add(root, arm).unwrap();
//!
//! graph.get_mut(root).unwrap().set_position(Vec3::new(0.0, 1.0, 0.0));
//! graph.get_mut(arm).unwrap().set_position(Vec3::new(2.0, 0.0, 0.0));
//! graph.update_world_matrices(false);
//!
//! assert_eq!(graph.world_position(arm).unwrap(), Vec3::new(2.0, 1.0, 0.0));
//! ```

use crate::camera::Camera;
use crate::node::{NodeId, SpatialNode};
use slotmap::SlotMap;
use spatia_core::{Error, Result};
use spatia_math::{Mat4, Quat, Vec3};
use tracing::{debug, trace};

/// Arena-backed node hierarchy.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub(crate) nodes: SlotMap<NodeId, SpatialNode>,
    pub(crate) roots: Vec<NodeId>,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            roots: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts a node as a new root.
    ///
    /// Any parent/child links carried by `node` are discarded.
    pub fn insert(&mut self, mut node: SpatialNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.world_matrix_needs_update = true;
        let id = self.nodes.insert(node);
        self.roots.push(id);
        trace!(?id, "Node inserted");
        id
    }

    /// Inserts a new plain node as a root.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(SpatialNode::new(name))
    }

    /// Inserts a new camera node as a root.
    pub fn create_camera(&mut self, name: impl Into<String>, camera: Camera) -> NodeId {
        self.insert(SpatialNode::camera(name, camera))
    }

    /// Node by id.
    pub fn get(&self, id: NodeId) -> Result<&SpatialNode> {
        self.nodes.get(id).ok_or_else(|| Error::node_not_found(id))
    }

    /// Mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut SpatialNode> {
        self.nodes.get_mut(id).ok_or_else(|| Error::node_not_found(id))
    }

    /// Camera data of a camera node.
    pub fn camera(&self, id: NodeId) -> Result<&Camera> {
        self.get(id)?
            .as_camera()
            .ok_or_else(|| Error::not_a_camera(id))
    }

    /// Mutable camera data of a camera node.
    pub fn camera_mut(&mut self, id: NodeId) -> Result<&mut Camera> {
        self.get_mut(id)?
            .as_camera_mut()
            .ok_or_else(|| Error::not_a_camera(id))
    }

    /// Iterates all nodes in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SpatialNode)> {
        self.nodes.iter()
    }

    /// Root ids in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// Children of a node in insertion order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.get(id)?.children())
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut current = self.get(id)?.parent;
        while let Some(p) = current {
            out.push(p);
            current = self.get(p)?.parent;
        }
        Ok(out)
    }

    /// The subtree rooted at `id` in pre-order, `id` first.
    pub fn traverse(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.get(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.get(current)?;
            out.push(current);
            stack.extend(node.children.iter().rev());
        }
        Ok(out)
    }

    /// Every node in pre-order, one root after another.
    pub fn traverse_all(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                out.push(current);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// First node in pre-order whose name matches.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse_all()
            .into_iter()
            .find(|&id| self.nodes.get(id).is_some_and(|n| n.name() == name))
    }

    // ------------------------------------------------------------------
    // Hierarchy edits
    // ------------------------------------------------------------------

    fn check_reparent(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if parent == child || self.ancestors(parent)?.contains(&child) {
            return Err(Error::cycle_detected(parent, child));
        }
        Ok(())
    }

    /// Removes `child` from its parent's list (or the root list).
    fn unlink(&mut self, child: NodeId) -> Result<()> {
        match self.get(child)?.parent {
            Some(parent) => self.get_mut(parent)?.children.retain(|&c| c != child),
            None => self.roots.retain(|&r| r != child),
        }
        let node = self.get_mut(child)?;
        node.parent = None;
        node.world_matrix_needs_update = true;
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get_mut(parent)?.children.push(child);
        let node = self.get_mut(child)?;
        node.parent = Some(parent);
        node.world_matrix_needs_update = true;
        Ok(())
    }

    /// Makes `child` the last child of `parent`, keeping its local transform.
    ///
    /// The child leaves its previous parent first. Fails with
    /// [`Error::CycleDetected`] if `child` is `parent` or one of its ancestors.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_reparent(parent, child)?;
        self.unlink(child)?;
        self.link(parent, child)?;
        trace!(?parent, ?child, "Node added");
        Ok(())
    }

    /// Makes `child` the last child of `parent`, keeping its world transform.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_reparent(parent, child)?;

        self.update_world_matrix(parent, true, false)?;
        let mut m = self.get(parent)?.world_matrix().invert();
        if let Some(old_parent) = self.get(child)?.parent {
            self.update_world_matrix(old_parent, true, false)?;
            m = m * *self.get(old_parent)?.world_matrix();
        }
        self.get_mut(child)?.apply_matrix4(&m);

        self.unlink(child)?;
        self.link(parent, child)?;
        self.update_world_matrix(child, false, true)?;
        trace!(?parent, ?child, "Node attached");
        Ok(())
    }

    /// Detaches a node from its parent; it becomes a root with the same
    /// local transform.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        if self.get(id)?.parent.is_none() {
            return Ok(());
        }
        self.unlink(id)?;
        self.roots.push(id);
        trace!(?id, "Node detached");
        Ok(())
    }

    /// Removes a node and its whole subtree. Returns the number of nodes
    /// dropped.
    pub fn remove(&mut self, id: NodeId) -> Result<usize> {
        let subtree = self.traverse(id)?;
        self.unlink(id)?;
        for node in &subtree {
            self.nodes.remove(*node);
        }
        debug!(?id, removed = subtree.len(), "Subtree removed");
        Ok(subtree.len())
    }

    // ------------------------------------------------------------------
    // World-space queries
    // ------------------------------------------------------------------

    /// Recomputes one node's matrices regardless of dirty state.
    fn refresh(&mut self, id: NodeId) -> Result<()> {
        let parent_world = match self.get(id)?.parent {
            Some(p) => Some(*self.get(p)?.world_matrix()),
            None => None,
        };
        let node = self.get_mut(id)?;
        if node.matrix_auto_update && node.is_local_dirty() {
            node.update_matrix();
        }
        if node.world_matrix_auto_update {
            let world = match parent_world {
                Some(pw) => pw * *node.matrix(),
                None => *node.matrix(),
            };
            node.set_world_matrix(world);
        }
        Ok(())
    }

    /// Brings one node's world matrix up to date outside a full pass.
    ///
    /// With `update_parents` the ancestor chain is refreshed first, top
    /// down; with `update_children` the whole subtree below is refreshed
    /// afterwards. Dirty flags are left set so the next full pass still
    /// cascades to nodes this call did not reach.
    pub fn update_world_matrix(
        &mut self,
        id: NodeId,
        update_parents: bool,
        update_children: bool,
    ) -> Result<()> {
        if update_parents {
            for ancestor in self.ancestors(id)?.into_iter().rev() {
                self.refresh(ancestor)?;
            }
        }
        self.refresh(id)?;
        if update_children {
            for descendant in self.traverse(id)?.into_iter().skip(1) {
                self.refresh(descendant)?;
            }
        }
        Ok(())
    }

    /// Transforms a point from a node's local space to world space.
    ///
    /// Uses the world matrix from the last pass.
    pub fn local_to_world(&self, id: NodeId, point: Vec3) -> Result<Vec3> {
        Ok(point.apply_mat4(self.get(id)?.world_matrix()))
    }

    /// Transforms a world-space point into a node's local space.
    ///
    /// Uses the world matrix from the last pass.
    pub fn world_to_local(&self, id: NodeId, point: Vec3) -> Result<Vec3> {
        Ok(point.apply_mat4(&self.get(id)?.world_matrix().invert()))
    }

    /// World-space position, refreshing the ancestor chain first.
    pub fn world_position(&mut self, id: NodeId) -> Result<Vec3> {
        self.update_world_matrix(id, true, false)?;
        Ok(self.get(id)?.world_matrix().position())
    }

    /// World-space rotation, refreshing the ancestor chain first.
    pub fn world_quaternion(&mut self, id: NodeId) -> Result<Quat> {
        self.update_world_matrix(id, true, false)?;
        let (_, q, _) = self.get(id)?.world_matrix().decompose();
        Ok(q)
    }

    /// World-space scale, refreshing the ancestor chain first.
    pub fn world_scale(&mut self, id: NodeId) -> Result<Vec3> {
        self.update_world_matrix(id, true, false)?;
        let (_, _, s) = self.get(id)?.world_matrix().decompose();
        Ok(s)
    }

    /// Unit direction the node faces in world space.
    ///
    /// +Z for plain nodes, -Z for cameras.
    pub fn world_direction(&mut self, id: NodeId) -> Result<Vec3> {
        self.update_world_matrix(id, true, false)?;
        let node = self.get(id)?;
        let dir = Vec3::from_matrix_column(node.world_matrix(), 2).normalize();
        Ok(if node.is_camera() { -dir } else { dir })
    }

    /// Rotates a node so it faces a world-space point.
    ///
    /// Cameras point their -Z axis at the target, other nodes their +Z
    /// axis. The node's `up` vector resolves the roll.
    pub fn look_at(&mut self, id: NodeId, target: Vec3) -> Result<()> {
        self.update_world_matrix(id, true, false)?;
        let node = self.get(id)?;
        let position = node.world_matrix().position();

        let m = if node.is_camera() {
            Mat4::looking_at(position, target, node.up())
        } else {
            Mat4::looking_at(target, position, node.up())
        };
        let mut q = Quat::from_rotation_matrix(&m);

        if let Some(parent) = node.parent {
            let parent_rotation = self.get(parent)?.world_matrix().extract_rotation();
            q = Quat::from_rotation_matrix(&parent_rotation).invert() * q;
        }

        self.get_mut(id)?.set_quaternion(q);
        Ok(())
    }

    /// World-space point to the camera's normalized device coordinates.
    pub fn project(&self, camera: NodeId, point: Vec3) -> Result<Vec3> {
        Ok(self.camera(camera)?.project(point))
    }

    /// Normalized device coordinates to a world-space point.
    pub fn unproject(&self, camera: NodeId, ndc: Vec3) -> Result<Vec3> {
        let world = *self.get(camera)?.world_matrix();
        Ok(self.camera(camera)?.unproject(ndc, &world))
    }
}
