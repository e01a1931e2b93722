//! Scene nodes.
//!
//! A [`SpatialNode`] owns its local transform in two equivalent rotation
//! forms (Euler angles and a quaternion) plus position and scale. The setters
//! keep both rotation forms in sync and mark the node dirty; the
//! [`SceneGraph`](crate::SceneGraph) turns dirty nodes into fresh local and
//! world matrices during a propagation pass.
//!
//! Hierarchy links (`parent`, `children`) are ids into the owning graph and
//! are only edited through the graph.

use crate::camera::Camera;
use slotmap::new_key_type;
use spatia_math::{Euler, Mat4, Quat, RotationOrder, Vec3};

new_key_type! {
    /// Handle to a node stored in a [`SceneGraph`](crate::SceneGraph).
    pub struct NodeId;
}

/// Default up direction for new nodes.
pub const DEFAULT_UP: Vec3 = Vec3::Y;

/// What a node is, beyond its transform.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeKind {
    /// A plain transform node.
    #[default]
    Empty,
    /// A camera; its local -Z axis is the view direction.
    Camera(Camera),
}

/// A node in the scene hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialNode {
    name: String,
    kind: NodeKind,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    position: Vec3,
    rotation: Euler,
    quaternion: Quat,
    scale: Vec3,
    up: Vec3,

    matrix: Mat4,
    world_matrix: Mat4,

    /// Recompute the local matrix from position/rotation/scale during propagation.
    pub matrix_auto_update: bool,
    /// Recompute the world matrix during propagation when it is stale.
    pub world_matrix_auto_update: bool,
    pub(crate) world_matrix_needs_update: bool,
    local_dirty: bool,
}

impl SpatialNode {
    /// Creates a plain node with identity transforms.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Empty)
    }

    /// Creates a camera node with identity transforms.
    pub fn camera(name: impl Into<String>, camera: Camera) -> Self {
        Self::with_kind(name, NodeKind::Camera(camera))
    }

    /// Creates a node of the given kind with identity transforms.
    pub fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            position: Vec3::ZERO,
            rotation: Euler::default(),
            quaternion: Quat::IDENTITY,
            scale: Vec3::ONE,
            up: DEFAULT_UP,
            matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            matrix_auto_update: true,
            world_matrix_auto_update: true,
            // a fresh node has never had its world matrix computed
            world_matrix_needs_update: true,
            local_dirty: false,
        }
    }

    /// Node name (not required to be unique).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the node.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Node kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// True for camera nodes.
    pub fn is_camera(&self) -> bool {
        matches!(self.kind, NodeKind::Camera(_))
    }

    /// Camera data, if this is a camera node.
    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            NodeKind::Empty => None,
        }
    }

    /// Mutable camera data, if this is a camera node.
    pub fn as_camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.kind {
            NodeKind::Camera(camera) => Some(camera),
            NodeKind::Empty => None,
        }
    }

    /// Parent id, `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    // ------------------------------------------------------------------
    // Local transform
    // ------------------------------------------------------------------

    /// Local position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Sets the local position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.local_dirty = true;
    }

    /// Mutable local position. Marks the node dirty.
    pub fn position_mut(&mut self) -> &mut Vec3 {
        self.local_dirty = true;
        &mut self.position
    }

    /// Local rotation as Euler angles.
    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Sets the Euler rotation; the quaternion follows.
    pub fn set_rotation(&mut self, rotation: Euler) {
        self.rotation = rotation;
        self.quaternion = Quat::from_euler(&rotation);
        self.local_dirty = true;
    }

    /// Changes the Euler order, keeping the orientation.
    pub fn set_rotation_order(&mut self, order: RotationOrder) {
        self.rotation.reorder(order);
    }

    /// Local rotation as a quaternion.
    pub fn quaternion(&self) -> Quat {
        self.quaternion
    }

    /// Sets the quaternion; the Euler angles follow in their current order.
    pub fn set_quaternion(&mut self, quaternion: Quat) {
        self.quaternion = quaternion;
        self.rotation.set_from_quat(quaternion, self.rotation.order);
        self.local_dirty = true;
    }

    /// Local scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Sets the local scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.local_dirty = true;
    }

    /// Mutable local scale. Marks the node dirty.
    pub fn scale_mut(&mut self) -> &mut Vec3 {
        self.local_dirty = true;
        &mut self.scale
    }

    /// Up direction used by `look_at`.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Sets the up direction used by `look_at`.
    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// True when position/rotation/scale changed since the last `update_matrix`.
    pub fn is_local_dirty(&self) -> bool {
        self.local_dirty
    }

    /// True when the world matrix is waiting for the next propagation pass.
    pub fn world_matrix_needs_update(&self) -> bool {
        self.world_matrix_needs_update
    }

    /// Flags the world matrix for recompute on the next pass.
    pub fn mark_world_dirty(&mut self) {
        self.world_matrix_needs_update = true;
    }

    // ------------------------------------------------------------------
    // Matrices
    // ------------------------------------------------------------------

    /// Local matrix as of the last `update_matrix` (or `set_matrix`).
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// World matrix as of the last propagation pass.
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Replaces the local matrix directly.
    ///
    /// Meant for nodes with `matrix_auto_update == false`. With auto-update on,
    /// the next pass recomposes the matrix from position, rotation and scale.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.local_dirty = self.matrix_auto_update;
        self.world_matrix_needs_update = true;
    }

    /// Recomposes the local matrix from position, quaternion and scale.
    pub fn update_matrix(&mut self) {
        self.matrix = Mat4::compose(self.position, self.quaternion, self.scale);
        self.local_dirty = false;
        self.world_matrix_needs_update = true;
    }

    /// Stores a local matrix recomposed during a pass.
    pub(crate) fn commit_matrix(&mut self, local: Mat4) {
        self.matrix = local;
        self.local_dirty = false;
    }

    pub(crate) fn set_world_matrix(&mut self, world: Mat4) {
        self.world_matrix = world;
        if let NodeKind::Camera(camera) = &mut self.kind {
            camera.update_world_matrix_inverse(&world);
        }
    }

    // ------------------------------------------------------------------
    // Transform operations
    // ------------------------------------------------------------------

    /// Premultiplies the local transform by `m` and re-derives position,
    /// rotation and scale from the result.
    pub fn apply_matrix4(&mut self, m: &Mat4) {
        if self.matrix_auto_update {
            self.update_matrix();
        }
        self.matrix = m.mul_mat(&self.matrix);
        let (position, quaternion, scale) = self.matrix.decompose();
        self.position = position;
        self.scale = scale;
        self.set_quaternion(quaternion);
        self.local_dirty = false;
        self.world_matrix_needs_update = true;
    }

    /// Premultiplies the rotation by `q` (rotation in parent space).
    pub fn apply_quaternion(&mut self, q: Quat) {
        self.set_quaternion(q * self.quaternion);
    }

    /// Sets the rotation from a unit axis and an angle in radians.
    pub fn set_rotation_from_axis_angle(&mut self, axis: Vec3, angle: f64) {
        self.set_quaternion(Quat::from_axis_angle(axis, angle));
    }

    /// Sets the rotation from Euler angles.
    pub fn set_rotation_from_euler(&mut self, euler: &Euler) {
        self.set_rotation(*euler);
    }

    /// Sets the rotation from the upper 3x3 of a pure rotation matrix.
    pub fn set_rotation_from_matrix(&mut self, m: &Mat4) {
        self.set_quaternion(Quat::from_rotation_matrix(m));
    }

    /// Sets the rotation from a quaternion.
    pub fn set_rotation_from_quaternion(&mut self, q: Quat) {
        self.set_quaternion(q);
    }

    /// Rotates around a unit axis in local space.
    pub fn rotate_on_axis(&mut self, axis: Vec3, angle: f64) {
        let q = Quat::from_axis_angle(axis, angle);
        self.set_quaternion(self.quaternion * q);
    }

    /// Rotates around a unit axis in parent space.
    ///
    /// Ignores any rotation of the parent itself.
    pub fn rotate_on_world_axis(&mut self, axis: Vec3, angle: f64) {
        let q = Quat::from_axis_angle(axis, angle);
        self.set_quaternion(q * self.quaternion);
    }

    /// Rotates around the local X axis.
    pub fn rotate_x(&mut self, angle: f64) {
        self.rotate_on_axis(Vec3::X, angle);
    }

    /// Rotates around the local Y axis.
    pub fn rotate_y(&mut self, angle: f64) {
        self.rotate_on_axis(Vec3::Y, angle);
    }

    /// Rotates around the local Z axis.
    pub fn rotate_z(&mut self, angle: f64) {
        self.rotate_on_axis(Vec3::Z, angle);
    }

    /// Moves along a unit axis expressed in local space.
    pub fn translate_on_axis(&mut self, axis: Vec3, distance: f64) {
        let offset = axis.apply_quat(self.quaternion) * distance;
        self.set_position(self.position + offset);
    }

    /// Moves along the local X axis.
    pub fn translate_x(&mut self, distance: f64) {
        self.translate_on_axis(Vec3::X, distance);
    }

    /// Moves along the local Y axis.
    pub fn translate_y(&mut self, distance: f64) {
        self.translate_on_axis(Vec3::Y, distance);
    }

    /// Moves along the local Z axis.
    pub fn translate_z(&mut self, distance: f64) {
        self.translate_on_axis(Vec3::Z, distance);
    }
}

impl Default for SpatialNode {
    fn default() -> Self {
        Self::new("")
    }
}
