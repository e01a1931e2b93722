//! # spatia-scene
//!
//! Retained-mode scene hierarchy built on `spatia-math`.
//!
//! # Modules
//!
//! - [`node`] - [`SpatialNode`]: position/rotation/scale kept consistent, local and world matrices
//! - [`graph`] - [`SceneGraph`]: arena storage, parenting, world-space queries
//! - [`propagate`] - Dirty-flag world-matrix propagation (sequential and parallel)
//! - [`camera`] - [`Camera`] with perspective or orthographic [`Projection`]
//!
//! # Example
//!
//! ```rust
//! use spatia_scene::{Camera, PerspectiveParams, SceneGraph};
//! use spatia_math::Vec3;
//!
//! let mut graph = SceneGraph::new();
//! let rig = graph.create_node("rig");
//! let cam = graph.create_camera("cam", Camera::perspective(PerspectiveParams {
//!     fov: 60.0,
//!     aspect: 16.0 / 9.0,
//!     ..Default::default()
//! }));
//! graph.add(rig, cam).unwrap();
//!
//! graph.get_mut(rig).unwrap().set_position(Vec3::new(0.0, 2.0, 10.0));
//! graph.look_at(cam, Vec3::ZERO).unwrap();
//! graph.update_world_matrices(false);
//!
//! let view = graph.camera(cam).unwrap().world_matrix_inverse();
//! assert!(!view.is_zero());
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - [`SceneGraph::update_world_matrices_parallel`] on rayon
//! - `serde` - Serialization for cameras and projection parameters

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod graph;
pub mod node;
pub mod propagate;

pub use camera::{Camera, OrthographicParams, PerspectiveParams, Projection, ViewWindow};
pub use graph::SceneGraph;
pub use node::{DEFAULT_UP, NodeId, NodeKind, SpatialNode};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::{Camera, OrthographicParams, PerspectiveParams, Projection, ViewWindow};
    pub use crate::graph::SceneGraph;
    pub use crate::node::{NodeId, NodeKind, SpatialNode};
    pub use spatia_core::{CoordinateSystem, Error, Result};
    pub use spatia_math::{Euler, Mat4, Quat, RotationOrder, Vec3};
}
