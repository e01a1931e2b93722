//! Error types for spatia operations.
//!
//! This module provides the error type shared by the math and scene crates.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes that are reported rather than
//! absorbed:
//! - Invalid enumeration values arriving as text or numeric ids
//!   (rotation orders, coordinate systems)
//! - Scene graph misuse (stale node ids, cycles, camera queries on plain nodes)
//!
//! Numeric edge cases are deliberately *not* errors: a singular matrix inverts
//! to the all-zero matrix and NaN/infinity propagate per IEEE-754.
//!
//! # Usage
//!
//! ```rust
//! use spatia_core::{Error, Result};
//!
//! fn parse_axis(name: &str) -> Result<usize> {
//!     match name {
//!         "x" => Ok(0),
//!         "y" => Ok(1),
//!         "z" => Ok(2),
//!         _ => Err(Error::other(format!("unknown axis '{name}'"))),
//!     }
//! }
//!
//! assert!(parse_axis("w").is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::coordinate::CoordinateSystem`] - Strict id/name parsing
//! - `spatia-math` - Rotation order parsing
//! - `spatia-scene` - Node lookup and hierarchy edits

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during spatia operations.
///
/// # Categories
///
/// - **Enumeration errors**: [`UnknownRotationOrder`](Error::UnknownRotationOrder),
///   [`InvalidCoordinateSystem`](Error::InvalidCoordinateSystem)
/// - **Graph errors**: [`NodeNotFound`](Error::NodeNotFound),
///   [`CycleDetected`](Error::CycleDetected), [`NotACamera`](Error::NotACamera)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Rotation order name is not one of the six supported orders.
    ///
    /// Lenient call sites (Euler parsing helpers) log this instead of
    /// returning it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spatia_core::Error;
    ///
    /// let err = Error::unknown_rotation_order("XXY");
    /// assert!(err.to_string().contains("XXY"));
    /// ```
    #[error("unknown rotation order '{name}' (expected XYZ, XZY, YXZ, YZX, ZXY or ZYX)")]
    UnknownRotationOrder {
        /// The rejected order name
        name: String,
    },

    /// Coordinate system value is not a supported depth-range convention.
    ///
    /// Projection construction is strict: this aborts the build.
    #[error("invalid coordinate system '{value}' (expected webgl/2000 or webgpu/2001)")]
    InvalidCoordinateSystem {
        /// The rejected value, as given
        value: String,
    },

    /// A node id does not refer to a live node in the graph.
    #[error("node {node} not found in scene graph")]
    NodeNotFound {
        /// Debug rendering of the stale id
        node: String,
    },

    /// Re-parenting would make a node its own ancestor.
    #[error("cannot parent {child} under {parent}: would create a cycle")]
    CycleDetected {
        /// Requested parent
        parent: String,
        /// Node being re-parented
        child: String,
    },

    /// A camera operation was requested on a node that is not a camera.
    #[error("node {node} is not a camera")]
    NotACamera {
        /// Debug rendering of the node id
        node: String,
    },

    /// Generic error with custom message.
    ///
    /// Prefer specific error variants when possible.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::UnknownRotationOrder`] error.
    #[inline]
    pub fn unknown_rotation_order(name: impl Into<String>) -> Self {
        Self::UnknownRotationOrder { name: name.into() }
    }

    /// Creates an [`Error::InvalidCoordinateSystem`] error.
    #[inline]
    pub fn invalid_coordinate_system(value: impl ToString) -> Self {
        Self::InvalidCoordinateSystem {
            value: value.to_string(),
        }
    }

    /// Creates an [`Error::NodeNotFound`] error from any debuggable id.
    #[inline]
    pub fn node_not_found(node: impl std::fmt::Debug) -> Self {
        Self::NodeNotFound {
            node: format!("{node:?}"),
        }
    }

    /// Creates an [`Error::CycleDetected`] error.
    #[inline]
    pub fn cycle_detected(parent: impl std::fmt::Debug, child: impl std::fmt::Debug) -> Self {
        Self::CycleDetected {
            parent: format!("{parent:?}"),
            child: format!("{child:?}"),
        }
    }

    /// Creates an [`Error::NotACamera`] error.
    #[inline]
    pub fn not_a_camera(node: impl std::fmt::Debug) -> Self {
        Self::NotACamera {
            node: format!("{node:?}"),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this error reports an invalid enumeration value.
    #[inline]
    pub fn is_invalid_enum(&self) -> bool {
        matches!(
            self,
            Self::UnknownRotationOrder { .. } | Self::InvalidCoordinateSystem { .. }
        )
    }

    /// Returns `true` if this error comes from scene graph misuse.
    #[inline]
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound { .. } | Self::CycleDetected { .. } | Self::NotACamera { .. }
        )
    }
}
