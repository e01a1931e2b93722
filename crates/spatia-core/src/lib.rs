//! # spatia-core
//!
//! Core types shared by every spatia crate.
//!
//! - [`Error`], [`Result`] - Unified error type for math and scene operations
//! - [`CoordinateSystem`] - Clip-space depth-range convention used by projections
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The rest of the workspace builds
//! on it:
//!
//! ```text
//! spatia-core (this crate)
//!    ^
//!    |
//!    +-- spatia-math (vectors, matrices, rotations)
//!    +-- spatia-scene (nodes, hierarchy, cameras)
//!    +-- spatia-cli
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`CoordinateSystem`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod coordinate;
pub mod error;

pub use coordinate::*;
pub use error::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use spatia_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::coordinate::CoordinateSystem;
    pub use crate::error::{Error, Result};
}
