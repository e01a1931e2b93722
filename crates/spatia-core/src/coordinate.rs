//! Clip-space depth-range conventions.
//!
//! Projection matrices map view-space depth into normalized device
//! coordinates. Two conventions are supported:
//!
//! ```text
//! WebGl   z_ndc in [-1, 1]   (OpenGL style)
//! WebGpu  z_ndc in [ 0, 1]   (WebGPU / Vulkan / D3D style)
//! ```
//!
//! Both can additionally run in *reversed depth* mode, which maps near to 1
//! and far to 0 under either convention. That flag lives next to the convention on the camera;
//! it is not part of this enum.
//!
//! # Parsing is strict
//!
//! Unlike rotation orders, an unsupported coordinate system is an error that
//! aborts projection construction:
//!
//! ```rust
//! use spatia_core::CoordinateSystem;
//!
//! assert_eq!(CoordinateSystem::try_from(2001), Ok(CoordinateSystem::WebGpu));
//! assert!(CoordinateSystem::try_from(42).is_err());
//! assert!("directx".parse::<CoordinateSystem>().is_err());
//! ```

use crate::{Error, Result};
use std::str::FromStr;

/// Depth-range convention for projection matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    /// NDC depth in [-1, 1].
    #[default]
    WebGl,
    /// NDC depth in [0, 1].
    WebGpu,
}

impl CoordinateSystem {
    /// Numeric id of the WebGL convention.
    pub const WEBGL_ID: u32 = 2000;

    /// Numeric id of the WebGPU convention.
    pub const WEBGPU_ID: u32 = 2001;

    /// Numeric id used by scene files and uniform blocks.
    #[inline]
    pub const fn id(&self) -> u32 {
        match self {
            Self::WebGl => Self::WEBGL_ID,
            Self::WebGpu => Self::WEBGPU_ID,
        }
    }

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WebGl => "webgl",
            Self::WebGpu => "webgpu",
        }
    }

    /// NDC depth range `(min, max)` for this convention.
    #[inline]
    pub const fn ndc_depth_range(&self) -> (f64, f64) {
        match self {
            Self::WebGl => (-1.0, 1.0),
            Self::WebGpu => (0.0, 1.0),
        }
    }
}

impl TryFrom<u32> for CoordinateSystem {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            Self::WEBGL_ID => Ok(Self::WebGl),
            Self::WEBGPU_ID => Ok(Self::WebGpu),
            other => Err(Error::invalid_coordinate_system(other)),
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = Error;

    /// Accepts the lowercase names, case-insensitively, or the numeric ids.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "webgl" | "gl" | "opengl" => Ok(Self::WebGl),
            "webgpu" | "gpu" | "vulkan" => Ok(Self::WebGpu),
            _ => match trimmed.parse::<u32>() {
                Ok(id) => Self::try_from(id),
                Err(_) => Err(Error::invalid_coordinate_system(trimmed)),
            },
        }
    }
}

impl std::fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for cs in [CoordinateSystem::WebGl, CoordinateSystem::WebGpu] {
            assert_eq!(CoordinateSystem::try_from(cs.id()), Ok(cs));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("WebGL".parse(), Ok(CoordinateSystem::WebGl));
        assert_eq!(" webgpu ".parse(), Ok(CoordinateSystem::WebGpu));
        assert_eq!("2000".parse(), Ok(CoordinateSystem::WebGl));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "metal".parse::<CoordinateSystem>().unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinateSystem { .. }));

        let err = CoordinateSystem::try_from(2002).unwrap_err();
        assert!(err.to_string().contains("2002"));
    }

    #[test]
    fn test_default_and_range() {
        assert_eq!(CoordinateSystem::default(), CoordinateSystem::WebGl);
        assert_eq!(CoordinateSystem::WebGpu.ndc_depth_range(), (0.0, 1.0));
    }
}
