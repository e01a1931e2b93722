//! Cameras and their projections.
//!
//! A [`Camera`] is the data a camera node carries on top of its transform:
//! projection parameters, the derived projection matrix (and its inverse),
//! the depth convention and the inverse of the node's world matrix.
//!
//! The projection is a closed set of two variants, [`Projection::Perspective`]
//! and [`Projection::Orthographic`]. Both reduce to a [`Frustum`] which is then
//! handed to [`Mat4::perspective`] or [`Mat4::orthographic`].
//!
//! # View windows
//!
//! Either projection can be restricted to a sub-rectangle of a larger virtual
//! image with [`Camera::set_view_offset`], e.g. for tiled or multi-monitor
//! rendering. The window is stored as an `Option` and every recompute starts
//! from the raw parameters, so [`Camera::clear_view_offset`] restores the full
//! frustum.
//!
//! # Example
//!
//! ```rust
//! use spatia_scene::{Camera, OrthographicParams, ViewWindow};
//!
//! let mut camera = Camera::orthographic(OrthographicParams {
//!     left: -100.0,
//!     right: 100.0,
//!     top: 50.0,
//!     bottom: -50.0,
//!     ..Default::default()
//! });
//! camera.set_view_offset(ViewWindow::new(200.0, 100.0, 100.0, 0.0, 100.0, 100.0));
//! let f = camera.frustum();
//! assert_eq!((f.left, f.right), (0.0, 100.0));
//!
//! camera.clear_view_offset();
//! assert_eq!(camera.frustum().left, -100.0);
//! ```

use spatia_math::{CoordinateSystem, Frustum, Mat4, Vec3, deg_to_rad, rad_to_deg};
use tracing::debug;

/// Sub-rectangle of a larger virtual image.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewWindow {
    /// Full width of the virtual image.
    pub full_width: f64,
    /// Full height of the virtual image.
    pub full_height: f64,
    /// Horizontal offset of the window.
    pub offset_x: f64,
    /// Vertical offset of the window (down from the top).
    pub offset_y: f64,
    /// Window width.
    pub width: f64,
    /// Window height.
    pub height: f64,
}

impl ViewWindow {
    /// Creates a view window.
    pub const fn new(
        full_width: f64,
        full_height: f64,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            full_width,
            full_height,
            offset_x,
            offset_y,
            width,
            height,
        }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerspectiveParams {
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Width / height.
    pub aspect: f64,
    /// Near plane distance.
    pub near: f64,
    /// Far plane distance.
    pub far: f64,
    /// Zoom factor; narrows the field of view.
    pub zoom: f64,
    /// Object distance for stereo and depth-of-field effects.
    pub focus: f64,
    /// Film size in millimetres along the larger axis.
    pub film_gauge: f64,
    /// Horizontal film offset in millimetres.
    pub film_offset: f64,
    /// Optional sub-rectangle.
    pub view: Option<ViewWindow>,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            fov: 50.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
            zoom: 1.0,
            focus: 10.0,
            film_gauge: 35.0,
            film_offset: 0.0,
            view: None,
        }
    }
}

impl PerspectiveParams {
    /// Film width in millimetres.
    pub fn film_width(&self) -> f64 {
        self.film_gauge * self.aspect.min(1.0)
    }

    /// Film height in millimetres.
    pub fn film_height(&self) -> f64 {
        self.film_gauge / self.aspect.max(1.0)
    }

    /// Focal length in millimetres matching `fov` for the current film gauge.
    pub fn focal_length(&self) -> f64 {
        let v_extent_slope = deg_to_rad(0.5 * self.fov).tan();
        0.5 * self.film_height() / v_extent_slope
    }

    /// Sets `fov` from a focal length in millimetres.
    pub fn set_focal_length(&mut self, focal_length: f64) {
        let v_extent_slope = 0.5 * self.film_height() / focal_length;
        self.fov = rad_to_deg(2.0 * v_extent_slope.atan());
    }

    /// Field of view in degrees after zoom.
    pub fn effective_fov(&self) -> f64 {
        rad_to_deg(2.0 * (deg_to_rad(0.5 * self.fov).tan() / self.zoom).atan())
    }

    /// Near-plane frustum, including zoom, view window and film offset.
    pub fn frustum(&self) -> Frustum {
        let near = self.near;
        let mut top = near * deg_to_rad(0.5 * self.fov).tan() / self.zoom;
        let mut height = 2.0 * top;
        let mut width = self.aspect * height;
        let mut left = -0.5 * width;

        if let Some(view) = &self.view {
            left += view.offset_x * width / view.full_width;
            top -= view.offset_y * height / view.full_height;
            width *= view.width / view.full_width;
            height *= view.height / view.full_height;
        }

        if self.film_offset != 0.0 {
            left += near * self.film_offset / self.film_width();
        }

        Frustum::new(left, left + width, top, top - height, near, self.far)
    }
}

/// Orthographic projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrthographicParams {
    /// Left plane.
    pub left: f64,
    /// Right plane.
    pub right: f64,
    /// Top plane.
    pub top: f64,
    /// Bottom plane.
    pub bottom: f64,
    /// Near plane distance.
    pub near: f64,
    /// Far plane distance.
    pub far: f64,
    /// Zoom factor; shrinks the visible extent around its center.
    pub zoom: f64,
    /// Optional sub-rectangle.
    pub view: Option<ViewWindow>,
}

impl Default for OrthographicParams {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: 0.1,
            far: 2000.0,
            zoom: 1.0,
            view: None,
        }
    }
}

impl OrthographicParams {
    /// Effective frustum after zoom and view window.
    pub fn frustum(&self) -> Frustum {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;

        let mut left = cx - dx;
        let mut right = cx + dx;
        let mut top = cy + dy;
        let mut bottom = cy - dy;

        if let Some(view) = &self.view {
            let scale_w = (self.right - self.left) / view.full_width / self.zoom;
            let scale_h = (self.top - self.bottom) / view.full_height / self.zoom;

            left += scale_w * view.offset_x;
            right = left + scale_w * view.width;
            top -= scale_h * view.offset_y;
            bottom = top - scale_h * view.height;
        }

        Frustum::new(left, right, top, bottom, self.near, self.far)
    }
}

/// Projection kind with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// Perspective projection.
    Perspective(PerspectiveParams),
    /// Orthographic projection.
    Orthographic(OrthographicParams),
}

impl Projection {
    /// Short name for logs and CLI output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Perspective(_) => "perspective",
            Self::Orthographic(_) => "orthographic",
        }
    }

    /// Effective frustum.
    pub fn frustum(&self) -> Frustum {
        match self {
            Self::Perspective(p) => p.frustum(),
            Self::Orthographic(o) => o.frustum(),
        }
    }

    /// Near plane distance.
    pub fn near(&self) -> f64 {
        match self {
            Self::Perspective(p) => p.near,
            Self::Orthographic(o) => o.near,
        }
    }

    /// Far plane distance.
    pub fn far(&self) -> f64 {
        match self {
            Self::Perspective(p) => p.far,
            Self::Orthographic(o) => o.far,
        }
    }

    fn view_mut(&mut self) -> &mut Option<ViewWindow> {
        match self {
            Self::Perspective(p) => &mut p.view,
            Self::Orthographic(o) => &mut o.view,
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective(PerspectiveParams::default())
    }
}

/// Camera data attached to a camera node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    projection: Projection,
    coordinate_system: CoordinateSystem,
    reversed_depth: bool,
    projection_matrix: Mat4,
    projection_matrix_inverse: Mat4,
    world_matrix_inverse: Mat4,
}

impl Camera {
    /// Creates a camera and computes its projection matrix.
    pub fn new(projection: Projection) -> Self {
        let mut camera = Self {
            projection,
            coordinate_system: CoordinateSystem::default(),
            reversed_depth: false,
            projection_matrix: Mat4::IDENTITY,
            projection_matrix_inverse: Mat4::IDENTITY,
            world_matrix_inverse: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Perspective camera.
    pub fn perspective(params: PerspectiveParams) -> Self {
        Self::new(Projection::Perspective(params))
    }

    /// Orthographic camera.
    pub fn orthographic(params: OrthographicParams) -> Self {
        Self::new(Projection::Orthographic(params))
    }

    /// Projection parameters.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Mutable projection parameters.
    ///
    /// Call [`Camera::update_projection_matrix`] after editing.
    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    /// Perspective parameters, if this is a perspective camera.
    pub fn as_perspective(&self) -> Option<&PerspectiveParams> {
        match &self.projection {
            Projection::Perspective(p) => Some(p),
            Projection::Orthographic(_) => None,
        }
    }

    /// Orthographic parameters, if this is an orthographic camera.
    pub fn as_orthographic(&self) -> Option<&OrthographicParams> {
        match &self.projection {
            Projection::Orthographic(o) => Some(o),
            Projection::Perspective(_) => None,
        }
    }

    /// Depth-range convention.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// Changes the depth-range convention and recomputes the projection.
    pub fn set_coordinate_system(&mut self, coordinate_system: CoordinateSystem) {
        self.coordinate_system = coordinate_system;
        self.update_projection_matrix();
    }

    /// True when near maps to the far end of the depth range.
    pub fn reversed_depth(&self) -> bool {
        self.reversed_depth
    }

    /// Toggles reversed depth and recomputes the projection.
    pub fn set_reversed_depth(&mut self, reversed: bool) {
        self.reversed_depth = reversed;
        self.update_projection_matrix();
    }

    /// Restricts rendering to a sub-rectangle of a larger virtual image.
    ///
    /// Perspective cameras also take the aspect ratio of the full image.
    pub fn set_view_offset(&mut self, view: ViewWindow) {
        if let Projection::Perspective(p) = &mut self.projection {
            p.aspect = view.full_width / view.full_height;
        }
        *self.projection.view_mut() = Some(view);
        self.update_projection_matrix();
    }

    /// Removes the view window.
    pub fn clear_view_offset(&mut self) {
        *self.projection.view_mut() = None;
        self.update_projection_matrix();
    }

    /// Effective frustum used by the current projection matrix.
    pub fn frustum(&self) -> Frustum {
        self.projection.frustum()
    }

    /// Rebuilds the projection matrix and its inverse from the parameters.
    pub fn update_projection_matrix(&mut self) {
        let frustum = self.projection.frustum();
        self.projection_matrix = match self.projection {
            Projection::Perspective(_) => {
                Mat4::perspective(&frustum, self.coordinate_system, self.reversed_depth)
            }
            Projection::Orthographic(_) => {
                Mat4::orthographic(&frustum, self.coordinate_system, self.reversed_depth)
            }
        };
        self.projection_matrix_inverse = self.projection_matrix.invert();
        debug!(
            kind = self.projection.name(),
            coordinate_system = %self.coordinate_system,
            reversed_depth = self.reversed_depth,
            left = frustum.left,
            right = frustum.right,
            top = frustum.top,
            bottom = frustum.bottom,
            "Projection matrix rebuilt"
        );
    }

    /// Projection matrix.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Inverse projection matrix.
    pub fn projection_matrix_inverse(&self) -> &Mat4 {
        &self.projection_matrix_inverse
    }

    /// Inverse of the node's world matrix (the view matrix).
    ///
    /// All zero when the world matrix was singular.
    pub fn world_matrix_inverse(&self) -> &Mat4 {
        &self.world_matrix_inverse
    }

    pub(crate) fn update_world_matrix_inverse(&mut self, world: &Mat4) {
        self.world_matrix_inverse = world.invert();
        if self.world_matrix_inverse.is_zero() {
            debug!("Camera world matrix is singular; view matrix set to zero");
        }
    }

    /// World-space point to normalized device coordinates.
    pub fn project(&self, point: Vec3) -> Vec3 {
        point
            .apply_mat4(&self.world_matrix_inverse)
            .apply_mat4(&self.projection_matrix)
    }

    /// Normalized device coordinates to a world-space point.
    pub fn unproject(&self, ndc: Vec3, world_matrix: &Mat4) -> Vec3 {
        ndc.apply_mat4(&self.projection_matrix_inverse)
            .apply_mat4(world_matrix)
    }

    /// Visible rectangle `(min, max)` on the plane at `distance` in front of
    /// a perspective camera.
    pub fn view_bounds(&self, distance: f64) -> ([f64; 2], [f64; 2]) {
        let corner = |x: f64, y: f64| {
            let v = Vec3::new(x, y, 0.5).apply_mat4(&self.projection_matrix_inverse);
            let s = -distance / v.z;
            [v.x * s, v.y * s]
        };
        (corner(-1.0, -1.0), corner(1.0, 1.0))
    }

    /// Width and height of [`Camera::view_bounds`].
    pub fn view_size(&self, distance: f64) -> [f64; 2] {
        let (min, max) = self.view_bounds(distance);
        [max[0] - min[0], max[1] - min[1]]
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn half_screen_camera() -> Camera {
        Camera::orthographic(OrthographicParams {
            left: -100.0,
            right: 100.0,
            top: 50.0,
            bottom: -50.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_orthographic_view_window_right_half() {
        let mut camera = half_screen_camera();
        let full = *camera.projection_matrix();

        camera.set_view_offset(ViewWindow::new(200.0, 100.0, 100.0, 0.0, 100.0, 100.0));
        let f = camera.frustum();
        assert_abs_diff_eq!(f.left, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.right, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.top, 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.bottom, -50.0, epsilon = 1e-12);
        assert_ne!(*camera.projection_matrix(), full);

        camera.clear_view_offset();
        let f = camera.frustum();
        assert_eq!((f.left, f.right, f.top, f.bottom), (-100.0, 100.0, 50.0, -50.0));
        assert_eq!(*camera.projection_matrix(), full);
    }

    #[test]
    fn test_orthographic_zoom() {
        let mut camera = half_screen_camera();
        if let Projection::Orthographic(o) = camera.projection_mut() {
            o.zoom = 2.0;
        }
        camera.update_projection_matrix();
        let f = camera.frustum();
        assert_eq!((f.left, f.right, f.top, f.bottom), (-50.0, 50.0, 25.0, -25.0));
    }

    #[test]
    fn test_perspective_defaults() {
        let camera = Camera::default();
        let p = camera.as_perspective().unwrap();
        assert_eq!(p.fov, 50.0);
        assert_eq!(camera.coordinate_system(), CoordinateSystem::WebGl);
        assert!(!camera.reversed_depth());
        assert_abs_diff_eq!(
            camera.projection_matrix().elements[10],
            -(p.far + p.near) / (p.far - p.near),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_perspective_frustum_is_symmetric() {
        let p = PerspectiveParams {
            fov: 90.0,
            aspect: 2.0,
            near: 1.0,
            ..Default::default()
        };
        let f = p.frustum();
        assert_abs_diff_eq!(f.top, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.bottom, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.left, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.right, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perspective_view_window_and_aspect() {
        let mut camera = Camera::perspective(PerspectiveParams {
            fov: 90.0,
            near: 1.0,
            ..Default::default()
        });
        camera.set_view_offset(ViewWindow::new(400.0, 200.0, 200.0, 0.0, 200.0, 200.0));
        let p = camera.as_perspective().unwrap();
        assert_eq!(p.aspect, 2.0);
        let f = camera.frustum();
        assert_abs_diff_eq!(f.left, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.right, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.top, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.bottom, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_focal_length_roundtrip() {
        let mut p = PerspectiveParams::default();
        let f = p.focal_length();
        p.fov = 10.0;
        p.set_focal_length(f);
        assert_abs_diff_eq!(p.fov, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_effective_fov_with_zoom() {
        let p = PerspectiveParams {
            fov: 90.0,
            zoom: 1.0,
            ..Default::default()
        };
        assert_abs_diff_eq!(p.effective_fov(), 90.0, epsilon = 1e-9);
        let zoomed = PerspectiveParams { zoom: 2.0, ..p };
        assert!(zoomed.effective_fov() < 90.0);
    }

    #[test]
    fn test_film_dimensions() {
        let wide = PerspectiveParams {
            aspect: 2.0,
            ..Default::default()
        };
        assert_eq!(wide.film_width(), 35.0);
        assert_eq!(wide.film_height(), 17.5);
    }

    #[test]
    fn test_reversed_depth_and_coordinate_system() {
        for cs in [CoordinateSystem::WebGpu, CoordinateSystem::WebGl] {
            let mut camera = Camera::default();
            camera.set_coordinate_system(cs);
            camera.set_reversed_depth(true);
            let p = *camera.as_perspective().unwrap();
            let m = camera.projection_matrix();
            let near = m.transform_point3(Vec3::new(0.0, 0.0, -p.near));
            let far = m.transform_point3(Vec3::new(0.0, 0.0, -p.far));
            assert_abs_diff_eq!(near.z, 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(far.z, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_view_bounds() {
        let camera = Camera::perspective(PerspectiveParams {
            fov: 90.0,
            aspect: 1.0,
            near: 0.5,
            ..Default::default()
        });
        let (min, max) = camera.view_bounds(10.0);
        assert_abs_diff_eq!(min[0], -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max[1], 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(camera.view_size(10.0)[0], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_unproject() {
        let camera = Camera::default();
        let p = Vec3::new(0.5, -0.25, -5.0);
        let ndc = camera.project(p);
        let back = camera.unproject(ndc, &Mat4::IDENTITY);
        assert_abs_diff_eq!(back, p, epsilon = 1e-9);
    }
}
