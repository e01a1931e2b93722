//! Project command - perspective/orthographic projection matrices

use super::{parse_fixed, print_json, print_matrix};
use crate::{ProjectArgs, ProjectionKind};
use anyhow::{Context, Result};
use serde_json::json;
use spatia_core::CoordinateSystem;
use spatia_math::Vec3;
use spatia_scene::{Camera, OrthographicParams, PerspectiveParams, ViewWindow};
use tracing::{debug, trace};

pub fn run(args: ProjectArgs, json: bool) -> Result<()> {
    trace!(coordinate_system = %args.coordinate_system, "project::run");

    // strict: an unknown depth convention aborts construction
    let coordinate_system: CoordinateSystem = args
        .coordinate_system
        .parse()
        .with_context(|| format!("Invalid --coordinate-system '{}'", args.coordinate_system))?;

    let view = match &args.view {
        Some(s) => {
            let [fw, fh, ox, oy, w, h] = parse_fixed::<6>(s, "--view")?;
            Some(ViewWindow::new(fw, fh, ox, oy, w, h))
        }
        None => None,
    };

    let mut camera = match args.kind {
        ProjectionKind::Perspective => Camera::perspective(PerspectiveParams {
            fov: args.fov,
            aspect: args.aspect,
            near: args.near,
            far: args.far,
            zoom: args.zoom,
            film_offset: args.film_offset,
            ..Default::default()
        }),
        ProjectionKind::Orthographic => Camera::orthographic(OrthographicParams {
            left: args.left,
            right: args.right,
            top: args.top,
            bottom: args.bottom,
            near: args.near,
            far: args.far,
            zoom: args.zoom,
            view: None,
        }),
    };
    camera.set_coordinate_system(coordinate_system);
    camera.set_reversed_depth(args.reversed_depth);
    if let Some(view) = view {
        camera.set_view_offset(view);
    }

    let frustum = camera.frustum();
    let matrix = *camera.projection_matrix();
    debug!(kind = camera.projection().name(), "Projection built");

    // depth of the near and far planes on the view axis after projection
    let near_ndc = matrix.transform_point3(Vec3::new(0.0, 0.0, -frustum.near)).z;
    let far_ndc = matrix.transform_point3(Vec3::new(0.0, 0.0, -frustum.far)).z;

    if json {
        return print_json(&json!({
            "kind": camera.projection().name(),
            "coordinate_system": coordinate_system.name(),
            "reversed_depth": camera.reversed_depth(),
            "frustum": frustum,
            "matrix": matrix.to_array(),
            "inverse": camera.projection_matrix_inverse().to_array(),
            "ndc_depth": { "near": near_ndc, "far": far_ndc },
        }));
    }

    println!(
        "{} ({}, reversed depth: {})",
        camera.projection().name(),
        coordinate_system,
        camera.reversed_depth()
    );
    println!(
        "Frustum: left {:.6} right {:.6} top {:.6} bottom {:.6} near {:.6} far {:.6}",
        frustum.left, frustum.right, frustum.top, frustum.bottom, frustum.near, frustum.far
    );
    if let Some(p) = camera.as_perspective() {
        println!(
            "Focal length: {:.3} mm, effective fov: {:.3} deg",
            p.focal_length(),
            p.effective_fov()
        );
    }
    print_matrix("Projection matrix", &matrix);
    println!("NDC depth: near -> {near_ndc:.6}, far -> {far_ndc:.6}");

    Ok(())
}
