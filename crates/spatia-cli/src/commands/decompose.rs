//! Decompose command - 4x4 matrix to position, rotation and scale

use super::{euler_degrees, fmt_quat, fmt_vec3, parse_floats, parse_order, print_json, print_matrix};
use crate::DecomposeArgs;
use anyhow::{Result, bail};
use serde_json::json;
use spatia_math::{Euler, Mat4};
use tracing::{debug, trace, warn};

pub fn run(args: DecomposeArgs, json: bool) -> Result<()> {
    trace!(count = args.elements.len(), rows = args.rows, "decompose::run");

    let mut values = Vec::with_capacity(16);
    for part in &args.elements {
        values.extend(parse_floats(part)?);
    }
    if values.len() != 16 {
        bail!("Expected 16 matrix elements, got {}", values.len());
    }
    let order = parse_order(&args.order)?;

    let matrix = if args.rows {
        Mat4::from_slice_at(&values, 0).transpose()
    } else {
        Mat4::from_slice_at(&values, 0)
    };

    let bottom = [matrix.get(3, 0), matrix.get(3, 1), matrix.get(3, 2), matrix.get(3, 3)];
    if bottom != [0.0, 0.0, 0.0, 1.0] {
        warn!(?bottom, "Matrix is not affine; decomposition ignores the bottom row");
    }

    let determinant = matrix.determinant();
    let (position, quaternion, scale) = matrix.decompose();
    let euler = Euler::from_quat(quaternion, order);
    debug!(determinant, "Decomposed matrix");

    // recomposition shows how much shear or projection was dropped
    let residual = Mat4::compose(position, quaternion, scale)
        .to_array()
        .iter()
        .zip(matrix.to_array())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0_f64, f64::max);

    if json {
        return print_json(&json!({
            "position": position.to_array(),
            "quaternion": quaternion.to_array(),
            "scale": scale.to_array(),
            "euler": { "degrees": euler_degrees(&euler), "order": order.name() },
            "determinant": determinant,
            "residual": residual,
        }));
    }

    print_matrix("Input", &matrix);
    println!("Position:   {}", fmt_vec3(position));
    println!("Quaternion: {}", fmt_quat(quaternion));
    println!("Scale:      {}", fmt_vec3(scale));
    let [x, y, z] = euler_degrees(&euler);
    println!("Euler {order}: ({x:.6}, {y:.6}, {z:.6}) deg");
    println!("Determinant: {determinant:.6}");
    if determinant < 0.0 {
        println!("  (reflection: reported as negative X scale)");
    }
    println!("Recompose residual: {residual:.3e}");

    Ok(())
}
