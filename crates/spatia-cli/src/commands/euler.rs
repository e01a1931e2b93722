//! Euler command - angles to quaternion and rotation matrix

use super::{angle_unit, euler_degrees, fmt_quat, fmt_vec3, parse_order, print_json, print_matrix};
use crate::EulerArgs;
use anyhow::Result;
use serde_json::json;
use spatia_math::{Euler, Mat4, Quat, Vec3};
use tracing::{debug, trace};

pub fn run(args: EulerArgs, json: bool) -> Result<()> {
    trace!(x = args.x, y = args.y, z = args.z, order = %args.order, "euler::run");

    let order = parse_order(&args.order)?;
    let unit = angle_unit(args.radians);
    let euler = Euler::new(args.x * unit, args.y * unit, args.z * unit, order);

    let quaternion = Quat::from_euler(&euler);
    let matrix = Mat4::from_euler(&euler);
    debug!(?quaternion, "Quaternion from Euler");

    let reordered = match &args.reorder {
        Some(name) => Some(euler.reordered(parse_order(name)?)),
        None => None,
    };

    // where the basis axes end up
    let axes = [Vec3::X, Vec3::Y, Vec3::Z].map(|v| v.apply_quat(quaternion));

    if json {
        return print_json(&json!({
            "euler": { "degrees": euler_degrees(&euler), "order": order.name() },
            "quaternion": quaternion.to_array(),
            "matrix": matrix.to_array(),
            "axes": axes.map(Vec3::to_array),
            "reordered": reordered.map(|e| json!({
                "degrees": euler_degrees(&e),
                "order": e.order.name(),
            })),
        }));
    }

    let [dx, dy, dz] = euler_degrees(&euler);
    println!("Euler {order}: ({dx:.6}, {dy:.6}, {dz:.6}) deg");
    println!("Quaternion (x, y, z, w): {}", fmt_quat(quaternion));
    print_matrix("Rotation matrix", &matrix);
    println!("Rotated axes:");
    for (name, axis) in ["X", "Y", "Z"].iter().zip(axes) {
        println!("  {name} -> {}", fmt_vec3(axis));
    }
    if let Some(e) = reordered {
        let [rx, ry, rz] = euler_degrees(&e);
        println!("Reordered {}: ({rx:.6}, {ry:.6}, {rz:.6}) deg", e.order);
    }

    Ok(())
}
