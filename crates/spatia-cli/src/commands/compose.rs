//! Compose command - position, rotation and scale to a TRS matrix

use super::{angle_unit, fmt_quat, parse_order, parse_vec3, print_json, print_matrix};
use crate::ComposeArgs;
use anyhow::Result;
use serde_json::json;
use spatia_math::{Euler, Mat4, Quat};
use tracing::trace;

pub fn run(args: ComposeArgs, json: bool) -> Result<()> {
    trace!(position = %args.position, rotation = %args.rotation, scale = %args.scale, "compose::run");

    let position = parse_vec3(&args.position, "--position")?;
    let rotation = parse_vec3(&args.rotation, "--rotation")? * angle_unit(args.radians);
    let scale = parse_vec3(&args.scale, "--scale")?;
    let order = parse_order(&args.order)?;

    let quaternion = Quat::from_euler(&Euler::from_vec3(rotation, order));
    let matrix = Mat4::compose(position, quaternion, scale);

    if json {
        return print_json(&json!({
            "position": position.to_array(),
            "quaternion": quaternion.to_array(),
            "scale": scale.to_array(),
            "matrix": matrix.to_array(),
            "determinant": matrix.determinant(),
        }));
    }

    println!("Quaternion (x, y, z, w): {}", fmt_quat(quaternion));
    print_matrix("Matrix", &matrix);
    println!("Determinant: {:.6}", matrix.determinant());
    println!("Column-major: {:?}", matrix.to_array());

    Ok(())
}
