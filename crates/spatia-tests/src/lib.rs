//! Integration tests for spatia crates.
//!
//! End-to-end checks of the properties the scene core guarantees: rotation
//! and TRS round trips, projection conventions, hierarchy propagation and
//! camera behaviour inside a graph.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use spatia_core::{CoordinateSystem, Error};
    use spatia_math::{Euler, Frustum, Mat4, Quat, RotationOrder, Vec3};
    use spatia_scene::{Camera, NodeId, OrthographicParams, PerspectiveParams, SceneGraph, ViewWindow};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f64 = 1e-5;

    /// Angles covering [-3, 3] with a non-uniform step.
    fn outer_angles() -> Vec<f64> {
        (0..13).map(|i| -3.0 + i as f64 * 0.5 + (i % 3) as f64 * 0.01).collect()
    }

    /// Angles for the middle axis, clear of the gimbal-lock latitude.
    fn middle_angles() -> Vec<f64> {
        (0..9).map(|i| -1.5 + i as f64 * 0.375).collect()
    }

    /// Index (0 = x, 1 = y, 2 = z) of the `n`-th axis of `order`.
    fn axis(order: RotationOrder, n: usize) -> usize {
        match order.name().as_bytes()[n] {
            b'X' => 0,
            b'Y' => 1,
            _ => 2,
        }
    }

    fn euler_with(order: RotationOrder, first: f64, middle: f64, last: f64) -> Euler {
        let mut a = [0.0; 3];
        a[axis(order, 0)] = first;
        a[axis(order, 1)] = middle;
        a[axis(order, 2)] = last;
        Euler::from_array(a, order)
    }

    // ------------------------------------------------------------------
    // Rotations
    // ------------------------------------------------------------------

    #[test]
    fn test_rotation_round_trip_all_orders() {
        for order in RotationOrder::ALL {
            for &first in &outer_angles() {
                for &middle in &middle_angles() {
                    for &last in &outer_angles() {
                        let e = euler_with(order, first, middle, last);
                        let back = Euler::from_rotation_matrix(&Mat4::from_euler(&e), order);
                        assert_eq!(back.order(), order);
                        assert_abs_diff_eq!(back, e, epsilon = EPS);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotation_round_trip_at_gimbal_lock() {
        for order in RotationOrder::ALL {
            for middle in [FRAC_PI_2, -FRAC_PI_2] {
                let e = euler_with(order, 0.4, middle, 0.7);
                let m = Mat4::from_euler(&e);
                let back = Euler::from_rotation_matrix(&m, order);
                let b = back.to_array();

                assert_abs_diff_eq!(b[axis(order, 1)], middle, epsilon = EPS);
                assert_eq!(b[axis(order, 2)], 0.0, "{order}");
                assert_abs_diff_eq!(Mat4::from_euler(&back), m, epsilon = EPS);
            }
        }
    }

    #[test]
    fn test_euler_rotation_is_orthonormal() {
        for order in RotationOrder::ALL {
            for &a in &outer_angles() {
                let e = euler_with(order, a, a * 0.7 - 0.2, 1.3 - a);
                let m = Mat4::from_euler(&e);
                assert_abs_diff_eq!(m.transpose() * m, Mat4::IDENTITY, epsilon = 1e-9);
                assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_quaternion_and_matrix_paths_agree() {
        for order in RotationOrder::ALL {
            let e = euler_with(order, 0.3, -0.8, 2.1);
            let from_quat = Mat4::from_quat(Quat::from_euler(&e));
            assert_abs_diff_eq!(from_quat, Mat4::from_euler(&e), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_euler_quarter_turn_about_x() {
        let e = Euler::new(FRAC_PI_2, 0.0, 0.0, RotationOrder::Xyz);
        let q = Quat::from_euler(&e);
        assert_abs_diff_eq!(
            q,
            Quat::new(FRAC_PI_4.sin(), 0.0, 0.0, FRAC_PI_4.cos()),
            epsilon = 1e-6
        );

        let v = Vec3::new(0.0, 1.0, 0.0).apply_quat(q);
        assert_abs_diff_eq!(v, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_reorder_preserves_orientation() {
        let e = Euler::new(0.5, -0.4, 1.2, RotationOrder::Xyz);
        let m = Mat4::from_euler(&e);
        for order in RotationOrder::ALL {
            let r = e.reordered(order);
            assert_eq!(r.order(), order);
            assert_abs_diff_eq!(Mat4::from_euler(&r), m, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unknown_order_name_is_ignored() {
        let mut e = Euler::new(0.1, 0.2, 0.3, RotationOrder::Zyx);
        e.reorder_named("XXZ");
        assert_eq!(e, Euler::new(0.1, 0.2, 0.3, RotationOrder::Zyx));
        assert!("XXZ".parse::<RotationOrder>().is_err());
    }

    // ------------------------------------------------------------------
    // Compose / decompose
    // ------------------------------------------------------------------

    fn sample_rotation() -> Quat {
        Quat::from_euler(&Euler::new(0.3, -1.1, 2.4, RotationOrder::Yzx))
    }

    #[test]
    fn test_compose_decompose_round_trip() {
        let p = Vec3::new(1.5, -2.0, 7.25);
        let q = sample_rotation();

        for s in [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 0.5, 3.0),
            Vec3::new(-2.0, 0.5, 3.0),
        ] {
            let (p2, q2, s2) = Mat4::compose(p, q, s).decompose();
            assert_abs_diff_eq!(p2, p, epsilon = EPS);
            assert_abs_diff_eq!(s2, s, epsilon = EPS);
            // q and -q are the same rotation
            assert_abs_diff_eq!(q2.dot(q).abs(), 1.0, epsilon = EPS);
        }
    }

    #[test]
    fn test_decompose_negates_x_for_any_single_negative_axis() {
        let p = Vec3::new(0.0, 1.0, 2.0);
        let q = sample_rotation();

        for s in [Vec3::new(2.0, -3.0, 4.0), Vec3::new(2.0, 3.0, -4.0)] {
            let m = Mat4::compose(p, q, s);
            let (p2, q2, s2) = m.decompose();

            assert_abs_diff_eq!(s2, Vec3::new(-2.0, 3.0, 4.0), epsilon = EPS);
            assert_abs_diff_eq!(p2, p, epsilon = EPS);
            // the split differs but the matrix is reproduced
            assert_abs_diff_eq!(Mat4::compose(p2, q2, s2), m, epsilon = EPS);
        }
    }

    #[test]
    fn test_singular_inverse_is_zero_sentinel() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(m.invert().is_zero());
        assert!(m.try_inverse().is_none());
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    #[test]
    fn test_perspective_depth_element() {
        let (near, far) = (1.0, 100.0);
        let f = Frustum::new(-1.0, 1.0, 1.0, -1.0, near, far);
        let m = Mat4::perspective(&f, CoordinateSystem::WebGl, false);
        assert_abs_diff_eq!(m.elements[10], -(far + near) / (far - near), epsilon = 1e-6);
    }

    #[test]
    fn test_projection_depth_ranges() {
        let f = Frustum::new(-1.0, 1.0, 1.0, -1.0, 1.0, 100.0);
        let near = Vec3::new(0.0, 0.0, -1.0);
        let far = Vec3::new(0.0, 0.0, -100.0);

        for (cs, reversed, want) in [
            (CoordinateSystem::WebGl, false, (-1.0, 1.0)),
            (CoordinateSystem::WebGl, true, (1.0, 0.0)),
            (CoordinateSystem::WebGpu, false, (0.0, 1.0)),
            (CoordinateSystem::WebGpu, true, (1.0, 0.0)),
        ] {
            for m in [
                Mat4::perspective(&f, cs, reversed),
                Mat4::orthographic(&f, cs, reversed),
            ] {
                assert_abs_diff_eq!(m.transform_point3(near).z, want.0, epsilon = 1e-9);
                assert_abs_diff_eq!(m.transform_point3(far).z, want.1, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_unknown_coordinate_system_is_rejected() {
        let err = CoordinateSystem::try_from(1999).unwrap_err();
        assert!(err.is_invalid_enum());
        assert!(matches!(err, Error::InvalidCoordinateSystem { .. }));
        assert_eq!("2001".parse::<CoordinateSystem>().unwrap(), CoordinateSystem::WebGpu);
    }

    #[test]
    fn test_orthographic_view_window_right_half() {
        let mut camera = Camera::orthographic(OrthographicParams {
            left: -100.0,
            right: 100.0,
            top: 50.0,
            bottom: -50.0,
            ..Default::default()
        });
        let full = *camera.projection_matrix();

        camera.set_view_offset(ViewWindow::new(200.0, 100.0, 100.0, 0.0, 100.0, 100.0));
        let f = camera.frustum();
        assert_abs_diff_eq!(f.left, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(f.right, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(f.top, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(f.bottom, -50.0, epsilon = 1e-9);

        camera.clear_view_offset();
        let f = camera.frustum();
        assert_eq!((f.left, f.right, f.top, f.bottom), (-100.0, 100.0, 50.0, -50.0));
        assert_abs_diff_eq!(*camera.projection_matrix(), full, epsilon = 1e-12);
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// root -> a -> b, each child one unit further along its parent's X.
    fn chain() -> (SceneGraph, [NodeId; 3]) {
        let mut g = SceneGraph::new();
        let ids = [g.create_node("root"), g.create_node("a"), g.create_node("b")];
        g.add(ids[0], ids[1]).unwrap();
        g.add(ids[1], ids[2]).unwrap();
        for &id in &ids[1..] {
            g.get_mut(id).unwrap().set_position(Vec3::new(1.0, 0.0, 0.0));
        }
        (g, ids)
    }

    fn world_position(g: &SceneGraph, id: NodeId) -> Vec3 {
        g.get(id).unwrap().world_matrix().position()
    }

    #[test]
    fn test_propagation_skips_frozen_node() {
        let (mut g, [root, a, b]) = chain();
        g.update_world_matrices(false);
        let frozen = *g.get(b).unwrap().world_matrix();

        g.get_mut(b).unwrap().world_matrix_auto_update = false;
        g.get_mut(root).unwrap().set_position(Vec3::new(0.0, 10.0, 0.0));
        g.update_world_matrices(false);

        assert_eq!(world_position(&g, a), Vec3::new(1.0, 10.0, 0.0));
        assert_eq!(*g.get(b).unwrap().world_matrix(), frozen);
        assert_eq!(world_position(&g, b), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_forced_propagation_reaches_frozen_node() {
        let (mut g, [root, _, b]) = chain();
        g.update_world_matrices(false);
        g.get_mut(b).unwrap().world_matrix_auto_update = false;
        g.get_mut(root).unwrap().set_position(Vec3::new(0.0, 10.0, 0.0));

        g.update_world_matrices(true);
        assert_eq!(world_position(&g, b), Vec3::new(2.0, 10.0, 0.0));
    }

    #[test]
    fn test_rotated_parent_carries_children() {
        let (mut g, [root, a, b]) = chain();
        g.get_mut(root).unwrap().rotate_z(FRAC_PI_2);
        g.update_world_matrices(false);

        assert_abs_diff_eq!(world_position(&g, a), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(world_position(&g, b), Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            g.world_to_local(a, Vec3::new(0.0, 2.0, 0.0)).unwrap(),
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        fn build() -> SceneGraph {
            let mut g = SceneGraph::new();
            let root = g.create_node("root");
            let mut level = vec![root];
            for depth in 0..5 {
                let mut next = Vec::new();
                for &parent in &level {
                    for i in 0..3 {
                        let child = g.create_node(format!("{depth}.{i}"));
                        let node = g.get_mut(child).unwrap();
                        node.set_position(Vec3::new(1.0, 0.5 * i as f64, 0.0));
                        node.rotate_y(0.2 * (i + depth) as f64);
                        node.set_scale(Vec3::splat(1.0 + 0.1 * i as f64));
                        g.add(parent, child).unwrap();
                        next.push(child);
                    }
                }
                level = next;
            }
            g
        }

        let mut seq = build();
        let mut par = build();
        let n_seq = seq.update_world_matrices(false);
        let n_par = par.update_world_matrices_parallel(false);
        assert_eq!(n_seq, n_par);
        assert_eq!(n_seq, seq.len());

        for (id, node) in seq.iter() {
            assert_eq!(node.world_matrix(), par.get(id).unwrap().world_matrix());
        }
    }

    #[test]
    fn test_cycle_is_rejected() {
        let (mut g, [root, _, b]) = chain();
        let err = g.add(b, root).unwrap_err();
        assert!(err.is_graph_error());
        assert_eq!(g.parent(root).unwrap(), None);
    }

    #[test]
    fn test_attach_keeps_world_transform() {
        let (mut g, [_, a, b]) = chain();
        let other = g.create_node("other");
        g.get_mut(other).unwrap().set_position(Vec3::new(-4.0, 3.0, 0.0));
        g.get_mut(other).unwrap().rotate_x(0.7);
        g.update_world_matrices(false);
        let before = *g.get(b).unwrap().world_matrix();

        g.attach(other, b).unwrap();
        g.update_world_matrices(false);

        assert_eq!(g.parent(b).unwrap(), Some(other));
        assert!(!g.children(a).unwrap().contains(&b));
        assert_abs_diff_eq!(*g.get(b).unwrap().world_matrix(), before, epsilon = 1e-9);
    }

    // ------------------------------------------------------------------
    // Cameras in a graph
    // ------------------------------------------------------------------

    #[test]
    fn test_camera_look_at_under_rotated_parent() {
        let mut g = SceneGraph::new();
        let rig = g.create_node("rig");
        g.get_mut(rig).unwrap().rotate_y(FRAC_PI_2);
        let cam = g.create_camera("cam", Camera::perspective(PerspectiveParams::default()));
        g.get_mut(cam).unwrap().set_position(Vec3::new(0.0, 2.0, 5.0));
        g.add(rig, cam).unwrap();

        let target = Vec3::new(1.0, -1.0, 0.5);
        g.look_at(cam, target).unwrap();
        g.update_world_matrices(false);

        let eye = g.world_position(cam).unwrap();
        let toward = (target - eye).normalize();
        assert_abs_diff_eq!(g.world_direction(cam).unwrap(), toward, epsilon = 1e-9);

        // the target lands in the centre of the image
        let ndc = g.project(cam, target).unwrap();
        assert_abs_diff_eq!(ndc.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ndc.y, 0.0, epsilon = 1e-9);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);

        assert_abs_diff_eq!(g.unproject(cam, ndc).unwrap(), target, epsilon = 1e-6);
    }

    #[test]
    fn test_project_requires_camera() {
        let (g, [root, ..]) = chain();
        let err = g.project(root, Vec3::ZERO).unwrap_err();
        assert!(matches!(err, Error::NotACamera { .. }));
    }

    #[test]
    fn test_camera_survives_json() {
        let mut camera = Camera::perspective(PerspectiveParams {
            fov: 35.0,
            aspect: 2.0,
            ..Default::default()
        });
        camera.set_coordinate_system(CoordinateSystem::WebGpu);
        camera.set_reversed_depth(true);

        let text = serde_json::to_string(&camera).unwrap();
        let back: Camera = serde_json::from_str(&text).unwrap();
        assert_eq!(back.coordinate_system(), CoordinateSystem::WebGpu);
        assert!(back.reversed_depth());
        assert_eq!(back.projection().name(), "perspective");
        assert_abs_diff_eq!(*back.projection_matrix(), *camera.projection_matrix(), epsilon = 1e-12);
    }
}
