//! World-matrix propagation.
//!
//! A pass walks every tree in pre-order. For each node:
//!
//! 1. If `matrix_auto_update` is on and the local TRS changed, the local
//!    matrix is recomposed and the node becomes world-dirty.
//! 2. The node is *dirty* if its own `world_matrix_needs_update` flag is set
//!    or an ancestor was dirty earlier in the same pass.
//! 3. The world matrix is recomputed (`parent.world * local`, or `local` for
//!    roots) when the node is dirty and `world_matrix_auto_update` is on, or
//!    unconditionally when the pass is forced.
//! 4. Children inherit "ancestor changed" when the node was dirty or the pass
//!    is forced, so `force` reaches every descendant.
//!
//! A node with `world_matrix_auto_update == false` keeps its world matrix on a
//! normal pass but its children are still visited.
//!
//! The parallel pass (feature `parallel`) plans sibling subtrees on the rayon
//! pool once their parent is final and then writes the results back in one
//! sequential sweep. It produces exactly the same matrices and flags as the
//! sequential pass.

use crate::graph::SceneGraph;
use crate::node::{NodeId, SpatialNode};
use spatia_math::Mat4;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of visiting one node.
#[derive(Debug, Clone, Copy)]
struct NodeUpdate {
    id: NodeId,
    /// New local matrix, when it was recomposed.
    local: Option<Mat4>,
    /// New world matrix, when it was recomputed.
    world: Option<Mat4>,
    /// Whether the node was dirty this pass.
    dirty: bool,
}

impl NodeUpdate {
    fn apply(&self, node: &mut SpatialNode) {
        if let Some(local) = self.local {
            node.commit_matrix(local);
        }
        if let Some(world) = self.world {
            node.set_world_matrix(world);
        }
        if self.dirty {
            node.world_matrix_needs_update = false;
        }
    }
}

/// Decides what a pass does to `node` without touching it.
///
/// Returns the update, the world matrix children should inherit, and whether
/// children see a changed ancestor.
fn plan_node(
    id: NodeId,
    node: &SpatialNode,
    parent_world: Option<&Mat4>,
    ancestor_changed: bool,
    force: bool,
) -> (NodeUpdate, Mat4, bool) {
    let recompose = node.matrix_auto_update && node.is_local_dirty();
    let local = if recompose {
        Mat4::compose(node.position(), node.quaternion(), node.scale())
    } else {
        *node.matrix()
    };

    let dirty = node.world_matrix_needs_update || recompose || ancestor_changed;
    let world = (force || (dirty && node.world_matrix_auto_update)).then(|| match parent_world {
        Some(pw) => pw.mul_mat(&local),
        None => local,
    });

    let update = NodeUpdate {
        id,
        local: recompose.then_some(local),
        world,
        dirty,
    };
    (update, world.unwrap_or(*node.world_matrix()), dirty || force)
}

impl SceneGraph {
    /// Runs a propagation pass over every tree.
    ///
    /// Returns the number of world matrices recomputed.
    pub fn update_world_matrices(&mut self, force: bool) -> usize {
        let mut stack: Vec<(NodeId, Option<Mat4>, bool)> =
            self.roots.iter().rev().map(|&id| (id, None, false)).collect();
        let mut visited = 0usize;
        let mut recomputed = 0usize;

        while let Some((id, parent_world, ancestor_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let (update, world, cascade) =
                plan_node(id, node, parent_world.as_ref(), ancestor_changed, force);
            update.apply(node);

            visited += 1;
            recomputed += usize::from(update.world.is_some());
            stack.extend(node.children.iter().rev().map(|&c| (c, Some(world), cascade)));
        }

        trace!(visited, recomputed, force, "World matrices propagated");
        recomputed
    }

    /// Parallel version of [`SceneGraph::update_world_matrices`].
    ///
    /// Sibling subtrees are planned concurrently on the rayon pool; chains
    /// without branches stay on one thread.
    #[cfg(feature = "parallel")]
    pub fn update_world_matrices_parallel(&mut self, force: bool) -> usize {
        let planned: Vec<Vec<NodeUpdate>> = self
            .roots
            .par_iter()
            .map(|&root| self.plan_subtree(root, None, false, force))
            .collect();

        let mut visited = 0usize;
        let mut recomputed = 0usize;
        for update in planned.iter().flatten() {
            if let Some(node) = self.nodes.get_mut(update.id) {
                update.apply(node);
                visited += 1;
                recomputed += usize::from(update.world.is_some());
            }
        }

        trace!(visited, recomputed, force, "World matrices propagated (parallel)");
        recomputed
    }

    /// Plans one subtree in pre-order.
    ///
    /// Walks single-child chains in a loop and only fans out at branches.
    #[cfg(feature = "parallel")]
    fn plan_subtree(
        &self,
        root: NodeId,
        parent_world: Option<Mat4>,
        ancestor_changed: bool,
        force: bool,
    ) -> Vec<NodeUpdate> {
        let mut out = Vec::new();
        let (mut id, mut parent_world, mut ancestor_changed) =
            (root, parent_world, ancestor_changed);

        while let Some(node) = self.nodes.get(id) {
            let (update, world, cascade) =
                plan_node(id, node, parent_world.as_ref(), ancestor_changed, force);
            out.push(update);

            match node.children.as_slice() {
                [] => break,
                [only] => {
                    id = *only;
                    parent_world = Some(world);
                    ancestor_changed = cascade;
                }
                children => {
                    let planned: Vec<Vec<NodeUpdate>> = children
                        .par_iter()
                        .map(|&child| self.plan_subtree(child, Some(world), cascade, force))
                        .collect();
                    out.extend(planned.into_iter().flatten());
                    break;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use approx::assert_abs_diff_eq;
    use spatia_math::{Quat, Vec3};

    /// root -> a -> b
    fn chain() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut g = SceneGraph::new();
        let root = g.create_node("root");
        let a = g.create_node("a");
        let b = g.create_node("b");
        g.add(root, a).unwrap();
        g.add(a, b).unwrap();
        g.get_mut(a).unwrap().set_position(Vec3::new(0.0, 1.0, 0.0));
        g.get_mut(b).unwrap().set_position(Vec3::new(0.0, 0.0, 1.0));
        (g, root, a, b)
    }

    fn translation(g: &SceneGraph, id: NodeId) -> Vec3 {
        g.get(id).unwrap().world_matrix().position()
    }

    #[test]
    fn test_first_pass_computes_everything() {
        let (mut g, root, a, b) = chain();
        assert_eq!(g.update_world_matrices(false), 3);
        assert_eq!(translation(&g, root), Vec3::ZERO);
        assert_eq!(translation(&g, a), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(translation(&g, b), Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_clean_pass_recomputes_nothing() {
        let (mut g, ..) = chain();
        g.update_world_matrices(false);
        assert_eq!(g.update_world_matrices(false), 0);
    }

    #[test]
    fn test_only_dirty_subtree_recomputes() {
        let (mut g, _, a, b) = chain();
        g.update_world_matrices(false);
        g.get_mut(a).unwrap().translate_x(2.0);
        assert_eq!(g.update_world_matrices(false), 2);
        assert_eq!(translation(&g, b), Vec3::new(2.0, 1.0, 1.0));
        assert!(!g.get(a).unwrap().world_matrix_needs_update());
    }

    #[test]
    fn test_auto_update_off_keeps_stale_world() {
        let (mut g, root, a, b) = chain();
        g.update_world_matrices(false);
        let before = *g.get(b).unwrap().world_matrix();

        g.get_mut(b).unwrap().world_matrix_auto_update = false;
        g.get_mut(root).unwrap().set_position(Vec3::new(5.0, 0.0, 0.0));
        g.update_world_matrices(false);

        assert_eq!(translation(&g, a), Vec3::new(5.0, 1.0, 0.0));
        assert_eq!(*g.get(b).unwrap().world_matrix(), before);
    }

    #[test]
    fn test_children_of_skipped_node_still_visited() {
        let (mut g, _, a, b) = chain();
        let c = g.create_node("c");
        g.add(b, c).unwrap();
        g.update_world_matrices(false);

        g.get_mut(b).unwrap().world_matrix_auto_update = false;
        g.get_mut(c).unwrap().set_position(Vec3::new(1.0, 0.0, 0.0));
        g.get_mut(a).unwrap().set_position(Vec3::new(0.0, 3.0, 0.0));
        g.update_world_matrices(false);

        // b is frozen at its old world; c composes onto that
        assert_eq!(translation(&g, b), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(translation(&g, c), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_force_updates_every_descendant() {
        let (mut g, root, _, b) = chain();
        g.update_world_matrices(false);
        g.get_mut(b).unwrap().world_matrix_auto_update = false;
        g.get_mut(root).unwrap().set_position(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(g.update_world_matrices(true), 3);
        assert_eq!(translation(&g, b), Vec3::new(5.0, 1.0, 1.0));
    }

    #[test]
    fn test_matrix_auto_update_off_uses_manual_matrix() {
        let (mut g, _, a, b) = chain();
        g.update_world_matrices(false);
        {
            let node = g.get_mut(a).unwrap();
            node.matrix_auto_update = false;
            node.set_position(Vec3::new(9.0, 9.0, 9.0));
        }
        g.update_world_matrices(false);
        // TRS change ignored without auto update
        assert_eq!(translation(&g, a), Vec3::new(0.0, 1.0, 0.0));

        g.get_mut(a)
            .unwrap()
            .set_matrix(Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
        g.update_world_matrices(false);
        assert_eq!(translation(&g, b), Vec3::new(0.0, 2.0, 1.0));
    }

    #[test]
    fn test_manual_matrix_replaced_when_auto_update_on() {
        let (mut g, _, a, b) = chain();
        g.update_world_matrices(false);

        g.get_mut(a)
            .unwrap()
            .set_matrix(Mat4::from_translation(Vec3::new(9.0, 9.0, 9.0)));
        g.update_world_matrices(false);

        // TRS wins again on the next pass
        let node = g.get(a).unwrap();
        assert_eq!(*node.matrix(), Mat4::compose(node.position(), node.quaternion(), node.scale()));
        assert_eq!(translation(&g, a), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(translation(&g, b), Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_reparented_node_picks_up_new_parent() {
        let (mut g, root, _, b) = chain();
        g.get_mut(root).unwrap().set_position(Vec3::new(0.0, 0.0, -4.0));
        g.update_world_matrices(false);
        let other = g.create_node("other");
        g.get_mut(other).unwrap().set_position(Vec3::new(7.0, 0.0, 0.0));
        g.update_world_matrices(false);

        g.add(other, b).unwrap();
        g.update_world_matrices(false);
        assert_eq!(translation(&g, b), Vec3::new(7.0, 0.0, 1.0));
    }

    #[test]
    fn test_camera_world_inverse_refreshed() {
        let mut g = SceneGraph::new();
        let cam = g.create_camera("cam", Camera::default());
        g.get_mut(cam).unwrap().set_position(Vec3::new(0.0, 0.0, 10.0));
        g.update_world_matrices(false);
        let view = g.camera(cam).unwrap().world_matrix_inverse();
        assert_abs_diff_eq!(view.position(), Vec3::new(0.0, 0.0, -10.0), epsilon = 1e-12);

        g.get_mut(cam).unwrap().set_scale(Vec3::new(1.0, 0.0, 1.0));
        g.update_world_matrices(false);
        assert!(g.camera(cam).unwrap().world_matrix_inverse().is_zero());
    }

    #[cfg(feature = "parallel")]
    fn wide_tree() -> SceneGraph {
        let mut g = SceneGraph::new();
        for r in 0..3 {
            let root = g.create_node(format!("root{r}"));
            g.get_mut(root)
                .unwrap()
                .set_position(Vec3::new(r as f64, 0.0, 0.0));
            let mut level = vec![root];
            for depth in 0..4 {
                let mut next = Vec::new();
                for &parent in &level {
                    for i in 0..3 {
                        let child = g.create_node(format!("n{depth}_{i}"));
                        let node = g.get_mut(child).unwrap();
                        node.set_position(Vec3::new(0.1 * i as f64, 1.0, -0.5));
                        node.set_quaternion(Quat::from_axis_angle(Vec3::Y, 0.3 * (i + depth) as f64));
                        node.set_scale(Vec3::splat(0.9));
                        g.add(parent, child).unwrap();
                        next.push(child);
                    }
                }
                level = next;
            }
        }
        g
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut seq = wide_tree();
        let mut par = seq.clone();

        let first = seq.update_world_matrices(false);
        assert_eq!(par.update_world_matrices_parallel(false), first);
        for (id, node) in seq.iter() {
            assert_eq!(node.world_matrix(), par.get(id).unwrap().world_matrix());
        }

        let some = seq.find_by_name("n1_2").unwrap();
        seq.get_mut(some).unwrap().translate_y(1.0);
        par.get_mut(some).unwrap().translate_y(1.0);
        assert_eq!(
            seq.update_world_matrices(false),
            par.update_world_matrices_parallel(false)
        );
        assert_eq!(seq.update_world_matrices(true), par.update_world_matrices_parallel(true));
        for (id, node) in seq.iter() {
            let other = par.get(id).unwrap();
            assert_eq!(node.world_matrix(), other.world_matrix());
            assert_eq!(node.matrix(), other.matrix());
        }
    }
}
