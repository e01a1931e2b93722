//! Chain command - generated hierarchy with world-matrix propagation

use super::{fmt_vec3, parse_vec3, print_json};
use crate::ChainArgs;
use anyhow::{Result, bail};
use serde_json::json;
use spatia_math::{DEG2RAD, Vec3};
use spatia_scene::{NodeId, SceneGraph};
use std::time::Instant;
use tracing::{debug, info, trace};

/// Upper bound on generated nodes.
const MAX_NODES: usize = 2_000_000;

pub fn run(args: ChainArgs, json: bool) -> Result<()> {
    trace!(depth = args.depth, branching = args.branching, "chain::run");

    let offset = parse_vec3(&args.offset, "--offset")?;
    let total = node_count(args.depth, args.branching.max(1));
    if total > MAX_NODES {
        bail!("Hierarchy would have {total} nodes (limit {MAX_NODES})");
    }

    let (mut graph, root) = build(&args, offset)?;
    debug!(nodes = graph.len(), "Hierarchy built");

    let start = Instant::now();
    let recomputed = if args.parallel {
        graph.update_world_matrices_parallel(args.force)
    } else {
        graph.update_world_matrices(args.force)
    };
    let elapsed = start.elapsed();
    info!(
        nodes = graph.len(),
        recomputed,
        parallel = args.parallel,
        elapsed_us = elapsed.as_micros() as u64,
        "Propagation finished"
    );

    let order = graph.traverse(root)?;
    let shown = if args.limit == 0 { order.len() } else { args.limit.min(order.len()) };

    let mut rows = Vec::with_capacity(shown);
    for &id in &order[..shown] {
        let node = graph.get(id)?;
        rows.push((node.name().to_string(), depth_of(&graph, id)?, node.world_matrix().position()));
    }

    if json {
        return print_json(&json!({
            "nodes": graph.len(),
            "recomputed": recomputed,
            "parallel": args.parallel,
            "elapsed_us": elapsed.as_micros() as u64,
            "world_positions": rows
                .iter()
                .map(|(name, depth, p)| json!({ "name": name, "depth": depth, "position": p }))
                .collect::<Vec<_>>(),
        }));
    }

    println!(
        "{} nodes, {} world matrices recomputed in {:?}{}",
        graph.len(),
        recomputed,
        elapsed,
        if args.parallel { " (parallel)" } else { "" }
    );
    for (name, depth, position) in &rows {
        println!("{:indent$}{name}: {}", "", fmt_vec3(*position), indent = depth * 2);
    }
    if shown < order.len() {
        println!("... {} more", order.len() - shown);
    }

    Ok(())
}

fn node_count(depth: usize, branching: usize) -> usize {
    let mut total = 1usize;
    let mut level = 1usize;
    for _ in 0..depth {
        level = level.saturating_mul(branching);
        total = total.saturating_add(level);
    }
    total
}

/// Builds a uniform tree: every child sits at `offset` from its parent and
/// turns by `angle` degrees about Y.
fn build(args: &ChainArgs, offset: Vec3) -> Result<(SceneGraph, NodeId)> {
    let mut graph = SceneGraph::new();
    let root = graph.create_node("root");
    let angle = args.angle * DEG2RAD;

    let mut level = vec![root];
    for depth in 1..=args.depth {
        let mut next = Vec::with_capacity(level.len() * args.branching);
        for (p, &parent) in level.iter().enumerate() {
            for i in 0..args.branching {
                let child = graph.create_node(format!("n{depth}.{}", p * args.branching + i));
                let node = graph.get_mut(child)?;
                node.set_position(offset);
                node.rotate_y(angle * (i as f64 + 1.0));
                graph.add(parent, child)?;
                next.push(child);
            }
        }
        level = next;
    }
    Ok((graph, root))
}

fn depth_of(graph: &SceneGraph, id: NodeId) -> Result<usize> {
    Ok(graph.ancestors(id)?.len())
}
