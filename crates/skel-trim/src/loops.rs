//! Loop removal: break every cycle in the skeleton graph, reconnecting the
//! branch points it passed through so that connectivity through the loop is
//! preserved by a single representative edge or star rather than by the
//! loop itself.
//!
//! Each component is processed independently and the pass repeats per
//! component until no cycle remains, since breaking one cycle can uncover
//! another sharing an edge with it.

use crate::graphutil::{bfs_shortest_path, build_adjacency, path_to_edges};
use crate::support::{consolidate, simple_merge, split_into_components};
use fixedbitset::FixedBitSet;
use skel_core::model::{squared_distance, Edge, Skeleton};
use std::collections::HashSet;
use tracing::debug;

/// Remove all cycles from `skeleton`, component by component.
#[must_use]
pub fn remove_loops(skeleton: &Skeleton) -> Skeleton {
    if skeleton.is_empty() {
        return skeleton.clone();
    }

    let parts: Vec<Skeleton> = split_into_components(skeleton)
        .into_iter()
        .map(|c| remove_loops_in_component(&c))
        .collect();

    consolidate(&simple_merge(parts))
}

fn remove_loops_in_component(skeleton: &Skeleton) -> Skeleton {
    let mut edges: HashSet<Edge> = skeleton.edges.iter().map(|e| e.normalized()).collect();
    let n = skeleton.vertices.len();

    loop {
        let adjacency = build_adjacency(n, &edges);
        let Some((cycle_nodes, cycle_edges)) = find_cycle(&adjacency) else {
            break;
        };

        let degree = degree_from_edges(n, &edges);
        let mut branch_cycle: Vec<u32> = cycle_nodes
            .iter()
            .copied()
            .filter(|&v| degree[v as usize] >= 3)
            .collect();
        branch_cycle.sort_unstable();
        branch_cycle.dedup();

        match branch_cycle.len() {
            0 => {
                edges.retain(|e| !cycle_edges.contains(e));
            }
            1 => {
                let branch = branch_cycle[0];
                let farthest = cycle_nodes
                    .iter()
                    .copied()
                    .max_by(|&a, &b| {
                        let da = squared_distance(skeleton.vertices[branch as usize], skeleton.vertices[a as usize]);
                        let db = squared_distance(skeleton.vertices[branch as usize], skeleton.vertices[b as usize]);
                        da.total_cmp(&db)
                    })
                    .expect("cycle has at least one node");

                edges.retain(|e| !cycle_edges.contains(e));
                if farthest != branch {
                    edges.insert(Edge(branch, farthest).normalized());
                }
            }
            2 => {
                let path = bfs_shortest_path(&adjacency, branch_cycle[0], branch_cycle[1]);
                let path_edges: HashSet<Edge> = path_to_edges(&path).into_iter().collect();
                edges.retain(|e| !cycle_edges.contains(e) || path_edges.contains(e));
            }
            _ => {
                let centroid = centroid_of(skeleton, &branch_cycle);
                let hub = (0..n as u32)
                    .min_by(|&a, &b| {
                        squared_distance(centroid, skeleton.vertices[a as usize])
                            .total_cmp(&squared_distance(centroid, skeleton.vertices[b as usize]))
                    })
                    .expect("component is nonempty");

                edges.retain(|e| !cycle_edges.contains(e));
                for &branch in &branch_cycle {
                    if branch != hub {
                        edges.insert(Edge(branch, hub).normalized());
                    }
                }
            }
        }
    }

    debug!(vertices = n, "loop removal converged");

    Skeleton {
        id: skeleton.id,
        vertices: skeleton.vertices.clone(),
        edges: edges.into_iter().collect(),
        radii: skeleton.radii.clone(),
        vertex_types: skeleton.vertex_types.clone(),
    }
}

fn centroid_of(skeleton: &Skeleton, members: &[u32]) -> [f64; 3] {
    let mut sum = [0.0; 3];
    for &v in members {
        let p = skeleton.vertices[v as usize];
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
    }
    let count = members.len() as f64;
    [sum[0] / count, sum[1] / count, sum[2] / count]
}

fn degree_from_edges(n: usize, edges: &HashSet<Edge>) -> Vec<u32> {
    let mut degree = vec![0u32; n];
    for edge in edges {
        degree[edge.0 as usize] += 1;
        degree[edge.1 as usize] += 1;
    }
    degree
}

/// Find a cycle via iterative DFS back-edge detection. Returns the cycle's
/// vertex set and its normalized edges, or `None` if the graph is a forest.
pub(crate) fn find_cycle(adjacency: &[Vec<u32>]) -> Option<(Vec<u32>, HashSet<Edge>)> {
    let n = adjacency.len();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut on_stack = FixedBitSet::with_capacity(n);
    let mut parent = vec![u32::MAX; n];

    for start in 0..n as u32 {
        if visited[start as usize] {
            continue;
        }

        let mut stack: Vec<(u32, usize)> = vec![(start, 0)];
        visited.insert(start as usize);
        on_stack.insert(start as usize);

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if frame.1 >= adjacency[node as usize].len() {
                on_stack.set(node as usize, false);
                stack.pop();
                continue;
            }

            let neighbor = adjacency[node as usize][frame.1];
            frame.1 += 1;

            if neighbor == parent[node as usize] {
                continue;
            }

            if on_stack[neighbor as usize] {
                let mut cycle_nodes = vec![node];
                let mut cur = node;
                while cur != neighbor {
                    cur = parent[cur as usize];
                    cycle_nodes.push(cur);
                }

                let mut cycle_edges: HashSet<Edge> = cycle_nodes
                    .windows(2)
                    .map(|w| Edge(w[0], w[1]).normalized())
                    .collect();
                cycle_edges.insert(Edge(node, neighbor).normalized());

                return Some((cycle_nodes, cycle_edges));
            }

            if !visited[neighbor as usize] {
                visited.insert(neighbor as usize);
                on_stack.insert(neighbor as usize);
                parent[neighbor as usize] = node;
                stack.push((neighbor, 0));
            }
        }
    }

    None
}
