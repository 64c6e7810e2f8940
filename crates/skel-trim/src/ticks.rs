//! Tick removal: prune short dangling branches ("ticks") left over from
//! per-chunk edge effects, working not on the full-resolution skeleton but
//! on a "supergraph" of critical points (terminal and branch vertices)
//! connected by weighted superedges equal to the cable length of the
//! degree-2 chain between them.
//!
//! Operating on the supergraph instead of the raw vertex graph is what
//! keeps this quadratic-in-terminal-branches rather than quadratic in
//! total vertex count: real skeletons can have hundreds of thousands of
//! vertices but only a handful of branches.

use crate::graphutil::{bfs_shortest_path, build_adjacency, path_to_edges};
use crate::support::{consolidate, simple_merge, split_into_components};
use skel_core::model::{Edge, Skeleton};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Remove ticks shorter than `threshold` nanometers from every component
/// of `skeleton`.
#[must_use]
pub fn remove_ticks(skeleton: &Skeleton, threshold: f64) -> Skeleton {
    if skeleton.is_empty() {
        return skeleton.clone();
    }

    let parts: Vec<Skeleton> = split_into_components(skeleton)
        .into_iter()
        .map(|c| remove_ticks_in_component(&c, threshold))
        .collect();

    consolidate(&simple_merge(parts))
}

fn remove_ticks_in_component(skeleton: &Skeleton, threshold: f64) -> Skeleton {
    let n = skeleton.vertices.len();
    let degree = skeleton.degrees();

    let terminal_nodes: HashSet<u32> = (0..n as u32).filter(|&v| degree[v as usize] == 1).collect();
    let branch_nodes: HashSet<u32> = (0..n as u32).filter(|&v| degree[v as usize] >= 3).collect();

    let Some(&start) = terminal_nodes.iter().min() else {
        // No terminal node: the component is either a single isolated
        // vertex or (should not occur post loop-removal) a pure cycle.
        // Nothing to trim against in either case.
        return skeleton.clone();
    };

    let mut critical_points = terminal_nodes.clone();
    critical_points.extend(&branch_nodes);

    let mut tree_edges: HashSet<Edge> = skeleton.edges.iter().map(|e| e.normalized()).collect();
    let tree_adjacency = build_adjacency(n, &tree_edges);

    let mut distance_graph = build_distance_graph(skeleton, &critical_points, &tree_adjacency, start);

    let mut branch_counts: HashMap<u32, i64> = branch_nodes
        .iter()
        .map(|&v| (v, i64::from(degree[v as usize])))
        .collect();

    let mut ticks_removed = 0u32;

    while distance_graph.len() > 1 {
        let candidate = distance_graph
            .keys()
            .filter(|edge| terminal_nodes.contains(&edge.0) || terminal_nodes.contains(&edge.1))
            .min_by(|a, b| {
                distance_graph[*a]
                    .total_cmp(&distance_graph[*b])
                    .then_with(|| a.0.cmp(&b.0))
                    .then_with(|| a.1.cmp(&b.1))
            })
            .copied();

        let Some(min_edge) = candidate else {
            break;
        };

        let e1 = min_edge.0;
        let e2 = min_edge.1;
        let count1 = branch_counts.get(&e1).copied().unwrap_or(0);
        let count2 = branch_counts.get(&e2).copied().unwrap_or(0);

        if count1 == 1 && count2 == 1 {
            break;
        }
        if distance_graph[&min_edge] >= threshold {
            break;
        }

        let adjacency = build_adjacency(n, &tree_edges);
        let path = bfs_shortest_path(&adjacency, e1, e2);
        for edge in path_to_edges(&path) {
            tree_edges.remove(&edge);
        }

        distance_graph.remove(&min_edge);
        *branch_counts.entry(e1).or_insert(0) -= 1;
        *branch_counts.entry(e2).or_insert(0) -= 1;
        ticks_removed += 1;

        if branch_counts.get(&e1).copied() == Some(2) {
            fuse_edge(&mut distance_graph, &mut branch_counts, e1);
        }
        if branch_counts.get(&e2).copied() == Some(2) {
            fuse_edge(&mut distance_graph, &mut branch_counts, e2);
        }
    }

    debug!(ticks_removed, "tick removal converged for component");

    Skeleton {
        id: skeleton.id,
        vertices: skeleton.vertices.clone(),
        edges: tree_edges.into_iter().collect(),
        radii: skeleton.radii.clone(),
        vertex_types: skeleton.vertex_types.clone(),
    }
}

/// Collapse the two remaining superedges touching `v` (a branch point
/// whose physical degree just dropped to 2) into a single superedge
/// between its two other endpoints, summing their weights.
fn fuse_edge(distance_graph: &mut HashMap<Edge, f64>, branch_counts: &mut HashMap<u32, i64>, v: u32) {
    let incident: Vec<Edge> = distance_graph.keys().filter(|e| e.contains(v)).copied().collect();

    let mut total = 0.0;
    let mut others = HashSet::new();
    for edge in &incident {
        total += distance_graph.remove(edge).unwrap_or(0.0);
        others.insert(edge.other(v));
    }
    others.remove(&v);

    if let [a, b] = others.into_iter().collect::<Vec<_>>()[..] {
        distance_graph.insert(Edge(a, b).normalized(), total);
    }
    branch_counts.insert(v, 0);
}

/// Walk the tree from `start`, recording the cable length between each
/// pair of consecutive critical points along the walk.
fn build_distance_graph(
    skeleton: &Skeleton,
    critical_points: &HashSet<u32>,
    adjacency: &[Vec<u32>],
    start: u32,
) -> HashMap<Edge, f64> {
    let mut distance_graph = HashMap::new();

    // (node, parent, distance-since-root, root)
    let mut stack = vec![(start, u32::MAX, 0.0_f64, start)];

    while let Some((node, parent, dist, root)) = stack.pop() {
        let (dist, root) = if critical_points.contains(&node) && node != root {
            distance_graph.insert(Edge(root, node).normalized(), dist);
            (0.0, node)
        } else {
            (dist, root)
        };

        for &child in &adjacency[node as usize] {
            if child != parent {
                let step = skeleton.distance(node, child);
                stack.push((child, node, dist + step, root));
            }
        }
    }

    distance_graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skel(vertices: Vec<[f64; 3]>, edges: Vec<(u32, u32)>) -> Skeleton {
        let radii = vec![1.0; vertices.len()];
        Skeleton {
            id: 1,
            vertices,
            edges: edges.into_iter().map(|(a, b)| Edge(a, b)).collect(),
            radii,
            vertex_types: None,
        }
    }

    #[test]
    fn straight_chain_has_no_ticks_to_remove() {
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            vec![(0, 1), (1, 2)],
        );
        let out = remove_ticks(&s, 6000.0);
        assert_eq!(out.edges.len(), 2);
    }

    #[test]
    fn short_dangling_branch_is_removed() {
        // Main trunk 0-1-2-3 (long), short tick 1-4 (1nm, well under 6000).
        let s = skel(
            vec![
                [0.0, 0.0, 0.0],
                [1000.0, 0.0, 0.0],
                [9000.0, 0.0, 0.0],
                [17000.0, 0.0, 0.0],
                [1000.0, 1.0, 0.0],
            ],
            vec![(0, 1), (1, 2), (2, 3), (1, 4)],
        );
        let out = remove_ticks(&s, 6000.0);
        let degree = out.degrees();
        // Vertex 4 (the tick tip) must be gone after consolidation.
        assert!(degree.len() < 5 || degree[4] == 0);
    }

    #[test]
    fn long_dangling_branch_survives() {
        // Every arm off the branch point (1) is longer than the threshold,
        // so no tick qualifies for removal.
        let s = skel(
            vec![
                [-10000.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [9000.0, 0.0, 0.0],
                [17000.0, 0.0, 0.0],
                [0.0, 10000.0, 0.0],
            ],
            vec![(0, 1), (1, 2), (2, 3), (1, 4)],
        );
        let out = remove_ticks(&s, 6000.0);
        assert_eq!(out.vertices.len(), 5);
    }

    #[test]
    fn single_isolated_vertex_is_unchanged() {
        let s = skel(vec![[0.0, 0.0, 0.0]], vec![]);
        let out = remove_ticks(&s, 6000.0);
        assert_eq!(out.vertices.len(), 1);
    }

    #[test]
    fn shortest_tick_at_a_branch_is_removed_first_and_alone() {
        // Branch point 1 with two short ticks (0 and 2) and a long trunk
        // to 3. Removing the shortest tick drops the branch to degree 2,
        // fusing its remaining tick and trunk into one long superedge —
        // so only the single shortest tick is ever removed.
        let s = skel(
            vec![
                [0.0, 1.0, 0.0],     // 0: tick tip, 1nm from branch
                [0.0, 0.0, 0.0],     // 1: branch
                [0.0, -1.0, 0.0],    // 2: tick tip, 1nm from branch
                [20000.0, 0.0, 0.0], // 3: trunk end
            ],
            vec![(0, 1), (1, 2), (1, 3)],
        );
        let out = remove_ticks(&s, 6000.0);
        assert_eq!(out.vertices.len(), 3);
    }
}
