//! Read-only inspection of a skeleton's graph structure. Nothing here
//! mutates a skeleton; these are the numbers a `skel stats`/`skel
//! diagnose` surface reports, and what a trim pass logs before and after
//! running so a regression shows up as a number, not just a feeling.

use crate::graphutil::build_adjacency;
use crate::loops::find_cycle;
use crate::support::component_membership;
use skel_core::model::{Edge, Skeleton};
use std::collections::HashSet;

/// Summary statistics for a skeleton, independent of any trim pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub cable_length: f64,
    pub terminal_count: usize,
    pub branch_count: usize,
    pub max_degree: u32,
    pub cycle_count: usize,
}

/// Compute [`GraphStats`] for `skeleton`.
#[must_use]
pub fn analyze(skeleton: &Skeleton) -> GraphStats {
    let degree = skeleton.degrees();
    let terminal_count = degree.iter().filter(|&&d| d == 1).count();
    let branch_count = degree.iter().filter(|&&d| d >= 3).count();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    let components = component_membership(skeleton);
    let cycle_count = components
        .iter()
        .filter(|members| component_has_cycle(skeleton, members))
        .count();

    GraphStats {
        vertex_count: skeleton.vertices.len(),
        edge_count: skeleton.edges.len(),
        component_count: components.len(),
        cable_length: skeleton.cable_length(),
        terminal_count,
        branch_count,
        max_degree,
        cycle_count,
    }
}

/// Whether the component spanning `members` contains at least one cycle.
/// A connected component on `n` vertices is a tree (acyclic) iff it has
/// exactly `n - 1` edges; any more implies a cycle.
fn component_has_cycle(skeleton: &Skeleton, members: &[u32]) -> bool {
    let member_set: HashSet<u32> = members.iter().copied().collect();
    let edge_count = skeleton
        .edges
        .iter()
        .filter(|e| member_set.contains(&e.0))
        .count();
    edge_count >= members.len()
}

/// The terminal (degree 1) and branch (degree >= 3) vertex indices of a
/// skeleton, each sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CriticalPoints {
    pub terminals: Vec<u32>,
    pub branches: Vec<u32>,
}

/// Classify every vertex of `skeleton` by degree into terminals and
/// branches. Degree-2 (pass-through) and degree-0 (isolated) vertices are
/// omitted from both lists.
#[must_use]
pub fn critical_points(skeleton: &Skeleton) -> CriticalPoints {
    let degree = skeleton.degrees();
    let mut terminals = Vec::new();
    let mut branches = Vec::new();

    for (index, &d) in degree.iter().enumerate() {
        match d {
            1 => terminals.push(index as u32),
            d if d >= 3 => branches.push(index as u32),
            _ => {}
        }
    }

    CriticalPoints { terminals, branches }
}

/// Every vertex-disjoint-in-discovery-order cycle currently present in
/// `skeleton`, found the same way [`crate::loops::remove_loops`] finds
/// them but without removing anything. Exhausting cycles this way can
/// change which cycle is found next once an earlier one's edges are
/// notionally removed, so the result reflects a specific break order, not
/// an exhaustive enumeration of every cycle in the graph.
#[must_use]
pub fn find_cycles(skeleton: &Skeleton) -> Vec<Vec<Edge>> {
    let mut edges: HashSet<Edge> = skeleton.edges.iter().map(|e| e.normalized()).collect();
    let n = skeleton.vertices.len();
    let mut cycles = Vec::new();

    loop {
        let adjacency = build_adjacency(n, &edges);
        let Some((_, cycle_edges)) = find_cycle(&adjacency) else {
            break;
        };
        edges.retain(|e| !cycle_edges.contains(e));
        cycles.push(cycle_edges.into_iter().collect());
    }

    cycles
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
    fn analyze_counts_a_simple_chain() {
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            vec![(0, 1), (1, 2)],
        );
        let stats = analyze(&s);
        assert_eq!(stats.vertex_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.component_count, 1);
        assert_eq!(stats.terminal_count, 2);
        assert_eq!(stats.branch_count, 0);
        assert_eq!(stats.max_degree, 2);
        assert_eq!(stats.cycle_count, 0);
        assert!((stats.cable_length - 2.0).abs() < 1e-9);
    }

    #[test]
    fn analyze_counts_cycles_and_max_degree() {
        // A triangle (one cycle, max degree 2) sharing a branch vertex with
        // a dangling tail (pushing max degree to 3), plus an isolated
        // second component.
        let s = skel(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [-1.0, 0.0, 0.0],
                [10.0, 10.0, 10.0],
            ],
            vec![(0, 1), (1, 2), (2, 0), (0, 3)],
        );
        let stats = analyze(&s);
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.cycle_count, 1);
        assert_eq!(stats.max_degree, 3);
    }

    #[test]
    fn critical_points_classifies_branch_and_terminals() {
        let s = skel(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            vec![(0, 1), (1, 2), (1, 3)],
        );
        let cp = critical_points(&s);
        assert_eq!(cp.terminals, vec![0, 2, 3]);
        assert_eq!(cp.branches, vec![1]);
    }

    #[test]
    fn find_cycles_detects_a_triangle() {
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![(0, 1), (1, 2), (2, 0)],
        );
        let cycles = find_cycles(&s);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
    }

    #[test]
    fn find_cycles_empty_for_a_tree() {
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            vec![(0, 1), (1, 2)],
        );
        assert!(find_cycles(&s).is_empty());
    }
}
