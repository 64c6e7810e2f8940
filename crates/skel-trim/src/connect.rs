//! Piece connection: bridge disjoint components left behind by dust and
//! loop removal when their nearest points are close enough, relative to
//! their inscribed radii, to plausibly be the same underlying process.
//!
//! Components are visited as pairs `(i, j)` in lexicographic order; the
//! first pair whose nearest-point gap is covered by the pair's combined
//! radii is bridged immediately, and the whole search restarts from
//! scratch since bridging changes the component structure. This mirrors
//! the reference implementation's `combination_pairs` sweep exactly
//! rather than scanning every pair and picking a global best, which
//! would pick a different — if not worse — set of bridge edges.

use crate::kdtree::KdTree;
use crate::support::component_membership;
use skel_core::model::{Edge, Skeleton};
use std::collections::HashSet;
use tracing::debug;

/// Bridge components of `skeleton` whose nearest points satisfy
/// `radius(a) + radius(b) >= distance(a, b)`, repeating until no more
/// candidates qualify or only one component remains.
#[must_use]
pub fn connect_pieces(skeleton: &Skeleton) -> Skeleton {
    if skeleton.is_empty() {
        return skeleton.clone();
    }

    let mut edges: HashSet<Edge> = skeleton.edges.iter().map(|e| e.normalized()).collect();
    let mut bridges_added = 0u32;

    loop {
        let working = Skeleton {
            id: skeleton.id,
            vertices: skeleton.vertices.clone(),
            edges: edges.iter().copied().collect(),
            radii: skeleton.radii.clone(),
            vertex_types: skeleton.vertex_types.clone(),
        };
        let components = component_membership(&working);
        if components.len() <= 1 {
            break;
        }

        let Some((a, b)) = best_bridge_candidate(skeleton, &components) else {
            break;
        };

        edges.insert(Edge(a, b).normalized());
        bridges_added += 1;
    }

    debug!(bridges_added, "piece connection converged");

    Skeleton {
        id: skeleton.id,
        vertices: skeleton.vertices.clone(),
        edges: edges.into_iter().collect(),
        radii: skeleton.radii.clone(),
        vertex_types: skeleton.vertex_types.clone(),
    }
}

/// Walk component pairs `(i, j)` in lexicographic order; for the first pair
/// whose nearest-point gap is covered by the combined radii at that gap,
/// return that vertex pair. Pairs that don't qualify are skipped entirely
/// rather than contributing to some other pair's decision.
fn best_bridge_candidate(skeleton: &Skeleton, components: &[Vec<u32>]) -> Option<(u32, u32)> {
    for i in 0..components.len() {
        for j in (i + 1)..components.len() {
            let tree = KdTree::build(&skeleton.vertices, &components[j]);
            let mut nearest: Option<(u32, u32, f64)> = None;

            for &a in &components[i] {
                let Some((b, dist_sq)) = tree.nearest(skeleton.vertices[a as usize]) else {
                    continue;
                };
                if nearest.is_none_or(|(_, _, best_sq)| dist_sq < best_sq) {
                    nearest = Some((a, b, dist_sq));
                }
            }

            let Some((a, b, dist_sq)) = nearest else {
                continue;
            };
            let dist = dist_sq.sqrt();
            let radius_sum = skeleton.radii[a as usize] + skeleton.radii[b as usize];
            if radius_sum >= dist {
                return Some((a, b));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::component_membership;

    fn skel(vertices: Vec<[f64; 3]>, edges: Vec<(u32, u32)>, radii: Vec<f64>) -> Skeleton {
        Skeleton {
            id: 1,
            vertices,
            edges: edges.into_iter().map(|(a, b)| Edge(a, b)).collect(),
            radii,
            vertex_types: None,
        }
    }

    #[test]
    fn single_component_is_unchanged() {
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            vec![(0, 1)],
            vec![1.0, 1.0],
        );
        let out = connect_pieces(&s);
        assert_eq!(out.edges.len(), 1);
    }

    #[test]
    fn close_pieces_with_sufficient_radius_are_bridged() {
        // Gap of 10nm between the pieces; combined radius of 12nm covers it.
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [11.0, 0.0, 0.0], [12.0, 0.0, 0.0]],
            vec![(0, 1), (2, 3)],
            vec![6.0, 1.0, 6.0, 1.0],
        );
        let out = connect_pieces(&s);
        assert_eq!(component_membership(&out).len(), 1);
    }

    #[test]
    fn distant_pieces_with_small_radii_are_left_disjoint() {
        let s = skel(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1000.0, 0.0, 0.0], [1001.0, 0.0, 0.0]],
            vec![(0, 1), (2, 3)],
            vec![1.0, 1.0, 1.0, 1.0],
        );
        let out = connect_pieces(&s);
        assert_eq!(component_membership(&out).len(), 2);
    }

    #[test]
    fn chain_of_three_pieces_fully_connects_across_restarts() {
        // Three 2-vertex pieces with equal 9nm gaps; each restart of the
        // sweep should find and bridge one gap until a single piece remains.
        let s = skel(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [10.0, 0.0, 0.0],
                [11.0, 0.0, 0.0],
                [20.0, 0.0, 0.0],
                [21.0, 0.0, 0.0],
            ],
            vec![(0, 1), (2, 3), (4, 5)],
            vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
        );
        let out = connect_pieces(&s);
        assert_eq!(component_membership(&out).len(), 1);
    }
}
