//! Dust removal: drop connected components whose cable length falls below
//! a threshold. Components are cable-length-independent of each other, so
//! this pass is just a filter over [`split_into_components`].

use crate::support::{simple_merge, split_into_components};
use skel_core::model::Skeleton;
use tracing::debug;

/// Remove every connected component of `skeleton` whose cable length does
/// not strictly exceed `dust_threshold` nanometers. A component consisting
/// of a single, edgeless vertex has cable length zero and is removed
/// whenever `dust_threshold >= 0.0`.
#[must_use]
pub fn remove_dust(skeleton: &Skeleton, dust_threshold: f64) -> Skeleton {
    if skeleton.is_empty() {
        return skeleton.clone();
    }

    let components = split_into_components(skeleton);
    let total = components.len();
    let kept: Vec<Skeleton> = components
        .into_iter()
        .filter(|c| c.cable_length() > dust_threshold)
        .collect();

    debug!(
        total_components = total,
        kept_components = kept.len(),
        dust_threshold,
        "dust removal"
    );

    simple_merge(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skel_core::model::Edge;

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
    fn empty_skeleton_is_unchanged() {
        let s = Skeleton::empty();
        let out = remove_dust(&s, 100.0);
        assert!(out.is_empty());
    }

    #[test]
    fn short_component_is_dropped() {
        // A 2-vertex stub with 1.0 nm of cable, well under any real threshold.
        let s = skel(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], vec![(0, 1)]);
        let out = remove_dust(&s, 4000.0);
        assert!(out.is_empty());
    }

    #[test]
    fn long_component_survives() {
        let s = skel(vec![[0.0, 0.0, 0.0], [5000.0, 0.0, 0.0]], vec![(0, 1)]);
        let out = remove_dust(&s, 4000.0);
        assert_eq!(out.vertices.len(), 2);
        assert_eq!(out.edges, vec![Edge(0, 1)]);
    }

    #[test]
    fn mixed_components_only_long_ones_survive() {
        let s = skel(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [100.0, 0.0, 0.0],
                [10100.0, 0.0, 0.0],
            ],
            vec![(0, 1), (2, 3)],
        );
        let out = remove_dust(&s, 4000.0);
        assert_eq!(out.vertices.len(), 2);
        assert_eq!(out.cable_length(), 10000.0);
    }

    #[test]
    fn zero_threshold_drops_isolated_vertices() {
        // Cable length 0 does not strictly exceed a threshold of 0.
        let s = skel(vec![[0.0, 0.0, 0.0]], vec![]);
        let out = remove_dust(&s, 0.0);
        assert!(out.is_empty());
    }

    #[test]
    fn positive_threshold_drops_isolated_vertices() {
        let s = skel(vec![[0.0, 0.0, 0.0]], vec![]);
        let out = remove_dust(&s, 1.0);
        assert!(out.is_empty());
    }

    #[test]
    fn component_with_cable_length_exactly_at_threshold_is_dropped() {
        let s = skel(vec![[0.0, 0.0, 0.0], [4000.0, 0.0, 0.0]], vec![(0, 1)]);
        let out = remove_dust(&s, 4000.0);
        assert!(out.is_empty());
    }
}
