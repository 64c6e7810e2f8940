//! Component splitting, simple merge, and consolidation — the utility
//! operations every pass builds on.

use petgraph::unionfind::UnionFind;
use skel_core::model::{Edge, Skeleton};

/// Partition a skeleton's vertex indices into connected components.
///
/// Isolated vertices (no incident edges) form their own singleton
/// components. Components are ordered by their smallest member index, and
/// each component's members are sorted ascending, so the result is
/// deterministic for a given input.
#[must_use]
pub fn component_membership(skeleton: &Skeleton) -> Vec<Vec<u32>> {
    let n = skeleton.vertices.len();
    if n == 0 {
        return Vec::new();
    }

    let mut uf = UnionFind::new(n);
    for edge in &skeleton.edges {
        uf.union(edge.0 as usize, edge.1 as usize);
    }

    let labels = uf.into_labeling();
    let mut groups: std::collections::HashMap<usize, Vec<u32>> = std::collections::HashMap::new();
    for (vertex, root) in labels.iter().enumerate() {
        groups.entry(*root).or_default().push(vertex as u32);
    }

    let mut components: Vec<Vec<u32>> = groups.into_values().collect();
    for members in &mut components {
        members.sort_unstable();
    }
    components.sort_unstable_by_key(|members| members[0]);
    components
}

/// Split a skeleton into one sub-skeleton per connected component, each
/// consolidated to a compact index range. Every sub-skeleton keeps the
/// parent's `id`. Components are ordered by smallest original vertex index.
#[must_use]
pub fn split_into_components(skeleton: &Skeleton) -> Vec<Skeleton> {
    component_membership(skeleton)
        .into_iter()
        .map(|members| extract_subgraph(skeleton, &members))
        .collect()
}

fn extract_subgraph(skeleton: &Skeleton, members: &[u32]) -> Skeleton {
    let mut remap = std::collections::HashMap::with_capacity(members.len());
    let mut vertices = Vec::with_capacity(members.len());
    let mut radii = Vec::with_capacity(members.len());
    let mut vertex_types = skeleton.vertex_types.as_ref().map(|_| Vec::new());

    for (new_index, &old_index) in members.iter().enumerate() {
        remap.insert(old_index, new_index as u32);
        vertices.push(skeleton.vertices[old_index as usize]);
        radii.push(skeleton.radii[old_index as usize]);
        if let (Some(types), Some(src)) = (vertex_types.as_mut(), skeleton.vertex_types.as_ref()) {
            types.push(src[old_index as usize]);
        }
    }

    let member_set: std::collections::HashSet<u32> = members.iter().copied().collect();
    let edges = skeleton
        .edges
        .iter()
        .filter(|e| member_set.contains(&e.0))
        .map(|e| Edge(remap[&e.0], remap[&e.1]))
        .collect();

    Skeleton {
        id: skeleton.id,
        vertices,
        edges,
        radii,
        vertex_types,
    }
}

/// Concatenate several skeletons' vertex/edge/radius arrays, shifting each
/// successor's edge indices by the cumulative vertex count of predecessors.
/// Does not deduplicate coincident vertices. The result's `id` is taken from
/// the first non-empty input, or `0` if all inputs are empty.
#[must_use]
pub fn simple_merge(skeletons: Vec<Skeleton>) -> Skeleton {
    let id = skeletons
        .iter()
        .find(|s| !s.is_empty())
        .map_or(0, |s| s.id);

    let has_types = skeletons.iter().any(|s| s.vertex_types.is_some());
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    let mut radii = Vec::new();
    let mut vertex_types: Vec<i32> = Vec::new();

    let mut offset: u32 = 0;
    for skel in skeletons {
        for edge in &skel.edges {
            edges.push(Edge(edge.0 + offset, edge.1 + offset));
        }
        offset += skel.vertices.len() as u32;

        if has_types {
            match skel.vertex_types {
                Some(t) => vertex_types.extend(t),
                None => vertex_types.extend(std::iter::repeat(0).take(skel.vertices.len())),
            }
        }

        vertices.extend(skel.vertices);
        radii.extend(skel.radii);
    }

    Skeleton {
        id,
        vertices,
        edges,
        radii,
        vertex_types: has_types.then_some(vertex_types),
    }
}

/// Remove vertices with degree 0 and reindex the remainder to a compact
/// `[0, N)` range, rewriting edges and shrinking radii to match.
#[must_use]
pub fn consolidate(skeleton: &Skeleton) -> Skeleton {
    let degree = skeleton.degrees();
    let keep: Vec<u32> = (0..skeleton.vertices.len() as u32)
        .filter(|&v| degree[v as usize] > 0)
        .collect();
    extract_subgraph(skeleton, &keep)
}
