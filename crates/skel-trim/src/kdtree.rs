//! A minimal static KD-tree over 3-D points, used by piece connection to
//! find the nearest point in one component to a point in another without
//! a quadratic scan. Built once per query round and discarded; piece
//! connection restarts its whole sweep after every successful bridge, so
//! there is no benefit to an incremental/balanced structure here.

use skel_core::model::{squared_distance, Point};

enum Node {
    Leaf {
        index: u32,
    },
    Split {
        axis: usize,
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A KD-tree over a fixed set of points, queried by original index.
pub struct KdTree<'a> {
    points: &'a [Point],
    root: Option<Node>,
}

impl<'a> KdTree<'a> {
    /// Build a tree over `points` restricted to `indices`. `indices` may be
    /// a subset of `points`' full range; queries always return indices into
    /// the original `points` slice.
    #[must_use]
    pub fn build(points: &'a [Point], indices: &[u32]) -> Self {
        let mut owned: Vec<u32> = indices.to_vec();
        let root = build_node(points, &mut owned, 0);
        Self { points, root }
    }

    /// The index (into the original `points` slice) of the point nearest
    /// `query`, and the squared distance to it. `None` if the tree is empty.
    #[must_use]
    pub fn nearest(&self, query: Point) -> Option<(u32, f64)> {
        let root = self.root.as_ref()?;
        let mut best: Option<(u32, f64)> = None;
        search(root, self.points, query, &mut best);
        best
    }
}

fn build_node(points: &[Point], indices: &mut [u32], depth: usize) -> Option<Node> {
    if indices.is_empty() {
        return None;
    }
    if indices.len() == 1 {
        return Some(Node::Leaf { index: indices[0] });
    }

    let axis = depth % 3;
    indices.sort_unstable_by(|&a, &b| points[a as usize][axis].total_cmp(&points[b as usize][axis]));

    let mid = indices.len() / 2;
    let value = points[indices[mid] as usize][axis];
    let (left_slice, right_slice) = indices.split_at_mut(mid);

    let left = build_node(points, left_slice, depth + 1);
    let right = build_node(points, right_slice, depth + 1);

    match (left, right) {
        (Some(left), Some(right)) => Some(Node::Split {
            axis,
            value,
            left: Box::new(left),
            right: Box::new(right),
        }),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

fn search(node: &Node, points: &[Point], query: Point, best: &mut Option<(u32, f64)>) {
    match node {
        Node::Leaf { index } => {
            let d = squared_distance(query, points[*index as usize]);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                *best = Some((*index, d));
            }
        }
        Node::Split {
            axis,
            value,
            left,
            right,
        } => {
            let diff = query[*axis] - value;
            let (near, far) = if diff <= 0.0 { (left, right) } else { (right, left) };

            search(near, points, query, best);

            let best_so_far = best.map_or(f64::INFINITY, |(_, d)| d);
            if diff * diff < best_so_far {
                search(far, points, query, best);
            }
        }
    }
}
