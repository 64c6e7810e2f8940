//! The [`Skeleton`] value: an undirected geometric graph in physical
//! nanometers, the sole input and output type of the trim pipeline.

use crate::error::{SkelError, ValidationError};
use serde::{Deserialize, Serialize};

/// A 3-D point in physical nanometers.
pub type Point = [f64; 3];

/// An undirected edge between two vertex indices. Always constructed with
/// `a != b`; equality and hashing are endpoint-order independent via
/// [`Edge::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge(pub u32, pub u32);

impl Edge {
    /// Returns the same edge with the smaller index first, for use as a
    /// deduplication/lookup key.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            Self(self.1, self.0)
        }
    }

    #[must_use]
    pub const fn contains(self, v: u32) -> bool {
        self.0 == v || self.1 == v
    }

    /// The endpoint that is not `v`. Panics if `v` is not an endpoint — only
    /// call this after confirming membership with [`contains`](Self::contains).
    #[must_use]
    pub fn other(self, v: u32) -> u32 {
        if self.0 == v { self.1 } else { self.0 }
    }
}

/// The geometric graph produced by merging per-chunk TEASAR fragments for a
/// single segmented object.
///
/// Vertex identity is positional: edges and radii refer to vertices by
/// index into `vertices`. See the crate-level invariants in `SPEC_FULL.md`
/// §3 for the guarantees each pipeline pass preserves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skeleton {
    /// Opaque identifier of the segmented object this skeleton belongs to.
    pub id: u64,
    /// Vertex coordinates in nanometers, indexed by position.
    pub vertices: Vec<Point>,
    /// Undirected edges between vertex indices. No parallel edges or
    /// self-loops in a validated skeleton.
    pub edges: Vec<Edge>,
    /// Per-vertex inscribed-ball radius in nanometers, aligned with `vertices`.
    pub radii: Vec<f64>,
    /// Optional per-vertex tags (e.g. upstream vertex classification).
    /// Carried through every pass but never consulted by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex_types: Option<Vec<i32>>,
}

impl Skeleton {
    /// A skeleton with no vertices and no edges.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if the skeleton has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Validate structural invariants required before running any pass.
    ///
    /// Checks edge endpoints are in range and distinct, radii are aligned
    /// with vertices, and no coordinate is NaN or infinite. Does not check
    /// for duplicate edges or connectivity — those are pass-level concerns.
    pub fn validate(&self) -> Result<(), SkelError> {
        if self.radii.len() != self.vertices.len() {
            return Err(ValidationError::RadiiLengthMismatch {
                radii_len: self.radii.len(),
                vertex_count: self.vertices.len(),
            }
            .into());
        }

        for (index, point) in self.vertices.iter().enumerate() {
            for (axis_name, value) in ["x", "y", "z"].iter().zip(point.iter()) {
                if !value.is_finite() {
                    return Err(ValidationError::NonFiniteCoordinate {
                        index,
                        axis: axis_name,
                        value: *value,
                    }
                    .into());
                }
            }
        }

        for edge in &self.edges {
            if edge.0 == edge.1 {
                return Err(ValidationError::SelfLoop { a: edge.0 }.into());
            }
            let vertex_count = self.vertices.len();
            if edge.0 as usize >= vertex_count || edge.1 as usize >= vertex_count {
                return Err(ValidationError::EdgeOutOfRange {
                    a: edge.0,
                    b: edge.1,
                    vertex_count,
                }
                .into());
            }
        }

        Ok(())
    }

    /// Euclidean distance between two vertices by index.
    #[must_use]
    pub fn distance(&self, a: u32, b: u32) -> f64 {
        squared_distance(self.vertices[a as usize], self.vertices[b as usize]).sqrt()
    }

    /// Sum of euclidean edge lengths. Assumes a validated skeleton.
    #[must_use]
    pub fn cable_length(&self) -> f64 {
        self.edges.iter().map(|e| self.distance(e.0, e.1)).sum()
    }

    /// Degree of every vertex, indexed by vertex index.
    #[must_use]
    pub fn degrees(&self) -> Vec<u32> {
        let mut degree = vec![0u32; self.vertices.len()];
        for edge in &self.edges {
            degree[edge.0 as usize] += 1;
            degree[edge.1 as usize] += 1;
        }
        degree
    }
}

/// Squared euclidean distance, avoiding a `sqrt` for comparisons that only
/// need relative ordering (e.g. nearest-neighbor and centroid searches).
#[must_use]
pub fn squared_distance(a: Point, b: Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
