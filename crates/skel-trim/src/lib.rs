#![forbid(unsafe_code)]
//! Graph-geometric post-processing passes for skeletons assembled from
//! overlapping TEASAR chunks: dust removal, loop removal, piece
//! connection, and tick removal, composed by [`pipeline::trim_skeleton`].
//!
//! Conventions:
//! - Every pass is a pure function: `&Skeleton -> Skeleton`, infallible on
//!   well-formed input. Validate with [`skel_core::model::Skeleton::validate`]
//!   at the boundary, not inside a pass.
//! - Logging: `tracing::debug!` per pass with before/after counts; no pass
//!   logs at `info!` or above, since `trim_skeleton` runs once per
//!   skeleton and per-pass chatter at that level would drown out anything
//!   that matters at pipeline scale.

pub mod connect;
pub mod diagnostics;
pub mod dust;
mod graphutil;
mod kdtree;
pub mod loops;
pub mod pipeline;
pub mod support;
pub mod ticks;

pub use pipeline::trim_skeleton;
