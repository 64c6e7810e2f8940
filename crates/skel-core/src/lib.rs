#![forbid(unsafe_code)]
//! Data model, validation, configuration, and error types shared by the
//! skeleton post-processing pipeline and its CLI.
//!
//! Conventions used throughout this crate and its siblings:
//! - Errors: typed [`error::SkelError`] at crate boundaries (I/O, config,
//!   validation); pure in-memory transforms are infallible and return a
//!   bare [`model::Skeleton`].
//! - Logging: `tracing` macros (`debug!`/`info!`/`warn!`), never `println!`.
//! - Units: all vertex coordinates and radii are physical nanometers.

pub mod config;
pub mod error;
pub mod io;
pub mod model;

pub use config::TrimConfig;
pub use error::SkelError;
pub use model::Skeleton;
