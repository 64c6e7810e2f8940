//! JSON interchange for [`Skeleton`] values and the
//! `"<segment-id>:<bbox-filename>"` fragment naming convention.
//!
//! The naming convention is observed (parsed for its segment id) but the
//! bounding-box portion is never interpreted — that belongs to the chunked
//! storage layer, which sits outside this crate's scope.

use crate::error::{IoError, SkelError};
use crate::model::Skeleton;
use std::path::Path;

/// The segment id and bbox-filename portions of a fragment filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentName {
    pub segment_id: u64,
    pub bbox_filename: String,
}

/// Parse a fragment filename of the form `"<segment-id>:<bbox-filename>"`.
pub fn parse_fragment_name(name: &str) -> Result<FragmentName, SkelError> {
    let (segment_id_str, bbox_filename) =
        name.split_once(':').ok_or_else(|| IoError::MalformedFragmentName {
            name: name.to_string(),
        })?;

    let segment_id = segment_id_str
        .parse::<u64>()
        .map_err(|_| IoError::MalformedFragmentName {
            name: name.to_string(),
        })?;

    Ok(FragmentName {
        segment_id,
        bbox_filename: bbox_filename.to_string(),
    })
}

/// Format a fragment filename from its parts.
#[must_use]
pub fn format_fragment_name(segment_id: u64, bbox_filename: &str) -> String {
    format!("{segment_id}:{bbox_filename}")
}

/// Read and deserialize a [`Skeleton`] from a JSON file.
pub fn read_skeleton(path: &Path) -> Result<Skeleton, SkelError> {
    let content = std::fs::read_to_string(path).map_err(|source| IoError::NotFound {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| {
        IoError::Json {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Serialize a [`Skeleton`] to pretty JSON and write it to `path`.
pub fn write_skeleton(path: &Path, skeleton: &Skeleton, pretty: bool) -> Result<(), SkelError> {
    let content = if pretty {
        serde_json::to_string_pretty(skeleton)
    } else {
        serde_json::to_string(skeleton)
    }
    .map_err(|source| IoError::Json {
        path: path.display().to_string(),
        source,
    })?;

    std::fs::write(path, content).map_err(|source| {
        IoError::NotFound {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}
