//! Typed error hierarchy for the skeleton pipeline's boundaries.
//!
//! Pure graph transforms never fail on well-formed input; only
//! configuration loading, validation, and file I/O return [`SkelError`].
//! Each variant carries a stable `E###` code and a short remediation hint
//! so callers (human or agent) can act on a failure without parsing prose.

use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Ranges:
/// - `E1xxx` — configuration
/// - `E2xxx` — skeleton validation
/// - `E3xxx` — I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadThreshold,
    MalformedConfig,
    EdgeOutOfRange,
    RadiiLengthMismatch,
    NonFiniteCoordinate,
    SelfLoopEdge,
    FileNotFound,
    MalformedJson,
    MalformedFragmentName,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadThreshold => "E1001",
            Self::MalformedConfig => "E1002",
            Self::EdgeOutOfRange => "E2001",
            Self::RadiiLengthMismatch => "E2002",
            Self::NonFiniteCoordinate => "E2003",
            Self::SelfLoopEdge => "E2004",
            Self::FileNotFound => "E3001",
            Self::MalformedJson => "E3002",
            Self::MalformedFragmentName => "E3003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Error: threshold '{field}' must be nonnegative, got {value}\nCause: thresholds are physical lengths in nanometers\nFix: pass a value >= 0.0, or omit the flag to use the default"
    )]
    NegativeThreshold { field: &'static str, value: f64 },

    #[error(
        "Error: failed to parse config file at {path}\nCause: {source}\nFix: check the [thresholds] table in trim.toml for syntax errors"
    )]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "Error: failed to read config file at {path}\nCause: {source}\nFix: verify the file exists and is readable"
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(
        "Error: edge ({a}, {b}) references vertex index out of range (0..{vertex_count})\nCause: an edge endpoint does not index into the vertex array\nFix: drop or remap the offending edge before calling trim_skeleton"
    )]
    EdgeOutOfRange {
        a: u32,
        b: u32,
        vertex_count: usize,
    },

    #[error(
        "Error: edge ({a}, {a}) is a self-loop\nCause: skeleton edges must connect two distinct vertices\nFix: remove the self-loop from the input skeleton"
    )]
    SelfLoop { a: u32 },

    #[error(
        "Error: radii length {radii_len} does not match vertex count {vertex_count}\nCause: radii must be aligned 1:1 with vertices by index\nFix: pad or truncate radii to match vertices before calling trim_skeleton"
    )]
    RadiiLengthMismatch {
        radii_len: usize,
        vertex_count: usize,
    },

    #[error(
        "Error: vertex {index} has a non-finite coordinate {axis}={value}\nCause: NaN or infinite coordinates cannot be used in distance calculations\nFix: filter or repair the offending vertex upstream"
    )]
    NonFiniteCoordinate {
        index: usize,
        axis: &'static str,
        value: f64,
    },
}

#[derive(Debug, Error)]
pub enum IoError {
    #[error(
        "Error: skeleton fragment file not found at {path}\nCause: {source}\nFix: verify the path and the '<segment-id>:<bbox-filename>' naming convention"
    )]
    NotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Error: failed to deserialize skeleton JSON from {path}\nCause: {source}\nFix: confirm the file was produced by a compatible writer"
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Error: malformed fragment filename '{name}'\nCause: expected '<segment-id>:<bbox-filename>'\nFix: rename the fragment or pass the segment id explicitly"
    )]
    MalformedFragmentName { name: String },
}

#[derive(Debug, Error)]
pub enum SkelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Io(#[from] IoError),
}

impl SkelError {
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Config(ConfigError::NegativeThreshold { .. }) => ErrorCode::BadThreshold,
            Self::Config(ConfigError::Toml { .. } | ConfigError::Io { .. }) => {
                ErrorCode::MalformedConfig
            }
            Self::Validation(ValidationError::EdgeOutOfRange { .. }) => ErrorCode::EdgeOutOfRange,
            Self::Validation(ValidationError::SelfLoop { .. }) => ErrorCode::SelfLoopEdge,
            Self::Validation(ValidationError::RadiiLengthMismatch { .. }) => {
                ErrorCode::RadiiLengthMismatch
            }
            Self::Validation(ValidationError::NonFiniteCoordinate { .. }) => {
                ErrorCode::NonFiniteCoordinate
            }
            Self::Io(IoError::NotFound { .. }) => ErrorCode::FileNotFound,
            Self::Io(IoError::Json { .. }) => ErrorCode::MalformedJson,
            Self::Io(IoError::MalformedFragmentName { .. }) => ErrorCode::MalformedFragmentName,
        }
    }

    /// A short, user-facing remediation hint extracted from the "Fix:" line.
    pub fn suggestion(&self) -> String {
        let full = self.to_string();
        full.lines()
            .find_map(|line| line.strip_prefix("Fix: "))
            .unwrap_or("no suggestion available")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_unique() {
        let codes = [
            ErrorCode::BadThreshold,
            ErrorCode::MalformedConfig,
            ErrorCode::EdgeOutOfRange,
            ErrorCode::RadiiLengthMismatch,
            ErrorCode::NonFiniteCoordinate,
            ErrorCode::SelfLoopEdge,
            ErrorCode::FileNotFound,
            ErrorCode::MalformedJson,
            ErrorCode::MalformedFragmentName,
        ];
        let mut seen = std::collections::HashSet::new();
        for code in codes {
            assert!(seen.insert(code.as_str()), "duplicate code {code}");
        }
    }

    #[test]
    fn validation_error_has_suggestion_and_code() {
        let err = SkelError::Validation(ValidationError::EdgeOutOfRange {
            a: 5,
            b: 9,
            vertex_count: 4,
        });
        assert_eq!(err.error_code().as_str(), "E2001");
        assert!(err.suggestion().contains("remap"));
    }

    #[test]
    fn config_negative_threshold_message() {
        let err = SkelError::Config(ConfigError::NegativeThreshold {
            field: "dust_threshold",
            value: -1.0,
        });
        let msg = err.to_string();
        assert!(msg.contains("dust_threshold"));
        assert!(msg.contains("Fix:"));
    }
}
