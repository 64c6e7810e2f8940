//! Threshold configuration for the trim pipeline.
//!
//! Precedence (highest wins): CLI flags, then a `trim.toml` config file,
//! then compiled defaults. Loading is a pure function from
//! `(defaults, Option<file>, Option<overrides>)` to [`TrimConfig`]; invalid
//! values are rejected here, not discovered mid-pipeline.

use crate::error::{ConfigError, SkelError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default dust-removal threshold in nanometers of cable length.
pub const DEFAULT_DUST_THRESHOLD: f64 = 4000.0;
/// Default tick-removal threshold in nanometers of cable length.
pub const DEFAULT_TICK_THRESHOLD: f64 = 6000.0;

/// Resolved thresholds for a single `trim_skeleton` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimConfig {
    pub dust_threshold: f64,
    pub tick_threshold: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            dust_threshold: DEFAULT_DUST_THRESHOLD,
            tick_threshold: DEFAULT_TICK_THRESHOLD,
        }
    }
}

impl TrimConfig {
    /// Validate that both thresholds are nonnegative.
    pub fn validate(self) -> Result<Self, SkelError> {
        if self.dust_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold {
                field: "dust_threshold",
                value: self.dust_threshold,
            }
            .into());
        }
        if self.tick_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold {
                field: "tick_threshold",
                value: self.tick_threshold,
            }
            .into());
        }
        Ok(self)
    }
}

/// Raw `trim.toml` contents: a `[thresholds]` table with optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    thresholds: ThresholdOverrides,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ThresholdOverrides {
    dust_threshold: Option<f64>,
    tick_threshold: Option<f64>,
}

/// CLI-supplied overrides; both fields are optional so the caller only
/// needs to set what was actually passed on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub dust_threshold: Option<f64>,
    pub tick_threshold: Option<f64>,
}

/// Load a `trim.toml` file if it exists at `path`; returns defaults (no
/// overrides) if the file is absent.
pub fn load_file_config(path: &Path) -> Result<TrimConfig, SkelError> {
    if !path.exists() {
        return Ok(TrimConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let parsed: FileConfig = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.display().to_string(),
        source,
    })?;

    let defaults = TrimConfig::default();
    Ok(TrimConfig {
        dust_threshold: parsed.thresholds.dust_threshold.unwrap_or(defaults.dust_threshold),
        tick_threshold: parsed.thresholds.tick_threshold.unwrap_or(defaults.tick_threshold),
    })
}

/// The per-user config file location, if the platform exposes one, e.g.
/// `~/.config/skel-trim/trim.toml` on Linux. Callers fall back to this when
/// no explicit `--config` flag or repo-local `trim.toml` was found.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skel-trim").join("trim.toml"))
}

/// Merge compiled defaults, an optional file config, and CLI overrides into
/// a final, validated [`TrimConfig`].
pub fn resolve_config(
    file_config: Option<TrimConfig>,
    overrides: CliOverrides,
) -> Result<TrimConfig, SkelError> {
    let base = file_config.unwrap_or_default();
    let resolved = TrimConfig {
        dust_threshold: overrides.dust_threshold.unwrap_or(base.dust_threshold),
        tick_threshold: overrides.tick_threshold.unwrap_or(base.tick_threshold),
    };
    resolved.validate()
}
