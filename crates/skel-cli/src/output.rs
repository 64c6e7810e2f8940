//! Output rendering: every subcommand produces a [`Renderable`] value and
//! lets this module decide how it reaches the terminal, so `--json` is a
//! flag on the top-level `Cli`, not a duplicated branch in every command.

use serde::Serialize;
use std::fmt;

/// How a command's result should be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable, one fact per line.
    Text,
    /// Pretty-printed JSON, for piping into another tool.
    Json,
}

impl OutputMode {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// A command result that knows how to print itself in [`OutputMode::Text`].
/// JSON rendering is handled uniformly via `Serialize`.
pub trait Renderable: Serialize {
    fn render_text(&self) -> String;
}

/// Render `value` according to `mode` and print it to stdout.
///
/// # Errors
/// Returns an error if JSON serialization fails, which only happens for a
/// type with a broken `Serialize` impl (e.g. a `NaN` float, which this
/// crate's types never produce after [`skel_core::model::Skeleton::validate`]).
pub fn render<T: Renderable>(mode: OutputMode, value: &T) -> Result<(), RenderError> {
    match mode {
        OutputMode::Text => {
            println!("{}", value.render_text());
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
    }
    Ok(())
}

#[derive(Debug)]
pub struct RenderError(serde_json::Error);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to render output as JSON: {}", self.0)
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(source: serde_json::Error) -> Self {
        Self(source)
    }
}
