//! Theme errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use tinct_color::ColorError;

use crate::schema::{GroupKind, Mode, TokenKey};

/// Errors surfaced by resolution, emission, configuration and mounting.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("unknown {group} preset '{key}'")]
    UnknownPresetKey { group: GroupKind, key: String },

    #[error("unknown theme token '{name}'")]
    UnknownToken { name: String },

    /// A hand-built table handed to the emitter without every schema key.
    #[error("{mode} table has no value for '{key}'")]
    MissingToken { mode: Mode, key: TokenKey },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ThemeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;
