// SPDX-License-Identifier: MIT
//
// Errors raised while reading color tokens.
//
// Every malformed input is surfaced to the caller. Nothing in this crate
// silently substitutes a fallback color or lets a NaN reach CSS output.

use thiserror::Error;

/// Errors that can occur while parsing or splitting a color value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// A literal that looked like a color (by prefix or shape) but could
    /// not be read: bad syntax, out-of-range channel, unparseable alpha.
    #[error("invalid color literal '{literal}': {reason}")]
    InvalidColorLiteral { literal: String, reason: String },

    /// A `family.level` reference naming a family or level that does not exist.
    #[error("unknown palette reference '{reference}'")]
    UnknownPaletteReference { reference: String },
}

impl ColorError {
    pub(crate) fn invalid(literal: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColorLiteral {
            literal: literal.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Result type for color operations.
pub type Result<T> = std::result::Result<T, ColorError>;
