// SPDX-License-Identifier: MIT
//
// Color tokens — the four shapes a theme value can take.
//
//   "indigo.500"            palette reference
//   "hsl(0 0% 0% / 50%)"    HSL literal
//   "oklch(0.5 0.1 240)"    OKLCH literal
//   "currentColor"          reserved keyword
//
// The shape is decided by the text alone: a functional prefix picks the
// literal parser, a reserved word picks the keyword, anything with a dot is
// a palette reference. There is no explicit tag anywhere.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::color::Color;
use crate::error::{ColorError, Result};
use crate::literal::{ColorFormat, HslLiteral, Literal, OklchLiteral};
use crate::palette::{PaletteFamily, PaletteLevel, palette_color, parse_reference};

// ─── Keyword ─────────────────────────────────────────────────────────────────

/// Reserved CSS color words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Transparent,
    CurrentColor,
    Inherit,
    Black,
    White,
}

impl Keyword {
    pub const ALL: [Self; 5] = [
        Self::Transparent,
        Self::CurrentColor,
        Self::Inherit,
        Self::Black,
        Self::White,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transparent => "transparent",
            Self::CurrentColor => "currentColor",
            Self::Inherit => "inherit",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// CSS keywords are ASCII case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.name().eq_ignore_ascii_case(name))
    }

    /// Keywords that only make sense to the browser and are emitted verbatim.
    #[must_use]
    pub const fn is_passthrough(self) -> bool {
        matches!(self, Self::Transparent | Self::CurrentColor | Self::Inherit)
    }

    /// The simple-palette color for `black` and `white`.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Black => Some(Color::BLACK),
            Self::White => Some(Color::WHITE),
            _ => None,
        }
    }

    /// The simple-palette literal for `black` and `white` in `format`.
    #[must_use]
    pub const fn literal(self, format: ColorFormat) -> Option<Literal> {
        let black = matches!(self, Self::Black);
        if !black && !matches!(self, Self::White) {
            return None;
        }
        let lightness = if black { 0.0 } else { 1.0 };
        Some(match format {
            ColorFormat::Hsl => Literal::Hsl(HslLiteral::new(0.0, 0.0, lightness * 100.0)),
            ColorFormat::Oklch => Literal::Oklch(OklchLiteral::new(lightness, 0.0, 0.0)),
        })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── ColorToken ──────────────────────────────────────────────────────────────

/// One theme color, in whichever shape the author wrote it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorToken {
    Palette {
        family: PaletteFamily,
        level: PaletteLevel,
    },
    Hsl(HslLiteral),
    Oklch(OklchLiteral),
    Keyword(Keyword),
}

impl ColorToken {
    #[must_use]
    pub const fn palette(family: PaletteFamily, level: PaletteLevel) -> Self {
        Self::Palette { family, level }
    }

    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::Hsl(HslLiteral::new(h, s, l))
    }

    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch(OklchLiteral::new(l, c, h))
    }

    /// Whether the token is emitted verbatim (no conversion, alpha or ramp).
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        matches!(self, Self::Keyword(kw) if kw.is_passthrough())
    }

    /// The token as a color, or `None` for passthrough keywords.
    #[must_use]
    pub fn to_color(&self) -> Option<Color> {
        match self {
            Self::Palette { family, level } => Some(palette_color(*family, *level)),
            Self::Hsl(lit) => Some(lit.to_color()),
            Self::Oklch(lit) => Some(lit.to_color()),
            Self::Keyword(kw) => kw.color(),
        }
    }
}

impl From<Keyword> for ColorToken {
    fn from(kw: Keyword) -> Self {
        Self::Keyword(kw)
    }
}

impl From<Literal> for ColorToken {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Hsl(lit) => Self::Hsl(lit),
            Literal::Oklch(lit) => Self::Oklch(lit),
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette { family, level } => write!(f, "{family}.{level}"),
            Self::Hsl(lit) => lit.fmt(f),
            Self::Oklch(lit) => lit.fmt(f),
            Self::Keyword(kw) => kw.fmt(f),
        }
    }
}

impl FromStr for ColorToken {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let lower = text.to_ascii_lowercase();

        if lower.starts_with("hsl(") || lower.starts_with("hsla(") {
            return text.parse().map(Self::Hsl);
        }
        if lower.starts_with("oklch(") {
            return text.parse().map(Self::Oklch);
        }
        if let Some(kw) = Keyword::from_name(text) {
            return Ok(Self::Keyword(kw));
        }
        if text.contains('.') {
            let (family, level) = parse_reference(text)?;
            return Ok(Self::Palette { family, level });
        }
        Err(ColorError::invalid(
            s,
            "expected a palette reference, hsl(), oklch() or a color keyword",
        ))
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
