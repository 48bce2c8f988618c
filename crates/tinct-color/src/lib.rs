// SPDX-License-Identifier: MIT
//
// tinct-color — the color capability behind tinct's theme core.
//
// Everything a theme needs to know about a single color lives here:
// OKLCH-native math, the HSL and OKLCH functional notations, the Tailwind
// palette as a lookup table, tonal ramps grown from one seed, and the token
// grammar that tells those shapes apart. The theme core treats this crate
// as a black box with a narrow surface:
//
//   convert(literal, format)     → literal in the other notation
//   Color::is_light              → YIQ brightness test
//   Color::lighten / darken      → lightness shifts
//   generate_ramp(seed, format)  → 50..950 tonal scale

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod color;
pub mod error;
pub mod literal;
pub mod palette;
pub mod ramp;
pub mod token;

pub use color::Color;
pub use error::{ColorError, Result};
pub use literal::{Alpha, ColorFormat, HslLiteral, Literal, OklchLiteral, convert};
pub use palette::{PaletteFamily, PaletteLevel, palette_color, palette_literal};
pub use ramp::{Ramp, generate_ramp};
pub use token::{ColorToken, Keyword};
