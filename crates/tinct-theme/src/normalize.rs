//! Turns one color token into one custom-property value.
//!
//! Palette references read the pre-tabulated literal for the target format.
//! Literals already in the target format come back unchanged; the others
//! are converted through `tinct_color::convert`. `transparent`,
//! `currentColor` and `inherit` pass through as written; `black` and `white`
//! come from a two-entry table.
//!
//! HSL values are bare channels (`0 0% 100% / 0.1`) and OKLCH values keep
//! their wrapper (`oklch(1 0 0 / 10%)`); see [`Literal::css_value`].

use tinct_color::{ColorFormat, ColorToken, Literal, convert, palette_literal};

/// The token as a literal in `format`, or `None` for passthrough keywords.
#[must_use]
pub fn to_literal(token: &ColorToken, format: ColorFormat) -> Option<Literal> {
    match *token {
        ColorToken::Palette { family, level } => Some(palette_literal(family, level, format)),
        ColorToken::Hsl(lit) => Some(convert(Literal::Hsl(lit), format)),
        ColorToken::Oklch(lit) => Some(convert(Literal::Oklch(lit), format)),
        ColorToken::Keyword(kw) => kw.literal(format),
    }
}

/// The custom-property value for `token` in `format`.
#[must_use]
pub fn normalize(token: &ColorToken, format: ColorFormat) -> String {
    match token {
        ColorToken::Keyword(kw) if kw.is_passthrough() => kw.name().to_owned(),
        _ => to_literal(token, format).map_or_else(|| token.to_string(), |lit| lit.css_value()),
    }
}
