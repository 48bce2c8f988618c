// SPDX-License-Identifier: MIT
//
// Functional-notation color literals: `hsl(...)` and `oklch(...)`.
//
// A literal keeps the numbers the caller wrote (including whether alpha was
// a plain number or a percentage) so that a value requested in its own
// format comes back out the way it went in. Only a cross-format request
// goes through the `Color` pipeline, and only then are channels rounded:
//
//   HSL   → one decimal per channel   ("221.2 83.2% 53.3%")
//   OKLCH → three decimals per channel ("oklch(0.585 0.233 277.117)")
//
// HSL is emitted bare ("H S% L%") because consumers recombine it inside
// `hsl(var(--x))`. OKLCH keeps its wrapper because consumers use the
// custom property as a whole color value.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::color::{Color, normalize_hue};
use crate::error::{ColorError, Result};

// ─── ColorFormat ─────────────────────────────────────────────────────────────

/// Output notation for emitted color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// Bare HSL channels, e.g. `0 0% 100% / 0.1`.
    #[default]
    Hsl,
    /// Full OKLCH notation, e.g. `oklch(0.985 0 0 / 10%)`.
    Oklch,
}

impl ColorFormat {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hsl => "hsl",
            Self::Oklch => "oklch",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hsl" => Ok(Self::Hsl),
            "oklch" => Ok(Self::Oklch),
            _ => Err(ColorError::invalid(s, "expected color format 'hsl' or 'oklch'")),
        }
    }
}

// ─── Alpha ───────────────────────────────────────────────────────────────────

/// The optional `/ A` segment of a literal, in the form it was written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alpha {
    /// `/ 0.1`
    Number(f32),
    /// `/ 10%`
    Percent(f32),
}

impl Alpha {
    /// Opacity as a fraction in 0.0–1.0.
    #[must_use]
    pub fn value(self) -> f32 {
        match self {
            Self::Number(v) => v,
            Self::Percent(p) => p / 100.0,
        }
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Number(v) => f.write_str(&fmt_num(v, 3)),
            Self::Percent(p) => write!(f, "{}%", fmt_num(p, 3)),
        }
    }
}

// ─── HslLiteral ──────────────────────────────────────────────────────────────

/// `hsl(H S% L%)`: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslLiteral {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub alpha: Option<Alpha>,
}

impl HslLiteral {
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l, alpha: None }
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: Alpha) -> Self {
        Self {
            alpha: Some(alpha),
            ..self
        }
    }

    /// Channel text without the `hsl(...)` wrapper: `H S% L%` or `H S% L% / A`.
    #[must_use]
    pub fn channels(&self) -> String {
        let mut out = format!("{} {}% {}%", fmt_num(self.h, 3), fmt_num(self.s, 3), fmt_num(self.l, 3));
        if let Some(alpha) = self.alpha {
            out.push_str(" / ");
            out.push_str(&alpha.to_string());
        }
        out
    }

    #[must_use]
    pub fn to_color(&self) -> Color {
        Color::hsl(self.h, self.s / 100.0, self.l / 100.0)
    }

    /// Project a color into HSL, rounding each channel to one decimal.
    #[must_use]
    pub fn from_color(color: Color, alpha: Option<Alpha>) -> Self {
        let (h, s, l) = color.to_hsl();
        let s = round_to(s * 100.0, 1);
        let h = if s == 0.0 { 0.0 } else { normalize_hue(round_to(h, 1)) };
        Self {
            h,
            s,
            l: round_to(l * 100.0, 1),
            alpha,
        }
    }
}

impl fmt::Display for HslLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({})", self.channels())
    }
}

impl FromStr for HslLiteral {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = HSL_RE
            .captures(s.trim())
            .ok_or_else(|| ColorError::invalid(s, "expected hsl(H S% L%) with optional / alpha"))?;

        let h = number(s, &caps, 1)?;
        let sat = number(s, &caps, 2)?;
        let l = number(s, &caps, 3)?;
        if !(0.0..=100.0).contains(&sat) {
            return Err(ColorError::invalid(s, "saturation must be within 0%–100%"));
        }
        if !(0.0..=100.0).contains(&l) {
            return Err(ColorError::invalid(s, "lightness must be within 0%–100%"));
        }

        Ok(Self {
            h,
            s: sat,
            l,
            alpha: alpha(s, &caps, 4, 5)?,
        })
    }
}

// ─── OklchLiteral ────────────────────────────────────────────────────────────

/// `oklch(L C H)`: lightness as a fraction, chroma, hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OklchLiteral {
    pub l: f32,
    pub c: f32,
    pub h: f32,
    pub alpha: Option<Alpha>,
}

impl OklchLiteral {
    #[must_use]
    pub const fn new(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h, alpha: None }
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: Alpha) -> Self {
        Self {
            alpha: Some(alpha),
            ..self
        }
    }

    #[must_use]
    pub const fn to_color(&self) -> Color {
        Color::oklch(self.l, self.c, self.h)
    }

    /// Project a color into OKLCH, rounding each channel to three decimals.
    #[must_use]
    pub fn from_color(color: Color, alpha: Option<Alpha>) -> Self {
        let c = round_to(color.c, 3);
        let h = if c == 0.0 { 0.0 } else { normalize_hue(round_to(color.h, 3)) };
        Self {
            l: round_to(color.l, 3),
            c,
            h,
            alpha,
        }
    }
}

impl fmt::Display for OklchLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({} {} {}", fmt_num(self.l, 3), fmt_num(self.c, 3), fmt_num(self.h, 3))?;
        if let Some(alpha) = self.alpha {
            write!(f, " / {alpha}")?;
        }
        f.write_str(")")
    }
}

impl FromStr for OklchLiteral {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = OKLCH_RE
            .captures(s.trim())
            .ok_or_else(|| ColorError::invalid(s, "expected oklch(L C H) with optional / alpha"))?;

        let mut l = number(s, &caps, 1)?;
        if caps.get(2).is_some() {
            l /= 100.0;
        }
        if !(0.0..=1.0).contains(&l) {
            return Err(ColorError::invalid(s, "lightness must be within 0–1 (or 0%–100%)"));
        }
        let c = number(s, &caps, 3)?;
        if c < 0.0 {
            return Err(ColorError::invalid(s, "chroma must not be negative"));
        }

        Ok(Self {
            l,
            c,
            h: number(s, &caps, 4)?,
            alpha: alpha(s, &caps, 5, 6)?,
        })
    }
}

// ─── Literal ─────────────────────────────────────────────────────────────────

/// Either functional notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Hsl(HslLiteral),
    Oklch(OklchLiteral),
}

impl Literal {
    #[must_use]
    pub const fn format(&self) -> ColorFormat {
        match self {
            Self::Hsl(_) => ColorFormat::Hsl,
            Self::Oklch(_) => ColorFormat::Oklch,
        }
    }

    #[must_use]
    pub const fn alpha(&self) -> Option<Alpha> {
        match self {
            Self::Hsl(lit) => lit.alpha,
            Self::Oklch(lit) => lit.alpha,
        }
    }

    #[must_use]
    pub fn to_color(&self) -> Color {
        match self {
            Self::Hsl(lit) => lit.to_color(),
            Self::Oklch(lit) => lit.to_color(),
        }
    }

    /// Build a literal of the given format from a color.
    #[must_use]
    pub fn from_color(color: Color, format: ColorFormat, alpha: Option<Alpha>) -> Self {
        match format {
            ColorFormat::Hsl => Self::Hsl(HslLiteral::from_color(color, alpha)),
            ColorFormat::Oklch => Self::Oklch(OklchLiteral::from_color(color, alpha)),
        }
    }

    /// The custom-property value: bare channels for HSL, full notation for OKLCH.
    #[must_use]
    pub fn css_value(&self) -> String {
        match self {
            Self::Hsl(lit) => lit.channels(),
            Self::Oklch(lit) => lit.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hsl(lit) => lit.fmt(f),
            Self::Oklch(lit) => lit.fmt(f),
        }
    }
}

/// Convert a literal into the target format.
///
/// Same-format requests return the literal untouched. Cross-format requests
/// go through OKLCH math; the alpha segment is carried over verbatim.
#[must_use]
pub fn convert(literal: Literal, format: ColorFormat) -> Literal {
    if literal.format() == format {
        return literal;
    }
    Literal::from_color(literal.to_color(), format, literal.alpha())
}

// ─── Parsing helpers ─────────────────────────────────────────────────────────

const NUM: &str = r"[+-]?(?:\d+(?:\.\d*)?|\.\d+)";

static HSL_RE: Lazy<Regex> = Lazy::new(|| {
    let sep = r"(?:\s*,\s*|\s+)";
    Regex::new(&format!(
        r"(?i)^hsla?\(\s*({NUM})(?:deg)?{sep}({NUM})%{sep}({NUM})%\s*(?:[/,]\s*({NUM})(%)?\s*)?\)$"
    ))
    .expect("hsl literal pattern is valid")
});

static OKLCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^oklch\(\s*({NUM})(%)?\s+({NUM})\s+({NUM})(?:deg)?\s*(?:/\s*({NUM})(%)?\s*)?\)$"
    ))
    .expect("oklch literal pattern is valid")
});

fn number(literal: &str, caps: &Captures<'_>, group: usize) -> Result<f32> {
    let text = caps.get(group).map_or("", |m| m.as_str());
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorError::invalid(literal, format!("'{text}' is not a number")))
}

fn alpha(literal: &str, caps: &Captures<'_>, value: usize, percent: usize) -> Result<Option<Alpha>> {
    if caps.get(value).is_none() {
        return Ok(None);
    }
    let v = number(literal, caps, value)?;
    if caps.get(percent).is_some() {
        if !(0.0..=100.0).contains(&v) {
            return Err(ColorError::invalid(literal, "alpha must be within 0%–100%"));
        }
        Ok(Some(Alpha::Percent(v)))
    } else {
        if !(0.0..=1.0).contains(&v) {
            return Err(ColorError::invalid(literal, "alpha must be within 0–1"));
        }
        Ok(Some(Alpha::Number(v)))
    }
}

/// Round to a fixed number of decimals.
#[must_use]
pub fn round_to(v: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (v * scale).round() / scale
}

/// Format a number with at most `decimals` places, trimming trailing zeros.
#[must_use]
pub fn fmt_num(v: f32, decimals: usize) -> String {
    let text = format!("{v:.decimals$}");
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if trimmed == "-0" { "0".to_owned() } else { trimmed.to_owned() }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Number formatting ────────────────────────────────────────────────

    #[test]
    fn fmt_num_trims_zeros() {
        assert_eq!(fmt_num(100.0, 3), "100");
        assert_eq!(fmt_num(5.9, 3), "5.9");
        assert_eq!(fmt_num(0.125, 3), "0.125");
        assert_eq!(fmt_num(-0.0001, 3), "0");
        assert_eq!(fmt_num(277.117, 3), "277.117");
    }

    // ── HSL parsing ──────────────────────────────────────────────────────

    #[test]
    fn parses_space_separated_hsl() {
        let lit: HslLiteral = "hsl(240 5.9% 10%)".parse().unwrap();
        assert_eq!(lit, HslLiteral::new(240.0, 5.9, 10.0));
        assert_eq!(lit.to_string(), "hsl(240 5.9% 10%)");
        assert_eq!(lit.channels(), "240 5.9% 10%");
    }

    #[test]
    fn parses_hsl_with_alpha_forms() {
        let pct: HslLiteral = "hsl(0 0% 0% / 50%)".parse().unwrap();
        assert_eq!(pct.alpha, Some(Alpha::Percent(50.0)));
        assert_eq!(pct.channels(), "0 0% 0% / 50%");

        let num: HslLiteral = "hsl(0 0% 100% / 0.1)".parse().unwrap();
        assert_eq!(num.alpha, Some(Alpha::Number(0.1)));
        assert_eq!(num.channels(), "0 0% 100% / 0.1");
    }

    #[test]
    fn parses_legacy_comma_hsla() {
        let lit: HslLiteral = "hsla(210deg, 40%, 96.1%, 0.5)".parse().unwrap();
        assert_eq!(lit.channels(), "210 40% 96.1% / 0.5");
    }

    #[test]
    fn rejects_bad_hsl() {
        assert!("hsl(240 5.9 10%)".parse::<HslLiteral>().is_err());
        assert!("hsl(240 120% 10%)".parse::<HslLiteral>().is_err());
        assert!("hsl(240 50% 10% / 2)".parse::<HslLiteral>().is_err());
        assert!("hsl(240 50% 10% / abc)".parse::<HslLiteral>().is_err());
        assert!("rgb(1 2 3)".parse::<HslLiteral>().is_err());
    }

    // ── OKLCH parsing ────────────────────────────────────────────────────

    #[test]
    fn parses_oklch_fraction_and_percent_lightness() {
        let frac: OklchLiteral = "oklch(0.585 0.233 277.117)".parse().unwrap();
        let pct: OklchLiteral = "oklch(58.5% 0.233 277.117)".parse().unwrap();
        assert_eq!(frac.to_string(), "oklch(0.585 0.233 277.117)");
        assert_eq!(pct.to_string(), "oklch(0.585 0.233 277.117)");
    }

    #[test]
    fn parses_oklch_alpha() {
        let lit: OklchLiteral = "oklch(1 0 0 / 10%)".parse().unwrap();
        assert_eq!(lit.alpha, Some(Alpha::Percent(10.0)));
        assert_eq!(lit.to_string(), "oklch(1 0 0 / 10%)");
    }

    #[test]
    fn rejects_bad_oklch() {
        assert!("oklch(1.5 0 0)".parse::<OklchLiteral>().is_err());
        assert!("oklch(0.5 -0.1 0)".parse::<OklchLiteral>().is_err());
        assert!("oklch(0.5, 0.1, 20)".parse::<OklchLiteral>().is_err());
    }

    // ── Conversion ───────────────────────────────────────────────────────

    #[test]
    fn same_format_is_untouched() {
        let lit = Literal::Hsl("hsl(221.23 83.21% 53.33%)".parse().unwrap());
        assert_eq!(convert(lit, ColorFormat::Hsl), lit);
    }

    #[test]
    fn hsl_to_oklch_and_back_is_perceptually_equal() {
        let original = Literal::Hsl("hsl(221.2 83.2% 53.3%)".parse().unwrap());
        let oklch = convert(original, ColorFormat::Oklch);
        assert_eq!(oklch.format(), ColorFormat::Oklch);
        let back = convert(oklch, ColorFormat::Hsl);
        assert!(original.to_color().distance(&back.to_color()) < 0.01);
    }

    #[test]
    fn conversion_carries_alpha_verbatim() {
        let lit = Literal::Hsl("hsl(0 0% 100% / 15%)".parse().unwrap());
        let converted = convert(lit, ColorFormat::Oklch);
        assert_eq!(converted.css_value(), "oklch(1 0 0 / 15%)");
    }

    #[test]
    fn white_projects_cleanly() {
        assert_eq!(Literal::from_color(Color::WHITE, ColorFormat::Hsl, None).css_value(), "0 0% 100%");
        assert_eq!(Literal::from_color(Color::BLACK, ColorFormat::Oklch, None).css_value(), "oklch(0 0 0)");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("OKLCH".parse::<ColorFormat>().unwrap(), ColorFormat::Oklch);
        assert!("rgb".parse::<ColorFormat>().is_err());
    }
}
