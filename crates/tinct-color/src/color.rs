// SPDX-License-Identifier: MIT
//
// tinct color model — OKLCH-native, with HSL as a second-class citizen.
//
// Single-character variable names (r, g, b, l, c, h, s) are the standard
// mathematical convention in color science. Renaming them would make the
// code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Theme tokens arrive as HSL or OKLCH literals and leave as CSS text in
// either notation. Every conversion between the two goes through this
// module, and every derived value (ramps, lightness shifts) is computed
// in OKLCH so equal numerical steps look like equal visual steps.
//
// Conversion pipeline:
//
//   HSL ↔ sRGB ↔ Linear sRGB ↔ Oklab ↔ OKLCH
//
// Gamut mapping reduces chroma when an OKLCH value falls outside sRGB,
// which keeps hue and lightness stable for the ramp generator.

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space with alpha transparency.
///
/// ```
/// use tinct_color::color::Color;
///
/// let indigo = Color::hex("#6366f1").unwrap();
/// let (h, s, l) = indigo.to_hsl();
/// assert!((h - 238.7).abs() < 0.5);
/// assert!(s > 0.8 && l > 0.6);
///
/// let deeper = indigo.darken(0.1);
/// assert!(deeper.l < indigo.l);
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,

    /// Chroma: 0.0 (gray) to ~0.37 (most vivid inside sRGB).
    pub c: f32,

    /// Hue angle in degrees, 0.0 to 360.0.
    pub h: f32,

    /// Alpha (opacity): 0.0 to 1.0.
    pub alpha: f32,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h, alpha: 1.0 }
    }

    /// Create a color from sRGB values (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h, alpha: 1.0 }
    }

    /// Create a color from HSL values.
    ///
    /// - `h`: hue in degrees (any value, wrapped to 0–360)
    /// - `s`, `l`: saturation and lightness as fractions, 0.0 to 1.0
    #[must_use]
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        let (r, g, b) = hsl_to_srgb(normalize_hue(h), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
        Self::srgb(r, g, b)
    }

    /// Create a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn rgb24(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self::srgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Create a color from a `#RRGGBB` or `#RGB` hex string.
    ///
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        match s.len() {
            3 => {
                let v = u32::from_str_radix(s, 16).ok()?;
                let expand = |n: u32| (n & 0xf) * 0x11;
                Some(Self::rgb24(expand(v >> 8) << 16 | expand(v >> 4) << 8 | expand(v)))
            }
            6 => u32::from_str_radix(s, 16).ok().map(Self::rgb24),
            _ => None,
        }
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Whether this color is achromatic (no visible chroma).
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-4
    }

    /// Whether the color reads as light, using YIQ perceived brightness.
    ///
    /// A light color wants dark text on top of it and vice versa.
    #[must_use]
    pub fn is_light(self) -> bool {
        let (r, g, b) = self.to_srgb();
        let brightness = 0.114f32.mul_add(b, 0.299f32.mul_add(r, 0.587 * g));
        brightness >= 0.5
    }

    // ─── Perceptual Operations ───────────────────────────────────────────

    /// Increase lightness by `amount` (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            l: (self.l + amount).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Decrease lightness by `amount` (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        Self {
            l: (self.l - amount).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Shift the hue by `degrees` (wraps around 360°).
    #[inline]
    #[must_use]
    pub fn shift_hue(self, degrees: f32) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }

    /// Interpolate toward `other` in OKLCH (`t` = 0 is self, 1 is other).
    ///
    /// Hue takes the shorter way around the wheel; a gray endpoint adopts
    /// the other endpoint's hue.
    #[must_use]
    pub fn mix(self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        let h = if self.is_achromatic() {
            other.h
        } else if other.is_achromatic() {
            self.h
        } else {
            normalize_hue(hue_delta(self.h, other.h).mul_add(t, self.h))
        };
        Self {
            l: self.l.mul_add(inv, other.l * t),
            c: self.c.mul_add(inv, other.c * t),
            h,
            alpha: self.alpha.mul_add(inv, other.alpha * t),
        }
    }

    /// Perceptual distance to another color (Euclidean ΔE in Oklab).
    ///
    /// Values below ~0.02 are generally imperceptible.
    #[must_use]
    pub fn distance(self, other: &Self) -> f32 {
        let (a1, b1) = oklch_to_oklab_ab(self.c, self.h);
        let (a2, b2) = oklch_to_oklab_ab(other.c, other.h);
        let dl = self.l - other.l;
        let da = a1 - a2;
        let db = b1 - b2;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to sRGB, clamped to 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert to HSL: hue in degrees, saturation and lightness as fractions.
    #[must_use]
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let (r, g, b) = self.to_srgb();
        srgb_to_hsl(r, g, b)
    }

    /// Convert to a `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_srgb();
        format!("#{:02x}{:02x}{:02x}", to_u8(r), to_u8(g), to_u8(b))
    }

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        const EPS: f32 = 1e-4;
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        let ok = |v: f32| (-EPS..=1.0 + EPS).contains(&v);
        ok(r) && ok(g) && ok(b)
    }

    /// Reduce chroma until this color fits within the sRGB gamut.
    ///
    /// Binary search on chroma; lightness and hue are untouched.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }

        let mut lo: f32 = 0.0;
        let mut hi: f32 = self.c;

        for _ in 0..16 {
            let mid = (lo + hi) * 0.5;
            if (Self { c: mid, ..self }).in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..self }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-4;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.alpha - other.alpha).abs() < EPS
            && (self.is_achromatic() || other.is_achromatic() || hue_diff(self.h, other.h) < 1e-2)
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hue helpers ─────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Signed shortest-arc difference `to - from`, in (-180, 180].
#[inline]
#[must_use]
pub fn hue_delta(from: f32, to: f32) -> f32 {
    let d = normalize_hue(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

#[inline]
fn hue_diff(a: f32, b: f32) -> f32 {
    hue_delta(a, b).abs()
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

#[inline]
fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    let h = if c < 1e-6 {
        0.0 // achromatic, hue undefined
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// Matrices from Björn Ottosson's Oklab specification
// (https://bottosson.github.io/posts/oklab/), via the LMS cone space.

#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── HSL ↔ sRGB ─────────────────────────────────────────────────────────────

/// HSL (hue degrees, s/l fractions) → sRGB.
fn hsl_to_srgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let a = s * l.min(1.0 - l);
    let channel = |n: f32| {
        let k = (n + h / 30.0) % 12.0;
        let ramp = (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        a.mul_add(-ramp, l)
    };
    (channel(0.0), channel(8.0), channel(4.0))
}

/// sRGB → HSL (hue degrees, s/l fractions).
fn srgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) * 0.5;
    let d = max - min;

    if d < 1e-5 {
        return (0.0, 0.0, l);
    }

    let s = d / (1.0 - 2.0f32.mul_add(l, -1.0).abs());
    #[allow(clippy::float_cmp)]
    let h = if max == r {
        60.0 * (((g - b) / d) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };

    (normalize_hue(h), s.clamp(0.0, 1.0), l)
}

// ─── Composite Conversions ───────────────────────────────────────────────────

fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
