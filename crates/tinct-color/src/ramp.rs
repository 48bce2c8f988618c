// SPDX-License-Identifier: MIT
//
// Tonal ramps — 11 steps (50 → 950) grown from a single seed color.
//
// The generator anchors the seed to the perceptually nearest palette entry
// and borrows that family's lightness curve. The seed's offsets from the
// anchor are then transferred onto every step:
//
//   hue       → shifted by the same angle at every step
//   chroma    → scaled by the same ratio (additive when the anchor is gray)
//   lightness → offset fades linearly with distance from the anchor step
//
// The anchor step reproduces the seed exactly; the ends of the ramp stay
// close to the family's own extremes so 50 is always near-white and 950
// near-black. Every step is gamut-mapped before projection.

use crate::color::{Color, hue_delta, normalize_hue};
use crate::literal::{ColorFormat, Literal};
use crate::palette::{PaletteFamily, PaletteLevel, palette_color};

/// An 11-step tonal scale in one output format.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    steps: [(PaletteLevel, Literal); 11],
}

impl Ramp {
    /// Steps from lightest (50) to darkest (950).
    pub fn iter(&self) -> impl Iterator<Item = (PaletteLevel, &Literal)> {
        self.steps.iter().map(|(level, lit)| (*level, lit))
    }

    /// The literal at one level.
    #[must_use]
    pub fn get(&self, level: PaletteLevel) -> &Literal {
        &self.steps[level.index()].1
    }
}

/// The palette entry perceptually closest to `color`.
#[must_use]
pub fn nearest_palette_entry(color: Color) -> (PaletteFamily, PaletteLevel) {
    let mut best = (PaletteFamily::Slate, PaletteLevel::L500);
    let mut best_distance = f32::INFINITY;
    for family in PaletteFamily::ALL {
        for level in PaletteLevel::ALL {
            let d = color.distance(&palette_color(family, level));
            if d < best_distance {
                best_distance = d;
                best = (family, level);
            }
        }
    }
    best
}

/// Generate the 11-step ramp seeded by `seed`, projected into `format`.
#[must_use]
pub fn generate_ramp(seed: Color, format: ColorFormat) -> Ramp {
    let seed = Color { alpha: 1.0, ..seed };
    let (family, anchor_level) = nearest_palette_entry(seed);
    let anchor = palette_color(family, anchor_level);
    let anchor_index = anchor_level.index();

    let dl = seed.l - anchor.l;
    let dh = if seed.is_achromatic() || anchor.is_achromatic() {
        0.0
    } else {
        hue_delta(anchor.h, seed.h)
    };
    let chroma_ratio = (!anchor.is_achromatic()).then(|| seed.c / anchor.c);

    let steps = PaletteLevel::ALL.map(|level| {
        let color = if level == anchor_level {
            seed
        } else {
            let base = palette_color(family, level);
            #[allow(clippy::cast_precision_loss)]
            let fade = 1.0 - level.index().abs_diff(anchor_index) as f32 / 10.0;
            let c = chroma_ratio.map_or(base.c + (seed.c - anchor.c), |ratio| base.c * ratio);
            let h = if seed.is_achromatic() { base.h } else { base.h + dh };
            Color::oklch(dl.mul_add(fade, base.l).clamp(0.0, 1.0), c.max(0.0), normalize_hue(h)).to_gamut()
        };
        (level, Literal::from_color(color, format, None))
    });

    Ramp { steps }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lightness(ramp: &Ramp) -> Vec<f32> {
        ramp.iter().map(|(_, lit)| lit.to_color().l).collect()
    }

    #[test]
    fn palette_colors_anchor_to_themselves() {
        let seed = palette_color(PaletteFamily::Emerald, PaletteLevel::L600);
        assert_eq!(nearest_palette_entry(seed), (PaletteFamily::Emerald, PaletteLevel::L600));
    }

    #[test]
    fn ramp_of_palette_color_reproduces_family() {
        let seed = palette_color(PaletteFamily::Indigo, PaletteLevel::L500);
        let ramp = generate_ramp(seed, ColorFormat::Oklch);
        for (level, lit) in ramp.iter() {
            let expected = palette_color(PaletteFamily::Indigo, level);
            assert!(
                lit.to_color().distance(&expected) < 0.01,
                "indigo-{level} drifted: {lit}"
            );
        }
    }

    #[test]
    fn ramp_has_eleven_steps_light_to_dark() {
        let seed = Color::hsl(12.0, 0.8, 0.55);
        let ramp = generate_ramp(seed, ColorFormat::Hsl);
        let levels: Vec<u16> = ramp.iter().map(|(level, _)| level.value()).collect();
        assert_eq!(levels, vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]);
        let ls = lightness(&ramp);
        assert!(ls.windows(2).all(|w| w[0] >= w[1]), "not monotonic: {ls:?}");
    }

    #[test]
    fn seed_appears_at_anchor_step() {
        let seed = Color::hsl(200.0, 0.7, 0.45);
        let (_, anchor) = nearest_palette_entry(seed);
        let ramp = generate_ramp(seed, ColorFormat::Oklch);
        assert!(ramp.get(anchor).to_color().distance(&seed) < 0.005);
    }

    #[test]
    fn gray_seed_gives_gray_ramp() {
        let ramp = generate_ramp(Color::hsl(0.0, 0.0, 0.5), ColorFormat::Oklch);
        for (_, lit) in ramp.iter() {
            assert!(lit.to_color().c < 0.03, "unexpected chroma in {lit}");
        }
    }

    #[test]
    fn hsl_ramp_values_are_bare_channels() {
        let ramp = generate_ramp(Color::hsl(221.2, 0.832, 0.533), ColorFormat::Hsl);
        for (_, lit) in ramp.iter() {
            let value = lit.css_value();
            assert!(!value.starts_with("hsl("), "{value}");
            assert_eq!(value.split_whitespace().count(), 3, "{value}");
        }
    }

    #[test]
    fn ramp_ends_stay_light_and_dark() {
        let ramp = generate_ramp(Color::hsl(340.0, 0.9, 0.6), ColorFormat::Oklch);
        assert!(ramp.get(PaletteLevel::L50).to_color().is_light());
        assert!(!ramp.get(PaletteLevel::L950).to_color().is_light());
    }
}
