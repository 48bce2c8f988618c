//! CSS variable emitter — a resolved table becomes declaration blocks.
//!
//! Per mode, every schema key is normalized in schema order. Alpha-bearing
//! keys in HSL output are split into a solid color and a numeric alpha
//! property. Rampable keys then contribute eleven `--{key}-{level}` steps
//! each. The output is three blocks separated by one blank line:
//!
//! ```text
//! :root {
//! --radius: 0.625rem;
//! }
//!
//! :root {
//! --background: 0 0% 100%;
//! ...
//! }
//!
//! .dark {
//! --background: 240 10% 3.9%;
//! ...
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tinct_color::literal::fmt_num;
use tinct_color::{ColorError, ColorFormat, generate_ramp};
use tracing::{debug, trace};

use crate::error::{Result, ThemeError};
use crate::normalize::{normalize, to_literal};
use crate::resolve::ThemeTable;
use crate::schema::{Mode, TokenFlags, TokenKey};

/// Radius used when none is configured.
pub const DEFAULT_RADIUS: &str = "0.625rem";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Selector for the light block and the radius block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StyleTarget {
    #[default]
    #[serde(rename = ":root")]
    Root,
    #[serde(rename = "html")]
    Html,
}

impl StyleTarget {
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Root => ":root",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// How the dark block is activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DarkSelector {
    /// `.dark { ... }`
    #[default]
    Class,
    /// `@media (prefers-color-scheme: dark) { <target> { ... } }`
    Media,
    /// Any selector the caller names, used verbatim.
    Custom(String),
}

impl DarkSelector {
    /// `class` and `media` are reserved; anything else is a custom selector.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "class" => Self::Class,
            "media" => Self::Media,
            other => Self::Custom(other.to_owned()),
        }
    }

    fn wrap(&self, target: StyleTarget, declarations: &str) -> String {
        match self {
            Self::Class => block(".dark", declarations),
            Self::Media => format!(
                "@media (prefers-color-scheme: dark) {{\n{}\n}}",
                block(target.selector(), declarations)
            ),
            Self::Custom(selector) => block(selector, declarations),
        }
    }
}

impl fmt::Display for DarkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Media => f.write_str("media"),
            Self::Custom(selector) => f.write_str(selector),
        }
    }
}

impl Serialize for DarkSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DarkSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(|text| Self::parse(&text))
    }
}

/// Everything the emitter needs besides the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterOptions {
    pub format: ColorFormat,
    pub style_target: StyleTarget,
    pub dark_selector: DarkSelector,
    pub radius: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            format: ColorFormat::default(),
            style_target: StyleTarget::default(),
            dark_selector: DarkSelector::default(),
            radius: DEFAULT_RADIUS.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Emission
// ---------------------------------------------------------------------------

fn block(selector: &str, declarations: &str) -> String {
    format!("{selector} {{\n{declarations}}}")
}

fn declare(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(";\n");
}

/// Split `H S% L% / A` into the solid channels and a numeric alpha.
///
/// No `/` segment means alpha 1. A percent alpha is divided by 100.
///
/// # Errors
///
/// [`ColorError::InvalidColorLiteral`] when the alpha segment is not a
/// finite number.
pub fn split_alpha(value: &str) -> Result<(&str, f32)> {
    let (color, alpha_text) = value.split_once('/').unwrap_or((value, "1"));
    let alpha_text = alpha_text.trim();
    let (number, percent) = alpha_text
        .strip_suffix('%')
        .map_or((alpha_text, false), |n| (n.trim_end(), true));

    let alpha = number
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorError::InvalidColorLiteral {
            literal: value.to_owned(),
            reason: format!("alpha '{alpha_text}' is not a number"),
        })?;

    Ok((color.trim(), if percent { alpha / 100.0 } else { alpha }))
}

fn declarations(table: &ThemeTable, mode: Mode, format: ColorFormat) -> Result<String> {
    let mut out = String::new();
    let lookup = |key: TokenKey| table.get(mode, key).ok_or(ThemeError::MissingToken { mode, key });

    for key in TokenKey::all() {
        let token = lookup(key)?;
        let value = normalize(token, format);
        let split = format == ColorFormat::Hsl
            && key.flags().contains(TokenFlags::ALPHA)
            && !token.is_passthrough();

        match key.alpha_css_name().filter(|_| split) {
            Some(alpha_name) => {
                let (solid, alpha) = split_alpha(&value)?;
                declare(&mut out, key.css_name(), solid);
                declare(&mut out, alpha_name, &fmt_num(alpha, 3));
            }
            None => declare(&mut out, key.css_name(), &value),
        }
    }

    for key in TokenKey::all().filter(|key| key.flags().contains(TokenFlags::RAMP)) {
        let token = lookup(key)?;
        let Some(seed) = to_literal(token, format).map(|lit| lit.to_color()) else {
            debug!(%mode, token = %key, value = %token, "keyword seed; no ramp");
            continue;
        };
        for (level, lit) in generate_ramp(seed, format).iter() {
            declare(&mut out, &format!("{}-{level}", key.css_name()), &lit.css_value());
        }
    }

    trace!(%mode, %format, lines = out.lines().count(), "emitted declarations");
    Ok(out)
}

/// The light and dark color blocks, separated by a blank line.
///
/// # Errors
///
/// [`ThemeError::MissingToken`] for a table that is not total, and
/// [`ColorError::InvalidColorLiteral`] for an unreadable alpha segment.
pub fn emit_colors(table: &ThemeTable, options: &EmitterOptions) -> Result<String> {
    let light = block(
        options.style_target.selector(),
        &declarations(table, Mode::Light, options.format)?,
    );
    let dark = options
        .dark_selector
        .wrap(options.style_target, &declarations(table, Mode::Dark, options.format)?);
    Ok(format!("{light}\n\n{dark}"))
}

/// The single-declaration radius block.
#[must_use]
pub fn emit_radius(radius: &str, target: StyleTarget) -> String {
    let mut out = String::new();
    declare(&mut out, "--radius", radius);
    block(target.selector(), &out)
}

/// Radius block, blank line, light block, blank line, dark block.
///
/// # Errors
///
/// See [`emit_colors`].
pub fn emit(table: &ThemeTable, options: &EmitterOptions) -> Result<String> {
    Ok(format!(
        "{}\n\n{}",
        emit_radius(&options.radius, options.style_target),
        emit_colors(table, options)?
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{BaseKey, FeedbackKey, SidebarKey};
    use crate::resolve::{PresetSelection, resolve};
    use pretty_assertions::assert_eq;
    use tinct_color::{ColorToken, PaletteFamily};

    fn table() -> ThemeTable {
        resolve(&PresetSelection::builtin(
            BaseKey::Slate,
            PaletteFamily::Indigo,
            FeedbackKey::Classic,
            SidebarKey::Extended,
        ))
    }

    fn with(mut table: ThemeTable, mode: Mode, key: TokenKey, text: &str) -> ThemeTable {
        let token: ColorToken = text.parse().unwrap();
        match mode {
            Mode::Light => table.light.insert(key, token),
            Mode::Dark => table.dark.insert(key, token),
        };
        table
    }

    fn hsl() -> EmitterOptions {
        EmitterOptions::default()
    }

    fn oklch() -> EmitterOptions {
        EmitterOptions {
            format: ColorFormat::Oklch,
            ..EmitterOptions::default()
        }
    }

    fn line<'a>(css: &'a str, name: &str) -> Option<&'a str> {
        let prefix = format!("{name}: ");
        css.lines()
            .find_map(|l| l.strip_prefix(prefix.as_str()))
            .and_then(|v| v.strip_suffix(';'))
    }

    #[test]
    fn split_alpha_cases() {
        assert_eq!(split_alpha("0 0% 0% / 50%").unwrap(), ("0 0% 0%", 0.5));
        assert_eq!(split_alpha("0 0% 100% / 0.1").unwrap(), ("0 0% 100%", 0.1));
        assert_eq!(split_alpha("240 5.9% 90%").unwrap(), ("240 5.9% 90%", 1.0));
        assert!(matches!(
            split_alpha("0 0% 0% / half"),
            Err(ThemeError::Color(ColorError::InvalidColorLiteral { .. }))
        ));
    }

    #[test]
    fn border_alpha_is_extracted() {
        let table = with(table(), Mode::Light, TokenKey::Border, "hsl(0 0% 0% / 50%)");
        let css = emit_colors(&table, &hsl()).unwrap();
        assert_eq!(line(&css, "--border"), Some("0 0% 0%"));
        assert_eq!(line(&css, "--border-alpha"), Some("0.5"));
    }

    #[test]
    fn alpha_defaults_to_one() {
        let table = with(table(), Mode::Light, TokenKey::Input, "hsl(240 5.9% 90%)");
        let css = emit_colors(&table, &hsl()).unwrap();
        assert_eq!(line(&css, "--input"), Some("240 5.9% 90%"));
        assert_eq!(line(&css, "--input-alpha"), Some("1"));
    }

    #[test]
    fn every_alpha_key_gets_an_alpha_property_per_mode() {
        let css = emit_colors(&table(), &hsl()).unwrap();
        for name in ["--border-alpha", "--input-alpha", "--sidebar-border-alpha"] {
            assert_eq!(css.matches(&format!("\n{name}: ")).count(), 2, "{name}");
        }
        // Dark borders are translucent white.
        let dark = css.split("\n\n").nth(1).unwrap();
        assert_eq!(line(dark, "--border"), Some("0 0% 100%"));
        assert_eq!(line(dark, "--border-alpha"), Some("0.1"));
    }

    #[test]
    fn oklch_keeps_alpha_inline() {
        let table = with(table(), Mode::Light, TokenKey::Border, "oklch(0 0 0 / 50%)");
        let css = emit_colors(&table, &oklch()).unwrap();
        assert_eq!(line(&css, "--border"), Some("oklch(0 0 0 / 50%)"));
        assert_eq!(line(&css, "--border-alpha"), None);
    }

    #[test]
    fn passthrough_keywords_bypass_alpha_and_ramps() {
        let table = with(table(), Mode::Light, TokenKey::Border, "transparent");
        let table = with(table, Mode::Light, TokenKey::Primary, "currentColor");
        let css = emit_colors(&table, &hsl()).unwrap();
        let light = css.split("\n\n").next().unwrap();
        assert_eq!(line(light, "--border"), Some("transparent"));
        assert_eq!(line(light, "--border-alpha"), None);
        assert_eq!(line(light, "--primary"), Some("currentColor"));
        assert_eq!(line(light, "--primary-500"), None);
        assert!(line(light, "--destructive-500").is_some());
    }

    #[test]
    fn ramps_cover_six_keys_by_eleven_steps() {
        let css = emit_colors(&table(), &hsl()).unwrap();
        let light = css.split("\n\n").next().unwrap();
        for key in ["primary", "destructive", "success", "warning", "info", "carbon"] {
            for level in [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950] {
                assert!(line(light, &format!("--{key}-{level}")).is_some(), "--{key}-{level}");
            }
        }
        // 40 tokens + 3 alpha + 66 ramp steps, plus the selector and brace.
        assert_eq!(light.lines().count(), 40 + 3 + 66 + 2);
    }

    #[test]
    fn dark_selector_variants() {
        let t = table();
        let class = emit_colors(&t, &hsl()).unwrap();
        assert!(class.contains("\n\n.dark {\n--background: "));

        let media = EmitterOptions {
            dark_selector: DarkSelector::Media,
            ..hsl()
        };
        let css = emit_colors(&t, &media).unwrap();
        assert!(css.contains("\n\n@media (prefers-color-scheme: dark) {\n:root {\n--background: "));
        assert!(css.ends_with("}\n}"));

        let custom = EmitterOptions {
            dark_selector: DarkSelector::parse("[data-theme=\"dark\"]"),
            style_target: StyleTarget::Html,
            ..hsl()
        };
        let css = emit_colors(&t, &custom).unwrap();
        assert!(css.starts_with("html {\n--background: 0 0% 100%;\n"));
        assert!(css.contains("\n\n[data-theme=\"dark\"] {\n"));
    }

    #[test]
    fn radius_block_is_exact() {
        assert_eq!(emit_radius("0.625rem", StyleTarget::Root), ":root {\n--radius: 0.625rem;\n}");
        assert_eq!(emit_radius("4px", StyleTarget::Html), "html {\n--radius: 4px;\n}");
    }

    #[test]
    fn full_output_is_radius_light_dark() {
        let css = emit(&table(), &hsl()).unwrap();
        let blocks: Vec<&str> = css.split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], ":root {\n--radius: 0.625rem;\n}");
        assert!(blocks[1].starts_with(":root {\n--background: 0 0% 100%;\n--foreground: "));
        assert!(blocks[2].starts_with(".dark {\n--background: "));
    }

    #[test]
    fn end_to_end_every_declaration_is_terminated() {
        let css = emit_colors(&table(), &hsl()).unwrap();
        for block in css.split("\n\n") {
            assert!(block.contains("\n--background: "));
            let body: Vec<&str> = block.lines().filter(|l| l.starts_with("--")).collect();
            assert!(!body.is_empty());
            for decl in body {
                assert!(decl.ends_with(';'), "unterminated: {decl}");
                assert!(!decl.contains("NaN"), "{decl}");
            }
        }
    }

    #[test]
    fn hsl_values_are_bare_and_oklch_wrapped() {
        let t = table();
        let css = emit_colors(&t, &hsl()).unwrap();
        assert!(css.lines().filter(|l| l.starts_with("--")).all(|l| !l.contains("hsl(")));

        let css = emit_colors(&t, &oklch()).unwrap();
        assert_eq!(line(&css, "--background"), Some("oklch(1 0 0)"));
        assert!(line(&css, "--primary-500").unwrap().starts_with("oklch("));
    }

    #[test]
    fn missing_token_is_reported() {
        let mut t = table();
        t.dark.remove(&TokenKey::Ring);
        let err = emit_colors(&t, &hsl()).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::MissingToken {
                mode: Mode::Dark,
                key: TokenKey::Ring
            }
        ));
    }

    #[test]
    fn keyword_white_uses_simple_table() {
        let t = with(table(), Mode::Light, TokenKey::Card, "white");
        let css = emit_colors(&t, &hsl()).unwrap();
        assert_eq!(line(&css, "--card"), Some("0 0% 100%"));
    }

    #[test]
    fn dark_selector_deserializes_from_plain_strings() {
        #[derive(Deserialize)]
        struct Doc {
            a: DarkSelector,
            b: DarkSelector,
            target: StyleTarget,
        }
        let doc: Doc = toml::from_str("a = \"media\"\nb = \".night\"\ntarget = \"html\"").unwrap();
        assert_eq!(doc.a, DarkSelector::Media);
        assert_eq!(doc.b, DarkSelector::Custom(".night".to_owned()));
        assert_eq!(doc.b.to_string(), ".night");
        assert_eq!(doc.target, StyleTarget::Html);
    }
}
