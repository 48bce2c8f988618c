//! Theme factory — the memoizing entry point.
//!
//! A factory is built once from [`ThemeOptions`]. Color CSS is cached per
//! canonical selection key, so asking twice for the same presets returns
//! the same `Arc<str>` without resolving or emitting again. Radius CSS is
//! rebuilt on every call.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::{PresetConfig, ThemeOptions};
use crate::emit::{emit_colors, emit_radius};
use crate::error::Result;
use crate::resolve::{PresetSelection, resolve};
use crate::sink::StyleSink;

/// Produces theme CSS for one set of options.
#[derive(Debug)]
pub struct ThemeFactory {
    options: ThemeOptions,
    cache: Mutex<HashMap<String, Arc<str>>>,
}

impl ThemeFactory {
    #[must_use]
    pub fn new(options: ThemeOptions) -> Self {
        Self {
            options,
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// The factory's selection with `config` applied on top.
    #[must_use]
    pub fn selection(&self, config: Option<&PresetConfig>) -> PresetSelection {
        config.map_or_else(|| self.options.preset.clone(), |c| c.apply(&self.options.preset))
    }

    /// Light and dark color blocks, memoized per selection.
    ///
    /// # Errors
    ///
    /// Propagates emission errors; nothing is cached on failure.
    pub fn color_css(&self, config: Option<&PresetConfig>) -> Result<Arc<str>> {
        let selection = self.selection(config);
        let key = selection.cache_key();

        // Held across the computation so concurrent first use of a key
        // computes it once.
        let mut cache = self.cache.lock();
        if let Some(css) = cache.get(&key) {
            debug!(%key, "color css cache hit");
            return Ok(Arc::clone(css));
        }

        debug!(%key, "color css cache miss");
        let css: Arc<str> = emit_colors(&resolve(&selection), &self.options.emitter)?.into();
        cache.insert(key, Arc::clone(&css));
        Ok(css)
    }

    /// The radius block, using the configured radius unless one is given.
    #[must_use]
    pub fn radius_css(&self, radius: Option<&str>) -> String {
        emit_radius(
            radius.unwrap_or(self.options.emitter.radius.as_str()),
            self.options.emitter.style_target,
        )
    }

    /// Radius block, blank line, color blocks.
    ///
    /// # Errors
    ///
    /// See [`color_css`](Self::color_css).
    pub fn css(&self, config: Option<&PresetConfig>, radius: Option<&str>) -> Result<String> {
        let colors = self.color_css(config)?;
        Ok(format!("{}\n\n{colors}", self.radius_css(radius)))
    }

    /// Replace the style under the configured id with fresh CSS.
    ///
    /// # Errors
    ///
    /// Emission errors, or whatever the sink reports.
    pub fn mount(&self, sink: &mut dyn StyleSink, config: Option<&PresetConfig>, radius: Option<&str>) -> Result<()> {
        let css = self.css(config, radius)?;
        let id = self.options.style_id.as_str();
        sink.retract(id)?;
        sink.publish(id, &css)?;
        debug!(id, bytes = css.len(), "mounted theme");
        Ok(())
    }

    /// Number of distinct selections cached so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }
}

impl Default for ThemeFactory {
    fn default() -> Self {
        Self::new(ThemeOptions::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{DarkSelector, StyleTarget};
    use crate::preset::{BaseKey, FeedbackKey, GroupTable, PresetKey, SidebarKey};
    use crate::resolve::GroupSelection;
    use crate::schema::{Mode, TokenKey};
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tinct_color::{ColorFormat, ColorToken, PaletteFamily, PaletteLevel};

    fn slate() -> ThemeFactory {
        ThemeFactory::new(ThemeOptions::default().base(BaseKey::Slate))
    }

    #[test]
    fn repeated_calls_share_one_allocation() {
        let factory = slate();
        let a = factory.color_css(None).unwrap();
        let b = factory.color_css(None).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(factory.cached(), 1);
    }

    #[test]
    fn cached_text_matches_fresh_computation() {
        let factory = slate();
        let cached = factory.color_css(None).unwrap();
        let fresh = emit_colors(&resolve(&factory.options().preset), &factory.options().emitter).unwrap();
        assert_eq!(&*cached, fresh.as_str());
    }

    #[test]
    fn per_call_config_gets_its_own_entry() {
        let factory = slate();
        let default = factory.color_css(None).unwrap();
        let config = PresetConfig {
            primary: Some(PaletteFamily::Rose.into()),
            ..PresetConfig::default()
        };
        let rose = factory.color_css(Some(&config)).unwrap();
        assert_ne!(default, rose);
        assert_eq!(factory.cached(), 2);
        assert!(Arc::ptr_eq(&rose, &factory.color_css(Some(&config)).unwrap()));
    }

    #[test]
    fn custom_contents_are_part_of_the_key() {
        let factory = slate();
        let custom = |level| PresetConfig {
            primary: Some(GroupSelection::Custom(GroupTable::default().with(
                Mode::Light,
                TokenKey::Primary,
                ColorToken::palette(PaletteFamily::Red, level),
            ))),
            ..PresetConfig::default()
        };
        let a = factory.color_css(Some(&custom(PaletteLevel::L500))).unwrap();
        let b = factory.color_css(Some(&custom(PaletteLevel::L700))).unwrap();
        assert_ne!(a, b);
        assert_eq!(factory.cached(), 2);
    }

    #[test]
    fn radius_is_not_cached() {
        let factory = ThemeFactory::new(ThemeOptions::default().radius("0.5rem").style_target(StyleTarget::Html));
        assert_eq!(factory.radius_css(None), "html {\n--radius: 0.5rem;\n}");
        assert_eq!(factory.radius_css(Some("2px")), "html {\n--radius: 2px;\n}");
        factory.css(None, Some("1rem")).unwrap();
        assert_eq!(factory.cached(), 1);
    }

    #[test]
    fn css_is_radius_then_colors() {
        let factory = slate();
        let css = factory.css(None, None).unwrap();
        let colors = factory.color_css(None).unwrap();
        assert_eq!(css, format!(":root {{\n--radius: 0.625rem;\n}}\n\n{colors}"));
    }

    #[test]
    fn end_to_end_slate_indigo_classic_extended() {
        let factory = ThemeFactory::new(
            ThemeOptions::default()
                .base(BaseKey::Slate)
                .primary(PaletteFamily::Indigo)
                .feedback(FeedbackKey::Classic)
                .sidebar(SidebarKey::Extended)
                .format(ColorFormat::Hsl),
        );
        let css = factory.color_css(None).unwrap();
        let (light, dark) = css.split_once("\n\n").unwrap();
        for block in [light, dark] {
            assert!(block.lines().any(|l| l.starts_with("--background: ")));
            assert!(
                block
                    .lines()
                    .filter(|l| l.starts_with("--"))
                    .all(|l| l.ends_with(';'))
            );
        }
        assert!(light.starts_with(":root {\n"));
        assert!(dark.starts_with(".dark {\n"));
    }

    #[test]
    fn mount_replaces_previous_style() {
        let factory = ThemeFactory::new(ThemeOptions::default().style_id("theme"));
        let mut sink = MemorySink::new();
        factory.mount(&mut sink, None, None).unwrap();
        factory.mount(&mut sink, None, Some("0px")).unwrap();
        assert_eq!(sink.len(), 1);
        assert!(sink.get("theme").unwrap().starts_with(":root {\n--radius: 0px;\n}"));
    }

    #[test]
    fn media_selector_flows_through() {
        let factory = ThemeFactory::new(ThemeOptions::default().dark_selector(DarkSelector::Media));
        let css = factory.color_css(None).unwrap();
        assert!(css.contains("@media (prefers-color-scheme: dark) {\n:root {\n"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn color_css_is_idempotent(
            base in prop::sample::select(BaseKey::all()),
            primary in prop::sample::select(PaletteFamily::all()),
            feedback in prop::sample::select(FeedbackKey::all()),
            sidebar in prop::sample::select(SidebarKey::all()),
            oklch in any::<bool>(),
        ) {
            let format = if oklch { ColorFormat::Oklch } else { ColorFormat::Hsl };
            let options = ThemeOptions::default()
                .base(base)
                .primary(primary)
                .feedback(feedback)
                .sidebar(sidebar)
                .format(format);
            let factory = ThemeFactory::new(options.clone());

            let first = factory.color_css(None).unwrap();
            let second = factory.color_css(None).unwrap();
            prop_assert!(Arc::ptr_eq(&first, &second));

            let fresh = emit_colors(&resolve(&options.preset), &options.emitter).unwrap();
            prop_assert_eq!(&*first, fresh.as_str());
        }
    }
}
