//! Theme configuration: in-code options, the TOML file form, per-call overrides.
//!
//! # File format
//!
//! ```toml
//! base = "slate"
//! primary = "indigo"          # `theme` is accepted as an alias
//! feedback = "custom"
//! sidebar = "extended"
//! radius = "0.5rem"
//! style_target = ":root"      # or "html"
//! dark_selector = "class"     # "media", or any selector
//! format = "oklch"            # or "hsl"
//! style_id = "THEME_STYLES"
//!
//! [preset.feedback.light]
//! destructive = "rose.600"
//! warning = "hsl(38 92% 50%)"
//!
//! [preset.feedback.dark]
//! destructive = "rose.400"
//! ```
//!
//! A `[preset.<group>]` table is used when that group's key is `custom`,
//! or when the key is left out entirely.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tinct_color::{ColorFormat, ColorToken, PaletteFamily};
use tracing::{debug, warn};

use crate::emit::{DEFAULT_RADIUS, DarkSelector, EmitterOptions, StyleTarget};
use crate::error::{Result, ThemeError};
use crate::preset::{BaseKey, FeedbackKey, GroupTable, PresetKey, SidebarKey};
use crate::resolve::{GroupSelection, PresetSelection};
use crate::schema::{Mode, TokenKey};

/// Style id used when mounting, unless configured otherwise.
pub const DEFAULT_STYLE_ID: &str = "THEME_STYLES";

// ---------------------------------------------------------------------------
// ThemeOptions
// ---------------------------------------------------------------------------

/// Factory configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOptions {
    pub preset: PresetSelection,
    pub emitter: EmitterOptions,
    pub style_id: String,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            preset: PresetSelection::default(),
            emitter: EmitterOptions::default(),
            style_id: DEFAULT_STYLE_ID.to_owned(),
        }
    }
}

impl ThemeOptions {
    #[must_use]
    pub fn base(mut self, base: impl Into<GroupSelection<BaseKey>>) -> Self {
        self.preset.base = base.into();
        self
    }

    #[must_use]
    pub fn primary(mut self, primary: impl Into<GroupSelection<PaletteFamily>>) -> Self {
        self.preset.primary = primary.into();
        self
    }

    #[must_use]
    pub fn feedback(mut self, feedback: impl Into<GroupSelection<FeedbackKey>>) -> Self {
        self.preset.feedback = feedback.into();
        self
    }

    #[must_use]
    pub fn sidebar(mut self, sidebar: impl Into<GroupSelection<SidebarKey>>) -> Self {
        self.preset.sidebar = sidebar.into();
        self
    }

    #[must_use]
    pub fn radius(mut self, radius: impl Into<String>) -> Self {
        self.emitter.radius = radius.into();
        self
    }

    #[must_use]
    pub const fn style_target(mut self, target: StyleTarget) -> Self {
        self.emitter.style_target = target;
        self
    }

    #[must_use]
    pub fn dark_selector(mut self, selector: DarkSelector) -> Self {
        self.emitter.dark_selector = selector;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: ColorFormat) -> Self {
        self.emitter.format = format;
        self
    }

    #[must_use]
    pub fn style_id(mut self, id: impl Into<String>) -> Self {
        self.style_id = id.into();
        self
    }
}

// ---------------------------------------------------------------------------
// PresetConfig
// ---------------------------------------------------------------------------

/// Per-call replacement for any of the factory's four group selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetConfig {
    pub base: Option<GroupSelection<BaseKey>>,
    pub primary: Option<GroupSelection<PaletteFamily>>,
    pub feedback: Option<GroupSelection<FeedbackKey>>,
    pub sidebar: Option<GroupSelection<SidebarKey>>,
}

impl PresetConfig {
    /// `defaults` with every group this config names replaced.
    #[must_use]
    pub fn apply(&self, defaults: &PresetSelection) -> PresetSelection {
        PresetSelection {
            base: self.base.clone().unwrap_or_else(|| defaults.base.clone()),
            primary: self.primary.clone().unwrap_or_else(|| defaults.primary.clone()),
            feedback: self.feedback.clone().unwrap_or_else(|| defaults.feedback.clone()),
            sidebar: self.sidebar.clone().unwrap_or_else(|| defaults.sidebar.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeConfig
// ---------------------------------------------------------------------------

/// Raw `light`/`dark` override tables, keyed by token name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverrideTables {
    pub light: BTreeMap<String, ColorToken>,
    pub dark: BTreeMap<String, ColorToken>,
}

impl OverrideTables {
    fn into_group_table(self) -> Result<GroupTable> {
        let mut table = GroupTable::default();
        for (mode, entries) in [(Mode::Light, self.light), (Mode::Dark, self.dark)] {
            for (name, token) in entries {
                let key = TokenKey::from_name(&name).ok_or(ThemeError::UnknownToken { name })?;
                table.insert(mode, key, token);
            }
        }
        Ok(table)
    }
}

/// `[preset.*]` override tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresetTables {
    pub base: Option<OverrideTables>,
    pub primary: Option<OverrideTables>,
    pub feedback: Option<OverrideTables>,
    pub sidebar: Option<OverrideTables>,
}

/// The TOML file form of [`ThemeOptions`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub base: Option<String>,
    #[serde(alias = "theme")]
    pub primary: Option<String>,
    pub feedback: Option<String>,
    pub sidebar: Option<String>,
    pub radius: Option<String>,
    pub style_target: Option<StyleTarget>,
    pub dark_selector: Option<DarkSelector>,
    pub format: Option<ColorFormat>,
    pub style_id: Option<String>,
    pub preset: PresetTables,
}

fn group_selection<K: PresetKey>(
    name: Option<&str>,
    tables: Option<OverrideTables>,
) -> Result<GroupSelection<K>> {
    let overrides = tables.map(OverrideTables::into_group_table).transpose()?;
    match (name, overrides) {
        (None, None) => Ok(GroupSelection::default()),
        (None, Some(table)) => {
            debug!(group = %K::GROUP, "override table without a key; treating as custom");
            Ok(GroupSelection::Custom(table))
        }
        (Some(name), overrides) => {
            let has_overrides = overrides.is_some();
            let selection = GroupSelection::parse(name, overrides)?;
            if has_overrides && matches!(selection, GroupSelection::Builtin(_)) {
                warn!(group = %K::GROUP, key = name, "override table ignored; key is not 'custom'");
            }
            Ok(selection)
        }
    }
}

impl ThemeConfig {
    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Config`] on malformed TOML, unknown fields, or
    /// unreadable color tokens.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Io`] when the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
        debug!(path = %path.display(), "loaded theme config");
        Self::from_toml(&text)
    }

    /// Validate keys and tokens and build factory options.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownPresetKey`] or [`ThemeError::UnknownToken`].
    pub fn into_options(self) -> Result<ThemeOptions> {
        let Self {
            base,
            primary,
            feedback,
            sidebar,
            radius,
            style_target,
            dark_selector,
            format,
            style_id,
            preset,
        } = self;

        Ok(ThemeOptions {
            preset: PresetSelection {
                base: group_selection(base.as_deref(), preset.base)?,
                primary: group_selection(primary.as_deref(), preset.primary)?,
                feedback: group_selection(feedback.as_deref(), preset.feedback)?,
                sidebar: group_selection(sidebar.as_deref(), preset.sidebar)?,
            },
            emitter: EmitterOptions {
                format: format.unwrap_or_default(),
                style_target: style_target.unwrap_or_default(),
                dark_selector: dark_selector.unwrap_or_default(),
                radius: radius.unwrap_or_else(|| DEFAULT_RADIUS.to_owned()),
            },
            style_id: style_id.unwrap_or_else(|| DEFAULT_STYLE_ID.to_owned()),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
