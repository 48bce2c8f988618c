//! Preset resolution: four group selections in, one table per mode out.
//!
//! ```text
//! base ──┐
//! primary ┼─► merge (later wins) ─► extended sidebar? ─► sidebar ─► ThemeTable
//! feedback┘
//! ```
//!
//! A built-in selection contributes its static table. A custom selection
//! contributes its overrides laid over the group's default built-in, so a
//! partial (or empty) override table still yields every key of the group.
//! The sidebar's default, `extended`, is not a table at all: it copies
//! eight values out of whatever base and primary resolved to.

use std::fmt::Write as _;

use tinct_color::{ColorToken, PaletteFamily};
use tracing::{debug, warn};

use crate::error::Result;
use crate::preset::{BaseKey, FeedbackKey, GroupTable, PresetKey, SidebarKey, TokenMap};
use crate::schema::{Mode, TokenKey};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// One group's choice: a built-in key or caller-supplied overrides.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupSelection<K> {
    Builtin(K),
    Custom(GroupTable),
}

impl<K: PresetKey> Default for GroupSelection<K> {
    fn default() -> Self {
        Self::Builtin(K::DEFAULT)
    }
}

impl<K: PresetKey> From<K> for GroupSelection<K> {
    fn from(key: K) -> Self {
        Self::Builtin(key)
    }
}

impl<K: PresetKey> GroupSelection<K> {
    /// Parse a group key, where `custom` selects `overrides`.
    ///
    /// `custom` with no override table is accepted and behaves like the
    /// group's default key.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownPresetKey`](crate::ThemeError::UnknownPresetKey)
    /// for any other unrecognized name.
    pub fn parse(name: &str, overrides: Option<GroupTable>) -> Result<Self> {
        if name.trim() == "custom" {
            if overrides.is_none() {
                warn!(
                    group = %K::GROUP,
                    default = K::DEFAULT.key_name(),
                    "custom preset selected without overrides; using default"
                );
            }
            return Ok(Self::Custom(overrides.unwrap_or_default()));
        }
        K::parse_key(name).map(Self::Builtin)
    }

    /// `custom` or the built-in key name.
    #[must_use]
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Builtin(key) => key.key_name(),
            Self::Custom(_) => "custom",
        }
    }

    /// The layer this group contributes to the merge.
    fn layer(&self, builtin: impl Fn(K) -> GroupTable) -> GroupTable {
        match self {
            Self::Builtin(key) => builtin(*key),
            Self::Custom(overrides) => {
                if overrides.is_empty() {
                    debug!(group = %K::GROUP, "empty custom overrides; group resolves to its default");
                }
                let mut layer = builtin(K::DEFAULT);
                for mode in Mode::ALL {
                    for (&key, &token) in overrides.mode(mode) {
                        if key.group() != K::GROUP {
                            debug!(group = %K::GROUP, token = %key, "override outside its group");
                        }
                        layer.insert(mode, key, token);
                    }
                }
                layer
            }
        }
    }

    fn cache_fragment(&self, out: &mut String) {
        out.push_str(K::GROUP.name());
        out.push('=');
        out.push_str(self.key_name());
        if let Self::Custom(overrides) = self {
            out.push('{');
            for mode in Mode::ALL {
                let _ = write!(out, "{mode}:");
                for (key, token) in overrides.mode(mode) {
                    let _ = write!(out, "{key}={token},");
                }
                out.push(';');
            }
            out.push('}');
        }
    }
}

/// The four group choices of one theme request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetSelection {
    pub base: GroupSelection<BaseKey>,
    pub primary: GroupSelection<PaletteFamily>,
    pub feedback: GroupSelection<FeedbackKey>,
    pub sidebar: GroupSelection<SidebarKey>,
}

impl PresetSelection {
    /// All four groups built in.
    #[must_use]
    pub const fn builtin(base: BaseKey, primary: PaletteFamily, feedback: FeedbackKey, sidebar: SidebarKey) -> Self {
        Self {
            base: GroupSelection::Builtin(base),
            primary: GroupSelection::Builtin(primary),
            feedback: GroupSelection::Builtin(feedback),
            sidebar: GroupSelection::Builtin(sidebar),
        }
    }

    /// Canonical text identifying this selection for memoization.
    ///
    /// Custom groups embed their override contents in schema order, so two
    /// selections share a key only when they resolve to the same table.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut key = String::new();
        self.base.cache_fragment(&mut key);
        key.push('|');
        self.primary.cache_fragment(&mut key);
        key.push('|');
        self.feedback.cache_fragment(&mut key);
        key.push('|');
        self.sidebar.cache_fragment(&mut key);
        key
    }
}

// ---------------------------------------------------------------------------
// ThemeTable
// ---------------------------------------------------------------------------

/// The merged light and dark token maps of one resolved theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeTable {
    pub light: TokenMap,
    pub dark: TokenMap,
}

impl ThemeTable {
    #[must_use]
    pub const fn mode(&self, mode: Mode) -> &TokenMap {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    #[must_use]
    pub fn get(&self, mode: Mode, key: TokenKey) -> Option<&ColorToken> {
        self.mode(mode).get(&key)
    }

    /// Whether both modes hold a value for every schema key.
    #[must_use]
    pub fn is_total(&self) -> bool {
        Mode::ALL
            .into_iter()
            .all(|mode| TokenKey::all().all(|key| self.mode(mode).contains_key(&key)))
    }

    /// Lay `layer` over this table; the layer wins on collision.
    fn overlay(&mut self, layer: GroupTable) {
        self.light.extend(layer.light);
        self.dark.extend(layer.dark);
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Sidebar token and the merged token it copies under `extended`.
const EXTENDED_SIDEBAR: [(TokenKey, TokenKey); 8] = [
    (TokenKey::Sidebar, TokenKey::Background),
    (TokenKey::SidebarForeground, TokenKey::Foreground),
    (TokenKey::SidebarPrimary, TokenKey::Primary),
    (TokenKey::SidebarPrimaryForeground, TokenKey::PrimaryForeground),
    (TokenKey::SidebarAccent, TokenKey::Accent),
    (TokenKey::SidebarAccentForeground, TokenKey::AccentForeground),
    (TokenKey::SidebarBorder, TokenKey::Border),
    (TokenKey::SidebarRing, TokenKey::Ring),
];

/// Derive the sidebar group from the tokens merged so far.
fn extended_sidebar(merged: &ThemeTable) -> GroupTable {
    debug!("deriving sidebar from base and primary");
    let mut sidebar = GroupTable::default();
    for mode in Mode::ALL {
        for (target, source) in EXTENDED_SIDEBAR {
            if let Some(&token) = merged.get(mode, source) {
                sidebar.insert(mode, target, token);
            }
        }
    }
    sidebar
}

/// Merge the four selections, base → primary → feedback → sidebar.
#[must_use]
pub fn resolve(selection: &PresetSelection) -> ThemeTable {
    let mut table = ThemeTable::default();
    table.overlay(selection.base.layer(BaseKey::builtin));
    table.overlay(selection.primary.layer(PaletteFamily::builtin));
    table.overlay(selection.feedback.layer(FeedbackKey::builtin));

    let sidebar = selection.sidebar.layer(|key| match key {
        SidebarKey::Extended => extended_sidebar(&table),
        SidebarKey::Base(_) => key.builtin(),
    });
    table.overlay(sidebar);
    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
