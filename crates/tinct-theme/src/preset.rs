//! Built-in presets — the static lookup tables behind every group key.
//!
//! Each group has one template parameterised by palette family (and, for
//! feedback, by step). A built-in table is the template evaluated over
//! the group's schema keys, so adding a family to the palette adds a preset
//! without touching this file.
//!
//! | Group    | Keys                                   | Default    |
//! |----------|----------------------------------------|------------|
//! | base     | stone, zinc, neutral, gray, slate      | `zinc`     |
//! | primary  | any palette family                     | `indigo`   |
//! | feedback | classic, vivid, subtle, … (15)         | `classic`  |
//! | sidebar  | `extended` or any base key             | `extended` |

use std::collections::BTreeMap;
use std::fmt;

use tinct_color::{Alpha, ColorToken, HslLiteral, Keyword, PaletteFamily, PaletteLevel};

use crate::error::{Result, ThemeError};
use crate::schema::{GroupKind, Mode, TokenKey};

// ---------------------------------------------------------------------------
// GroupTable
// ---------------------------------------------------------------------------

/// Tokens keyed by schema key; iteration follows schema order.
pub type TokenMap = BTreeMap<TokenKey, ColorToken>;

/// A light/dark pair of token maps.
///
/// Built-in tables are total over their group's keys. Caller-supplied
/// override tables may be partial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTable {
    pub light: TokenMap,
    pub dark: TokenMap,
}

impl GroupTable {
    #[must_use]
    pub const fn mode(&self, mode: Mode) -> &TokenMap {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub const fn mode_mut(&mut self, mode: Mode) -> &mut TokenMap {
        match mode {
            Mode::Light => &mut self.light,
            Mode::Dark => &mut self.dark,
        }
    }

    #[must_use]
    pub fn get(&self, mode: Mode, key: TokenKey) -> Option<&ColorToken> {
        self.mode(mode).get(&key)
    }

    pub fn insert(&mut self, mode: Mode, key: TokenKey, token: ColorToken) -> Option<ColorToken> {
        self.mode_mut(mode).insert(key, token)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, mode: Mode, key: TokenKey, token: ColorToken) -> Self {
        self.insert(mode, key, token);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }

    /// Evaluate a template over one group's keys in both modes.
    fn from_template(group: GroupKind, template: impl Fn(Mode, TokenKey) -> Option<ColorToken>) -> Self {
        let mut table = Self::default();
        for mode in Mode::ALL {
            for key in group.tokens() {
                if let Some(token) = template(mode, key) {
                    table.insert(mode, key, token);
                }
            }
        }
        table
    }
}

// ---------------------------------------------------------------------------
// PresetKey
// ---------------------------------------------------------------------------

/// A built-in key for one group.
pub trait PresetKey: Copy + Eq + fmt::Debug + 'static {
    const GROUP: GroupKind;
    const DEFAULT: Self;

    /// Every built-in key, in listing order.
    fn all() -> &'static [Self];

    fn key_name(self) -> &'static str;

    /// The built-in table for this key.
    fn builtin(self) -> GroupTable;

    /// Parse a key name.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownPresetKey`] when no built-in key has this name.
    fn parse_key(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.key_name() == name)
            .ok_or_else(|| ThemeError::UnknownPresetKey {
                group: Self::GROUP,
                key: name.to_owned(),
            })
    }
}

/// Names of every built-in key of `K`.
pub fn preset_keys<K: PresetKey>() -> impl Iterator<Item = &'static str> {
    K::all().iter().map(|key| key.key_name())
}

fn step(family: PaletteFamily, level: PaletteLevel) -> ColorToken {
    ColorToken::palette(family, level)
}

const WHITE: ColorToken = ColorToken::Keyword(Keyword::White);

const fn white_alpha(percent: f32) -> ColorToken {
    ColorToken::Hsl(HslLiteral::new(0.0, 0.0, 100.0).with_alpha(Alpha::Percent(percent)))
}

// ---------------------------------------------------------------------------
// Base
// ---------------------------------------------------------------------------

/// Neutral families usable for surfaces and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseKey {
    Stone,
    #[default]
    Zinc,
    Neutral,
    Gray,
    Slate,
}

impl BaseKey {
    pub const ALL: [Self; 5] = [Self::Stone, Self::Zinc, Self::Neutral, Self::Gray, Self::Slate];

    #[must_use]
    pub const fn family(self) -> PaletteFamily {
        match self {
            Self::Stone => PaletteFamily::Stone,
            Self::Zinc => PaletteFamily::Zinc,
            Self::Neutral => PaletteFamily::Neutral,
            Self::Gray => PaletteFamily::Gray,
            Self::Slate => PaletteFamily::Slate,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.family().name()
    }
}

impl fmt::Display for BaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PresetKey for BaseKey {
    const GROUP: GroupKind = GroupKind::Base;
    const DEFAULT: Self = Self::Zinc;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key_name(self) -> &'static str {
        self.name()
    }

    fn builtin(self) -> GroupTable {
        builtin_base(self)
    }
}

fn base_token(f: PaletteFamily, mode: Mode, key: TokenKey) -> Option<ColorToken> {
    use PaletteLevel::{L50, L100, L200, L400, L500, L800, L900, L950};
    use TokenKey as K;

    let light = mode == Mode::Light;
    Some(match key {
        K::Background | K::Card | K::Popover if light => WHITE,
        K::Background => step(f, L950),
        K::Card | K::Popover => step(f, L900),
        K::Foreground | K::CardForeground | K::PopoverForeground if light => step(f, L950),
        K::Foreground | K::CardForeground | K::PopoverForeground => step(f, L50),
        K::Secondary | K::Muted | K::Accent if light => step(f, L100),
        K::Secondary | K::Muted | K::Accent => step(f, L800),
        K::SecondaryForeground | K::AccentForeground if light => step(f, L900),
        K::SecondaryForeground | K::AccentForeground => step(f, L50),
        K::MutedForeground => step(f, if light { L500 } else { L400 }),
        K::Border | K::Input if light => step(f, L200),
        K::Border => white_alpha(10.0),
        K::Input => white_alpha(15.0),
        K::Carbon => step(f, if light { L800 } else { L100 }),
        K::CarbonForeground => step(f, if light { L50 } else { L900 }),
        K::PrimaryForeground
        | K::DestructiveForeground
        | K::SuccessForeground
        | K::WarningForeground
        | K::InfoForeground => step(f, L50),
        _ => return None,
    })
}

/// The built-in base table for `key`.
#[must_use]
pub fn builtin_base(key: BaseKey) -> GroupTable {
    let family = key.family();
    GroupTable::from_template(GroupKind::Base, |mode, token| base_token(family, mode, token))
}

/// Names of every built-in base key.
pub fn base_keys() -> impl Iterator<Item = &'static str> {
    preset_keys::<BaseKey>()
}

// ---------------------------------------------------------------------------
// Primary
// ---------------------------------------------------------------------------

impl PresetKey for PaletteFamily {
    const GROUP: GroupKind = GroupKind::Primary;
    const DEFAULT: Self = Self::Indigo;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key_name(self) -> &'static str {
        self.name()
    }

    fn builtin(self) -> GroupTable {
        builtin_primary(self)
    }
}

fn primary_token(f: PaletteFamily, mode: Mode, key: TokenKey) -> Option<ColorToken> {
    use PaletteLevel::{L200, L300, L400, L500, L600, L700, L800};
    use TokenKey as K;

    let light = mode == Mode::Light;
    let level = match key {
        K::Primary => L500,
        K::Ring => L400,
        K::Chart1 => L300,
        K::Chart2 => L500,
        K::Chart3 => L600,
        K::Chart4 => L700,
        K::Chart5 => L800,
        _ => return None,
    };
    // Dark mode runs one step lighter, except the ring which drops to sit
    // against dark surfaces.
    let level = match (light, key) {
        (true, _) => level,
        (false, K::Ring) => L600,
        (false, K::Primary) => L400,
        (false, _) => match level {
            L300 => L200,
            L500 => L400,
            L600 => L500,
            L700 => L600,
            _ => L700,
        },
    };
    Some(step(f, level))
}

/// The built-in primary table for a palette family.
#[must_use]
pub fn builtin_primary(family: PaletteFamily) -> GroupTable {
    GroupTable::from_template(GroupKind::Primary, |mode, token| primary_token(family, mode, token))
}

/// Names of every built-in primary key.
pub fn primary_keys() -> impl Iterator<Item = &'static str> {
    preset_keys::<PaletteFamily>()
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Named status-color palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeedbackKey {
    #[default]
    Classic,
    Vivid,
    Subtle,
    Warm,
    Cool,
    Nature,
    Modern,
    Vibrant,
    Professional,
    Soft,
    Bold,
    Calm,
    Candy,
    Deep,
    Light,
}

/// Families and steps behind one feedback key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackPalette {
    pub destructive: PaletteFamily,
    pub success: PaletteFamily,
    pub warning: PaletteFamily,
    pub info: PaletteFamily,
    pub light: PaletteLevel,
    pub dark: PaletteLevel,
}

impl FeedbackKey {
    pub const ALL: [Self; 15] = [
        Self::Classic,
        Self::Vivid,
        Self::Subtle,
        Self::Warm,
        Self::Cool,
        Self::Nature,
        Self::Modern,
        Self::Vibrant,
        Self::Professional,
        Self::Soft,
        Self::Bold,
        Self::Calm,
        Self::Candy,
        Self::Deep,
        Self::Light,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Vivid => "vivid",
            Self::Subtle => "subtle",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Nature => "nature",
            Self::Modern => "modern",
            Self::Vibrant => "vibrant",
            Self::Professional => "professional",
            Self::Soft => "soft",
            Self::Bold => "bold",
            Self::Calm => "calm",
            Self::Candy => "candy",
            Self::Deep => "deep",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn palette(self) -> FeedbackPalette {
        use PaletteFamily::{
            Amber, Blue, Cyan, Emerald, Fuchsia, Green, Indigo, Lime, Orange, Pink, Purple, Red, Rose, Sky,
            Teal, Violet, Yellow,
        };
        use PaletteLevel::{L200, L300, L400, L500, L600, L700, L800};

        let (destructive, success, warning, info, light, dark) = match self {
            Self::Classic => (Red, Green, Amber, Blue, L500, L400),
            Self::Vivid => (Rose, Emerald, Yellow, Sky, L500, L400),
            Self::Subtle => (Red, Green, Amber, Blue, L400, L300),
            Self::Warm => (Rose, Lime, Orange, Fuchsia, L600, L500),
            Self::Cool => (Pink, Teal, Yellow, Cyan, L500, L400),
            Self::Nature => (Red, Emerald, Amber, Teal, L600, L500),
            Self::Modern => (Red, Teal, Orange, Sky, L500, L400),
            Self::Vibrant => (Rose, Green, Orange, Violet, L500, L400),
            Self::Professional => (Red, Emerald, Amber, Sky, L700, L500),
            Self::Soft => (Rose, Emerald, Amber, Sky, L400, L300),
            Self::Bold => (Red, Green, Orange, Blue, L700, L500),
            Self::Calm => (Rose, Teal, Yellow, Indigo, L400, L300),
            Self::Candy => (Pink, Lime, Yellow, Purple, L400, L300),
            Self::Deep => (Red, Emerald, Amber, Indigo, L800, L600),
            Self::Light => (Red, Green, Amber, Blue, L300, L200),
        };
        FeedbackPalette {
            destructive,
            success,
            warning,
            info,
            light,
            dark,
        }
    }
}

impl fmt::Display for FeedbackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PresetKey for FeedbackKey {
    const GROUP: GroupKind = GroupKind::Feedback;
    const DEFAULT: Self = Self::Classic;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key_name(self) -> &'static str {
        self.name()
    }

    fn builtin(self) -> GroupTable {
        builtin_feedback(self)
    }
}

fn feedback_token(p: FeedbackPalette, mode: Mode, key: TokenKey) -> Option<ColorToken> {
    let family = match key {
        TokenKey::Destructive => p.destructive,
        TokenKey::Success => p.success,
        TokenKey::Warning => p.warning,
        TokenKey::Info => p.info,
        _ => return None,
    };
    let level = if mode == Mode::Light { p.light } else { p.dark };
    Some(step(family, level))
}

/// The built-in feedback table for `key`.
#[must_use]
pub fn builtin_feedback(key: FeedbackKey) -> GroupTable {
    let palette = key.palette();
    GroupTable::from_template(GroupKind::Feedback, |mode, token| feedback_token(palette, mode, token))
}

/// Names of every built-in feedback key.
pub fn feedback_keys() -> impl Iterator<Item = &'static str> {
    preset_keys::<FeedbackKey>()
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

/// Sidebar source: derived from the merged base/primary colors, or a
/// neutral family of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SidebarKey {
    #[default]
    Extended,
    Base(BaseKey),
}

impl SidebarKey {
    pub const ALL: [Self; 6] = [
        Self::Extended,
        Self::Base(BaseKey::Stone),
        Self::Base(BaseKey::Zinc),
        Self::Base(BaseKey::Neutral),
        Self::Base(BaseKey::Gray),
        Self::Base(BaseKey::Slate),
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Extended => "extended",
            Self::Base(base) => base.name(),
        }
    }
}

impl fmt::Display for SidebarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PresetKey for SidebarKey {
    const GROUP: GroupKind = GroupKind::Sidebar;
    const DEFAULT: Self = Self::Extended;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key_name(self) -> &'static str {
        self.name()
    }

    /// `extended` has no table of its own; the resolver derives it.
    fn builtin(self) -> GroupTable {
        match self {
            Self::Extended => GroupTable::default(),
            Self::Base(base) => builtin_sidebar(base),
        }
    }
}

fn sidebar_token(f: PaletteFamily, mode: Mode, key: TokenKey) -> Option<ColorToken> {
    use PaletteLevel::{L50, L100, L200, L400, L600, L800, L900, L950};
    use TokenKey as K;

    let light = mode == Mode::Light;
    Some(match key {
        K::Sidebar => step(f, if light { L50 } else { L900 }),
        K::SidebarForeground => step(f, if light { L950 } else { L50 }),
        K::SidebarPrimary => step(f, if light { L900 } else { L50 }),
        K::SidebarPrimaryForeground => step(f, if light { L50 } else { L900 }),
        K::SidebarAccent => step(f, if light { L100 } else { L800 }),
        K::SidebarAccentForeground => step(f, if light { L900 } else { L50 }),
        K::SidebarBorder if light => step(f, L200),
        K::SidebarBorder => white_alpha(10.0),
        K::SidebarRing => step(f, if light { L400 } else { L600 }),
        _ => return None,
    })
}

/// The built-in sidebar table for a base family.
#[must_use]
pub fn builtin_sidebar(key: BaseKey) -> GroupTable {
    let family = key.family();
    GroupTable::from_template(GroupKind::Sidebar, |mode, token| sidebar_token(family, mode, token))
}

/// Names of every sidebar key, `extended` first.
pub fn sidebar_keys() -> impl Iterator<Item = &'static str> {
    preset_keys::<SidebarKey>()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_total<K: PresetKey>() {
        for &key in K::all() {
            let table = key.builtin();
            if table.is_empty() {
                continue;
            }
            for mode in Mode::ALL {
                let keys: Vec<_> = table.mode(mode).keys().copied().collect();
                let expected: Vec<_> = K::GROUP.tokens().collect();
                assert_eq!(keys, expected, "{} '{}' {mode}", K::GROUP, key.key_name());
            }
        }
    }

    #[test]
    fn builtin_tables_cover_their_group() {
        assert_total::<BaseKey>();
        assert_total::<PaletteFamily>();
        assert_total::<FeedbackKey>();
        assert_total::<SidebarKey>();
    }

    #[test]
    fn key_listings() {
        assert_eq!(base_keys().collect::<Vec<_>>(), vec!["stone", "zinc", "neutral", "gray", "slate"]);
        assert_eq!(primary_keys().count(), 22);
        assert_eq!(feedback_keys().count(), 15);
        assert_eq!(sidebar_keys().next(), Some("extended"));
    }

    #[test]
    fn defaults() {
        assert_eq!(BaseKey::DEFAULT, BaseKey::Zinc);
        assert_eq!(BaseKey::default(), BaseKey::DEFAULT);
        assert_eq!(<PaletteFamily as PresetKey>::DEFAULT, PaletteFamily::Indigo);
        assert_eq!(FeedbackKey::default(), FeedbackKey::Classic);
        assert_eq!(SidebarKey::default(), SidebarKey::Extended);
    }

    #[test]
    fn parse_known_and_unknown_keys() {
        assert_eq!(BaseKey::parse_key("slate").unwrap(), BaseKey::Slate);
        assert_eq!(PaletteFamily::parse_key(" teal ").unwrap(), PaletteFamily::Teal);
        assert_eq!(SidebarKey::parse_key("gray").unwrap(), SidebarKey::Base(BaseKey::Gray));

        let err = FeedbackKey::parse_key("loud").unwrap_err();
        assert_eq!(err.to_string(), "unknown feedback preset 'loud'");
        // Base keys are neutral families only.
        assert!(BaseKey::parse_key("indigo").is_err());
    }

    #[test]
    fn base_light_surfaces_are_white() {
        let table = builtin_base(BaseKey::Slate);
        assert_eq!(table.get(Mode::Light, TokenKey::Background), Some(&WHITE));
        assert_eq!(
            table.get(Mode::Dark, TokenKey::Background),
            Some(&ColorToken::palette(PaletteFamily::Slate, PaletteLevel::L950))
        );
    }

    #[test]
    fn dark_borders_carry_alpha() {
        let table = builtin_base(BaseKey::Zinc);
        assert_eq!(
            table.get(Mode::Dark, TokenKey::Border).map(ToString::to_string).as_deref(),
            Some("hsl(0 0% 100% / 10%)")
        );
    }

    #[test]
    fn feedback_uses_its_families() {
        let table = builtin_feedback(FeedbackKey::Classic);
        assert_eq!(
            table.get(Mode::Light, TokenKey::Destructive),
            Some(&ColorToken::palette(PaletteFamily::Red, PaletteLevel::L500))
        );
        assert_eq!(
            table.get(Mode::Dark, TokenKey::Info),
            Some(&ColorToken::palette(PaletteFamily::Blue, PaletteLevel::L400))
        );
    }

    #[test]
    fn each_feedback_key_is_distinct() {
        for (i, a) in FeedbackKey::ALL.iter().enumerate() {
            for b in &FeedbackKey::ALL[i + 1..] {
                assert_ne!(a.palette(), b.palette(), "{a} and {b} share a palette");
            }
        }
    }

    #[test]
    fn extended_sidebar_has_no_table() {
        assert!(SidebarKey::Extended.builtin().is_empty());
        assert!(!SidebarKey::Base(BaseKey::Stone).builtin().is_empty());
    }
}
