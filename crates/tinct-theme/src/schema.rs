//! Token schema — the one ordered list of theme keys.
//!
//! Every recognized token appears here exactly once, tagged with the group
//! that supplies it and whether it carries a separate alpha property or a
//! tonal ramp. The resolver reads group membership from this table and the
//! emitter reads declaration order, alpha and ramp flags from it. No other
//! module keeps its own list of keys.

use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Light or dark variant of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// GroupKind
// ---------------------------------------------------------------------------

/// The four token groups, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKind {
    Base,
    Primary,
    Feedback,
    Sidebar,
}

impl GroupKind {
    /// Merge order: later groups win on key collision.
    pub const ALL: [Self; 4] = [Self::Base, Self::Primary, Self::Feedback, Self::Sidebar];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Primary => "primary",
            Self::Feedback => "feedback",
            Self::Sidebar => "sidebar",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    /// The keys this group supplies, in schema order.
    pub fn tokens(self) -> impl Iterator<Item = TokenKey> {
        SCHEMA.iter().filter(move |spec| spec.group == self).map(|spec| spec.key)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TokenFlags
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// Per-token emission traits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct TokenFlags: u8 {
        /// HSL output splits `color / alpha` into two properties.
        const ALPHA = 1 << 0;
        /// An 11-step tonal ramp is emitted after the plain declarations.
        const RAMP  = 1 << 1;
    }
}

// ---------------------------------------------------------------------------
// TokenKey
// ---------------------------------------------------------------------------

/// A recognized theme token.
///
/// Variant order is schema order; `SCHEMA[key as usize].key == key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKey {
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,
    Destructive,
    DestructiveForeground,
    Border,
    Input,
    Ring,
    Chart1,
    Chart2,
    Chart3,
    Chart4,
    Chart5,
    Success,
    SuccessForeground,
    Warning,
    WarningForeground,
    Info,
    InfoForeground,
    Carbon,
    CarbonForeground,
    Sidebar,
    SidebarForeground,
    SidebarPrimary,
    SidebarPrimaryForeground,
    SidebarAccent,
    SidebarAccentForeground,
    SidebarBorder,
    SidebarRing,
}

impl TokenKey {
    /// Every key in schema order.
    pub fn all() -> impl Iterator<Item = Self> {
        SCHEMA.iter().map(|spec| spec.key)
    }

    #[must_use]
    pub fn spec(self) -> &'static TokenSpec {
        &SCHEMA[self as usize]
    }

    /// The camelCase name used in configuration tables, e.g. `cardForeground`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// The custom-property name, e.g. `--card-foreground`.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        self.spec().css
    }

    #[must_use]
    pub fn group(self) -> GroupKind {
        self.spec().group
    }

    #[must_use]
    pub fn flags(self) -> TokenFlags {
        self.spec().flags
    }

    /// The companion alpha property for alpha-bearing keys.
    #[must_use]
    pub const fn alpha_css_name(self) -> Option<&'static str> {
        match self {
            Self::Border => Some("--border-alpha"),
            Self::Input => Some("--input-alpha"),
            Self::SidebarBorder => Some("--sidebar-border-alpha"),
            _ => None,
        }
    }

    /// Accepts the camelCase name or the kebab-case property name, with or
    /// without the leading `--`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let bare = name.trim_start_matches("--");
        SCHEMA
            .iter()
            .find(|spec| spec.name == bare || &spec.css[2..] == bare)
            .map(|spec| spec.key)
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// One schema record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpec {
    pub key: TokenKey,
    pub group: GroupKind,
    pub name: &'static str,
    pub css: &'static str,
    pub flags: TokenFlags,
}

const fn spec(key: TokenKey, group: GroupKind, name: &'static str, css: &'static str) -> TokenSpec {
    TokenSpec {
        key,
        group,
        name,
        css,
        flags: TokenFlags::empty(),
    }
}

const fn flagged(mut record: TokenSpec, flags: TokenFlags) -> TokenSpec {
    record.flags = flags;
    record
}

use GroupKind::{Base, Feedback, Primary as Brand, Sidebar as Side};
use TokenKey as K;

/// Schema version 1: 40 tokens.
#[rustfmt::skip]
pub static SCHEMA: [TokenSpec; 40] = [
    spec(K::Background,               Base,     "background",               "--background"),
    spec(K::Foreground,               Base,     "foreground",               "--foreground"),
    spec(K::Card,                     Base,     "card",                     "--card"),
    spec(K::CardForeground,           Base,     "cardForeground",           "--card-foreground"),
    spec(K::Popover,                  Base,     "popover",                  "--popover"),
    spec(K::PopoverForeground,        Base,     "popoverForeground",        "--popover-foreground"),
    flagged(spec(K::Primary,          Brand,    "primary",                  "--primary"), TokenFlags::RAMP),
    spec(K::PrimaryForeground,        Base,     "primaryForeground",        "--primary-foreground"),
    spec(K::Secondary,                Base,     "secondary",                "--secondary"),
    spec(K::SecondaryForeground,      Base,     "secondaryForeground",      "--secondary-foreground"),
    spec(K::Muted,                    Base,     "muted",                    "--muted"),
    spec(K::MutedForeground,          Base,     "mutedForeground",          "--muted-foreground"),
    spec(K::Accent,                   Base,     "accent",                   "--accent"),
    spec(K::AccentForeground,         Base,     "accentForeground",         "--accent-foreground"),
    flagged(spec(K::Destructive,      Feedback, "destructive",              "--destructive"), TokenFlags::RAMP),
    spec(K::DestructiveForeground,    Base,     "destructiveForeground",    "--destructive-foreground"),
    flagged(spec(K::Border,           Base,     "border",                   "--border"), TokenFlags::ALPHA),
    flagged(spec(K::Input,            Base,     "input",                    "--input"), TokenFlags::ALPHA),
    spec(K::Ring,                     Brand,    "ring",                     "--ring"),
    spec(K::Chart1,                   Brand,    "chart1",                   "--chart-1"),
    spec(K::Chart2,                   Brand,    "chart2",                   "--chart-2"),
    spec(K::Chart3,                   Brand,    "chart3",                   "--chart-3"),
    spec(K::Chart4,                   Brand,    "chart4",                   "--chart-4"),
    spec(K::Chart5,                   Brand,    "chart5",                   "--chart-5"),
    flagged(spec(K::Success,          Feedback, "success",                  "--success"), TokenFlags::RAMP),
    spec(K::SuccessForeground,        Base,     "successForeground",        "--success-foreground"),
    flagged(spec(K::Warning,          Feedback, "warning",                  "--warning"), TokenFlags::RAMP),
    spec(K::WarningForeground,        Base,     "warningForeground",        "--warning-foreground"),
    flagged(spec(K::Info,             Feedback, "info",                     "--info"), TokenFlags::RAMP),
    spec(K::InfoForeground,           Base,     "infoForeground",           "--info-foreground"),
    flagged(spec(K::Carbon,           Base,     "carbon",                   "--carbon"), TokenFlags::RAMP),
    spec(K::CarbonForeground,         Base,     "carbonForeground",         "--carbon-foreground"),
    spec(K::Sidebar,                  Side,     "sidebar",                  "--sidebar"),
    spec(K::SidebarForeground,        Side,     "sidebarForeground",        "--sidebar-foreground"),
    spec(K::SidebarPrimary,           Side,     "sidebarPrimary",           "--sidebar-primary"),
    spec(K::SidebarPrimaryForeground, Side,     "sidebarPrimaryForeground", "--sidebar-primary-foreground"),
    spec(K::SidebarAccent,            Side,     "sidebarAccent",            "--sidebar-accent"),
    spec(K::SidebarAccentForeground,  Side,     "sidebarAccentForeground",  "--sidebar-accent-foreground"),
    flagged(spec(K::SidebarBorder,    Side,     "sidebarBorder",            "--sidebar-border"), TokenFlags::ALPHA),
    spec(K::SidebarRing,              Side,     "sidebarRing",              "--sidebar-ring"),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
