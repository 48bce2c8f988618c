//! # tinct-theme — declarative presets to CSS custom properties
//!
//! Turns four named color-group choices (plus optional overrides) into the
//! light and dark custom-property blocks a component library consumes.
//!
//! # Architecture
//!
//! ```text
//! ThemeOptions / ThemeConfig (TOML) / PresetConfig (per call)
//!     │
//!     ▼
//! resolve.rs:   base → primary → feedback → sidebar  ⇒  ThemeTable
//!     │                        (preset.rs tables, schema.rs keys)
//!     ▼
//! emit.rs:      normalize.rs per token, alpha split, ramps  ⇒  CSS text
//!     │
//!     ▼
//! factory.rs:   memoized per selection, radius appended, sink.rs mounting
//! ```
//!
//! All color math lives in `tinct-color`. This crate only decides which
//! token goes where and how it is written out.

pub mod config;
pub mod emit;
pub mod error;
pub mod factory;
pub mod normalize;
pub mod preset;
pub mod resolve;
pub mod schema;
pub mod sink;

pub use config::{PresetConfig, ThemeConfig, ThemeOptions};
pub use emit::{DarkSelector, EmitterOptions, StyleTarget, emit, emit_colors, emit_radius};
pub use error::{Result, ThemeError};
pub use factory::ThemeFactory;
pub use normalize::normalize;
pub use preset::{BaseKey, FeedbackKey, GroupTable, PresetKey, SidebarKey};
pub use resolve::{GroupSelection, PresetSelection, ThemeTable, resolve};
pub use schema::{GroupKind, Mode, TokenKey};
pub use sink::{FileSink, MemorySink, StyleSink};
