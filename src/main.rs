// SPDX-License-Identifier: MIT
//
// tinct — theme presets in, CSS custom properties out.
//
// This is the command-line front end over the two library crates:
//
//   tinct-color → color tokens, HSL/OKLCH conversion, palette, ramps
//   tinct-theme → preset tables, resolution, CSS emission, caching, sinks
//
// Each invocation flows through:
//
//   flags / config.toml → ThemeOptions → ThemeFactory → CSS text → stdout
//                                                     └→ FileSink (--out-dir)
//
// Logging goes to stderr through tracing. `RUST_LOG` selects the filter;
// `-v` / `-vv` raise it to debug / trace regardless.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tinct_color::{ColorError, ColorFormat, ColorToken, PaletteFamily, generate_ramp};
use tinct_theme::preset::preset_keys;
use tinct_theme::{
    BaseKey, DarkSelector, FeedbackKey, FileSink, GroupSelection, PresetKey, Result, SidebarKey, StyleTarget,
    ThemeConfig, ThemeError, ThemeFactory, ThemeOptions,
};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "tinct", version, about = "Resolve theme presets into light/dark CSS custom properties")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print theme CSS (the default when no subcommand is given).
    Css(CssArgs),
    /// Print the 11-step ramp generated from one color.
    Ramp(RampArgs),
    /// List the built-in preset keys of every group.
    Presets,
}

#[derive(Debug, Default, Args)]
struct CssArgs {
    /// TOML file with presets, overrides, and emitter settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base (neutral) preset.
    #[arg(long)]
    base: Option<String>,

    /// Primary palette family.
    #[arg(long, alias = "theme")]
    primary: Option<String>,

    /// Feedback preset.
    #[arg(long)]
    feedback: Option<String>,

    /// Sidebar preset (`extended` or a base key).
    #[arg(long)]
    sidebar: Option<String>,

    /// Output color format.
    #[arg(long)]
    format: Option<ColorFormat>,

    /// `class`, `media`, or any CSS selector.
    #[arg(long)]
    dark_selector: Option<String>,

    /// Selector for the light and radius blocks.
    #[arg(long, value_enum)]
    style_target: Option<TargetArg>,

    /// Value of `--radius`.
    #[arg(long)]
    radius: Option<String>,

    /// Only the light and dark color blocks.
    #[arg(long, conflicts_with = "radius_only")]
    colors_only: bool,

    /// Only the radius block.
    #[arg(long)]
    radius_only: bool,

    /// Write `{style_id}.css` into this directory instead of printing.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RampArgs {
    /// Seed color: `family.level`, `hsl(...)`, `oklch(...)`, `black`, `white`.
    color: String,

    /// Output color format.
    #[arg(long, default_value_t)]
    format: ColorFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    Root,
    Html,
}

impl From<TargetArg> for StyleTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Root => Self::Root,
            TargetArg::Html => Self::Html,
        }
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn install_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn selection<K: PresetKey>(name: Option<&str>) -> Result<Option<GroupSelection<K>>> {
    name.map(|name| GroupSelection::parse(name, None)).transpose()
}

/// Config file first, then each flag on top of it.
fn theme_options(args: &CssArgs) -> Result<ThemeOptions> {
    let mut options = match &args.config {
        Some(path) => ThemeConfig::load(path)?.into_options()?,
        None => ThemeOptions::default(),
    };

    if let Some(base) = selection::<BaseKey>(args.base.as_deref())? {
        options = options.base(base);
    }
    if let Some(primary) = selection::<PaletteFamily>(args.primary.as_deref())? {
        options = options.primary(primary);
    }
    if let Some(feedback) = selection::<FeedbackKey>(args.feedback.as_deref())? {
        options = options.feedback(feedback);
    }
    if let Some(sidebar) = selection::<SidebarKey>(args.sidebar.as_deref())? {
        options = options.sidebar(sidebar);
    }
    if let Some(format) = args.format {
        options = options.format(format);
    }
    if let Some(selector) = &args.dark_selector {
        options = options.dark_selector(DarkSelector::parse(selector));
    }
    if let Some(target) = args.style_target {
        options = options.style_target(target.into());
    }
    if let Some(radius) = &args.radius {
        options = options.radius(radius.as_str());
    }

    debug!(key = %options.preset.cache_key(), "theme options ready");
    Ok(options)
}

fn css_command(args: &CssArgs) -> Result<String> {
    let factory = ThemeFactory::new(theme_options(args)?);

    if let Some(dir) = &args.out_dir {
        let mut sink = FileSink::new(dir);
        factory.mount(&mut sink, None, None)?;
        let path = sink.path(&factory.options().style_id)?;
        return Ok(format!("wrote {}", path.display()));
    }

    if args.radius_only {
        Ok(factory.radius_css(None))
    } else if args.colors_only {
        Ok(factory.color_css(None)?.to_string())
    } else {
        factory.css(None, None)
    }
}

fn ramp_command(args: &RampArgs) -> Result<String> {
    let token: ColorToken = args.color.parse()?;
    let seed = token.to_color().ok_or_else(|| {
        ThemeError::Color(ColorError::InvalidColorLiteral {
            literal: args.color.clone(),
            reason: "keyword has no color to build a ramp from".to_owned(),
        })
    })?;

    let lines: Vec<String> = generate_ramp(seed, args.format)
        .iter()
        .map(|(level, literal)| {
            let shade = if literal.to_color().is_light() { "light" } else { "dark" };
            format!("{:>3}  {literal}  {shade}", level.value())
        })
        .collect();
    Ok(lines.join("\n"))
}

fn group_line<K: PresetKey>() -> String {
    let keys: Vec<&str> = preset_keys::<K>().chain(["custom"]).collect();
    format!(
        "{:<9} {} (default {})",
        K::GROUP.name(),
        keys.join(" "),
        K::DEFAULT.key_name()
    )
}

fn presets_command() -> String {
    [
        group_line::<BaseKey>(),
        group_line::<PaletteFamily>(),
        group_line::<FeedbackKey>(),
        group_line::<SidebarKey>(),
    ]
    .join("\n")
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        None => css_command(&CssArgs::default()),
        Some(Command::Css(args)) => css_command(&args),
        Some(Command::Ramp(args)) => ramp_command(&args),
        Some(Command::Presets) => Ok(presets_command()),
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("tinct: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tinct").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_prints_default_theme() {
        let css = run(cli(&[])).unwrap();
        assert_eq!(css, ThemeFactory::default().css(None, None).unwrap());
        assert!(css.starts_with(":root {\n--radius: 0.625rem;\n}\n\n:root {\n"));
    }

    #[test]
    fn flags_select_presets_and_format() {
        let css = run(cli(&["css", "--base", "slate", "--primary", "rose", "--format", "oklch", "--colors-only"])).unwrap();
        assert!(!css.contains("--radius"));
        assert!(css.contains("--primary: oklch("));
        assert!(css.contains(".dark {\n"));
    }

    #[test]
    fn theme_alias_and_media_selector() {
        let css = run(cli(&["css", "--theme", "emerald", "--dark-selector", "media", "--style-target", "html"])).unwrap();
        assert!(css.starts_with("html {\n--radius: 0.625rem;\n}"));
        assert!(css.contains("@media (prefers-color-scheme: dark) {\nhtml {\n"));
    }

    #[test]
    fn radius_only_prints_one_block() {
        let css = run(cli(&["css", "--radius-only", "--radius", "1rem"])).unwrap();
        assert_eq!(css, ":root {\n--radius: 1rem;\n}");
    }

    #[test]
    fn colors_only_and_radius_only_conflict() {
        let parsed = Cli::try_parse_from(["tinct", "css", "--colors-only", "--radius-only"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_preset_is_reported() {
        let err = run(cli(&["css", "--feedback", "loud"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown feedback preset 'loud'");
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "base = \"stone\"\nradius = \"4px\"\n").unwrap();
        let config = path.to_str().unwrap();

        let css = run(cli(&["css", "--config", config, "--radius-only"])).unwrap();
        assert_eq!(css, ":root {\n--radius: 4px;\n}");

        let css = run(cli(&["css", "--config", config, "--radius-only", "--radius", "8px"])).unwrap();
        assert_eq!(css, ":root {\n--radius: 8px;\n}");
    }

    #[test]
    fn out_dir_writes_style_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let message = run(cli(&["css", "--out-dir", out])).unwrap();

        let path = dir.path().join("THEME_STYLES.css");
        assert_eq!(message, format!("wrote {}", path.display()));
        assert_eq!(fs::read_to_string(path).unwrap(), ThemeFactory::default().css(None, None).unwrap());
    }

    #[test]
    fn ramp_lists_eleven_steps() {
        let out = run(cli(&["ramp", "indigo.500"])).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with(" 50  hsl("));
        assert!(lines[0].ends_with("light"));
        assert!(lines[10].starts_with("950  hsl("));
        assert!(lines[10].ends_with("dark"));
    }

    #[test]
    fn ramp_rejects_passthrough_keywords() {
        let err = run(cli(&["ramp", "currentColor"])).unwrap_err();
        assert!(matches!(err, ThemeError::Color(ColorError::InvalidColorLiteral { .. })));
    }

    #[test]
    fn presets_lists_every_group() {
        let out = presets_command();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("base"));
        assert!(lines[0].ends_with("(default zinc)"));
        assert!(lines[3].contains("extended"));
        assert!(lines.iter().all(|l| l.contains("custom")));
    }
}
