use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use swatch_style::{
    LockSet, PaletteEngine, Rgb, Role, SUBTLE_TEXT_WEIGHT, ThemeSnapshot, ThemeStore,
    contrast_ratio, meets_wcag_aa, pick_accessible_text_color, section_text, subtle_mix,
};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};
use crate::output::{Report, RoleRow};
use crate::profile::{list_profile_names, resolve_profile};

#[derive(Debug, Parser)]
#[command(
    name = "swatch",
    about = "Generate, edit and audit six-role color palettes for starter sites",
    version
)]
pub struct Cli {
    /// Palette profile to start from: a file path or `builtin:<name>`.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log palette operations at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a fresh palette, ignoring the profile.
    Generate {
        /// Seed for a reproducible palette.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Re-randomize every unlocked role of the profile palette.
    Randomize {
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Exchange two roles' colors and locks.
    Swap { a: String, b: String },

    /// Set one role's color.
    Set { role: String, hex: String },

    /// Toggle a role's lock.
    Lock { role: String },

    /// Mark the profile palette as final.
    Finalize,

    /// Contrast ratio between two colors.
    Contrast { a: String, b: String },

    /// Accessible text color for a background.
    #[command(name = "pick-text")]
    PickText {
        background: String,
        preferred: String,
    },

    /// Mix a foreground toward a background for muted text.
    Mix {
        background: String,
        foreground: String,
        /// 0 is the background, 1 the foreground.
        #[arg(long, default_value_t = SUBTLE_TEXT_WEIGHT)]
        weight: f64,
    },

    /// Heading and muted body colors for a section background.
    Section {
        background: String,
        preferred: String,
    },

    /// Contrast audit of the profile palette.
    Audit,

    /// List roles with their current colors and locks.
    Roles,

    /// Print built-in profile names.
    #[command(name = "list-profiles")]
    ListProfiles,
}

/// Install the stderr log subscriber. `RUST_LOG` applies unless `verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse arguments. Help and version output print and exit as usual; every
/// other clap failure becomes [`CliError::InvalidArgument`].
pub fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|error| match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        _ => {
            let rendered = error.to_string();
            let message = rendered
                .lines()
                .take_while(|line| !line.is_empty() && !line.starts_with("Usage:"))
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" ");
            CliError::invalid(message.trim_start_matches("error: "))
        }
    })
}

pub fn run_from_env() -> Result<()> {
    let cli = parse_args(std::env::args_os())?;
    init_tracing(cli.verbose);

    let json = cli.json;
    let report = run(cli).inspect_err(|error| {
        tracing::warn!(%error, "command rejected");
    })?;
    println!("{}", report.render(json)?);
    Ok(())
}

pub fn run(cli: Cli) -> Result<Report> {
    let profile = cli.profile.as_deref();
    match cli.command {
        Commands::Generate { seed } => {
            let colors = engine(seed).generate_random_palette();
            Ok(Report::Palette(ThemeSnapshot {
                colors,
                locks: LockSet::new(),
                finalized: false,
            }))
        }
        Commands::Randomize { seed } => {
            let mut store = load_store(profile, engine(seed))?;
            store.randomize();
            Ok(Report::Palette(store.snapshot()))
        }
        Commands::Swap { a, b } => {
            let mut store = load_store(profile, PaletteEngine::new())?;
            store.swap_named(&a, &b)?;
            Ok(Report::Palette(store.snapshot()))
        }
        Commands::Set { role, hex } => {
            let mut store = load_store(profile, PaletteEngine::new())?;
            store.set_role(role.parse()?, &hex)?;
            Ok(Report::Palette(store.snapshot()))
        }
        Commands::Lock { role } => {
            let mut store = load_store(profile, PaletteEngine::new())?;
            store.toggle_lock(role.parse()?);
            Ok(Report::Palette(store.snapshot()))
        }
        Commands::Finalize => {
            let mut store = load_store(profile, PaletteEngine::new())?;
            store.finalize();
            Ok(Report::Palette(store.snapshot()))
        }
        Commands::Contrast { a, b } => {
            let a = Rgb::parse_hex(&a)?;
            let b = Rgb::parse_hex(&b)?;
            Ok(Report::Contrast {
                a,
                b,
                ratio: contrast_ratio(a, b),
                passes_aa: meets_wcag_aa(a, b),
            })
        }
        Commands::PickText {
            background,
            preferred,
        } => {
            let background = Rgb::parse_hex(&background)?;
            let preferred = Rgb::parse_hex(&preferred)?;
            Ok(Report::Color {
                color: pick_accessible_text_color(background, preferred),
            })
        }
        Commands::Mix {
            background,
            foreground,
            weight,
        } => {
            if !(0.0..=1.0).contains(&weight) {
                return Err(CliError::invalid(format!(
                    "weight must be between 0 and 1, got {weight}"
                )));
            }
            let background = Rgb::parse_hex(&background)?;
            let foreground = Rgb::parse_hex(&foreground)?;
            Ok(Report::Color {
                color: subtle_mix(background, foreground, weight),
            })
        }
        Commands::Section {
            background,
            preferred,
        } => {
            let background = Rgb::parse_hex(&background)?;
            let preferred = Rgb::parse_hex(&preferred)?;
            Ok(Report::Section(section_text(background, preferred)))
        }
        Commands::Audit => {
            let store = load_store(profile, PaletteEngine::new())?;
            Ok(Report::Audit(store.audit()))
        }
        Commands::Roles => {
            let snapshot = resolve_profile(profile)?.snapshot;
            let roles = Role::ALL
                .into_iter()
                .map(|role| RoleRow {
                    role,
                    label: role.label(),
                    color: snapshot.colors.get(role),
                    locked: snapshot.locks.is_locked(role),
                })
                .collect();
            Ok(Report::Roles { roles })
        }
        Commands::ListProfiles => Ok(Report::Profiles {
            names: list_profile_names(),
        }),
    }
}

fn engine(seed: Option<u64>) -> PaletteEngine {
    seed.map_or_else(PaletteEngine::new, PaletteEngine::seeded)
}

fn load_store(profile: Option<&str>, engine: PaletteEngine) -> Result<ThemeStore> {
    let profile = resolve_profile(profile)?;
    tracing::debug!(profile = %profile.name, "loaded palette profile");
    Ok(ThemeStore::from_snapshot(profile.snapshot, engine))
}
