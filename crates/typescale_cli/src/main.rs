//! Typescale CLI
//!
//! Preview and tune a responsive typography scale from the terminal.

mod config;
mod document;
mod report;
mod session;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use typescale_theme::{resolve, BreakpointTable, FontPreset, PlaygroundState, Variant};

use crate::config::{PlaygroundConfig, CONFIG_FILE};
use crate::session::Session;

/// Preview and tune a responsive typography scale
#[derive(Parser)]
#[command(name = "typescale")]
#[command(author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file or directory containing typescale.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every variant with its measured size at one viewport width
    Show {
        #[command(flatten)]
        params: ParamArgs,

        /// Viewport width in px
        #[arg(long)]
        width: Option<u32>,
    },

    /// Show every variant's size at every projected breakpoint
    Breakpoints {
        #[command(flatten)]
        params: ParamArgs,

        /// Emit the full projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the breakpoint a viewport width falls into
    Resolve {
        /// Viewport width in px
        width: f32,
    },

    /// Adjust parameters interactively
    Play {
        #[command(flatten)]
        params: ParamArgs,

        /// Initial viewport width in px
        #[arg(long)]
        width: Option<u32>,
    },

    /// Write a default typescale.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parameter flags, applied on top of the config file
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Font family (IBM Plex Sans, Inter, Poppins, Roboto, System)
    #[arg(long)]
    font: Option<FontPreset>,

    /// Root font size in px (8, 10, 12, 14, 16)
    #[arg(long)]
    base_size: Option<f32>,

    /// Modular ratio between heading steps (1.0 - 2.0)
    #[arg(long)]
    ratio: Option<f32>,

    /// Responsive factor; lower grows more aggressively (1 - 8)
    #[arg(long)]
    factor: Option<f32>,

    /// Skip 4px line-box grid alignment
    #[arg(long)]
    disable_align: bool,

    /// Stop scaling above the lg breakpoint
    #[arg(long)]
    no_xl: bool,

    /// Weight override, e.g. `--weight h1=700` (repeatable)
    #[arg(long, value_name = "VARIANT=WEIGHT", value_parser = parse_weight)]
    weight: Vec<(Variant, u16)>,

    /// Letter-spacing override in em, e.g. `--spacing overline=0.1` (repeatable)
    #[arg(long, value_name = "VARIANT=EM", value_parser = parse_spacing, allow_hyphen_values = true)]
    spacing: Vec<(Variant, f32)>,
}

fn split_pair(raw: &str) -> Result<(Variant, &str), String> {
    let (variant, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected VARIANT=VALUE, got `{raw}`"))?;
    let variant = variant.parse::<Variant>().map_err(|e| e.to_string())?;
    Ok((variant, value))
}

fn parse_weight(raw: &str) -> Result<(Variant, u16), String> {
    let (variant, value) = split_pair(raw)?;
    let weight = value
        .parse()
        .map_err(|_| format!("invalid weight `{value}`"))?;
    Ok((variant, weight))
}

fn parse_spacing(raw: &str) -> Result<(Variant, f32), String> {
    let (variant, value) = split_pair(raw)?;
    let em = value
        .parse()
        .map_err(|_| format!("invalid letter spacing `{value}`"))?;
    Ok((variant, em))
}

impl ParamArgs {
    /// Fold the flags into a loaded config
    fn merge_into(&self, config: &mut PlaygroundConfig) {
        if let Some(font) = self.font {
            config.scale.font = font;
        }
        if let Some(px) = self.base_size {
            config.scale.base_font_size = px;
        }
        if let Some(ratio) = self.ratio {
            config.scale.modular_ratio = ratio;
        }
        if let Some(factor) = self.factor {
            config.responsive.factor = factor;
        }
        if self.disable_align {
            config.responsive.disable_align = true;
        }
        if self.no_xl {
            config.responsive.include_xl = false;
        }
        config.weights.extend(self.weight.iter().copied());
        config.letter_spacing.extend(self.spacing.iter().copied());
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load config, apply flags, and install the global playground state
fn start(
    config_path: Option<&Path>,
    params: &ParamArgs,
) -> Result<(&'static PlaygroundState, PlaygroundConfig)> {
    let mut config = PlaygroundConfig::discover(config_path)?;
    params.merge_into(&mut config);

    PlaygroundState::init_default();
    let state = PlaygroundState::get();
    config.apply(state)?;
    tracing::info!(revision = state.revision(), "playground state ready");
    Ok((state, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Show { params, width } => {
            let (state, config) = start(cli.config.as_deref(), params)?;
            let width = width.unwrap_or(config.viewport.width);
            let session = Session::new(state, width);
            println!("{}", session.render());
        }
        Commands::Breakpoints { params, json } => {
            let (state, _) = start(cli.config.as_deref(), params)?;
            let snapshot = state.snapshot();
            if *json {
                let text = serde_json::to_string_pretty(snapshot.as_ref())
                    .context("Failed to serialize projection")?;
                println!("{text}");
            } else {
                print!("{}", report::breakpoint_table(&snapshot));
            }
        }
        Commands::Resolve { width } => {
            println!("{}", resolve(*width, &BreakpointTable::DEFAULT));
        }
        Commands::Play { params, width } => {
            let (state, config) = start(cli.config.as_deref(), params)?;
            let width = width.unwrap_or(config.viewport.width);
            let mut session = Session::new(state, width);
            let stdin = io::stdin();
            session.run(stdin.lock(), io::stdout())?;
        }
        Commands::Init { path, force } => {
            let target = path.join(CONFIG_FILE);
            if target.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    target.display()
                );
            }
            let text = PlaygroundConfig::default().to_toml()?;
            fs::write(&target, text)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            println!("Created {}", target.display());
        }
    }

    Ok(())
}
