//! Command-line parsing for the sweep heatmap viewer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline and rendering code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{BioParam, ExportFormat, SweepConfig, TargetColumn};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "sweep",
    version,
    about = "Heatmaps of optimal closure parameters over a biological parameter sweep"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show each heatmap in an interactive terminal viewer, one after another.
    Show(SweepArgs),
    /// Render heatmaps to SVG files (and optionally export the grid data).
    Render(RenderArgs),
    /// Print a summary and character-shaded heatmaps.
    Ascii(SweepArgs),
}

/// Inputs and grid options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Results table (one row per sample).
    #[arg(long, env = "SWEEP_RESULTS", default_value = "./out_data/result.csv")]
    pub results: PathBuf,

    /// Directory holding the initial-parameter tables `1.csv`, `2.csv`, ...
    #[arg(
        long,
        env = "SWEEP_PARAMS_DIR",
        default_value = "./in_data/simulations_results/initial_parameters"
    )]
    pub params_dir: PathBuf,

    /// Number of initial-parameter tables to read.
    #[arg(long, env = "SWEEP_COUNT", default_value_t = 25)]
    pub count: usize,

    /// Parameter on the y axis (the slowly varying one).
    #[arg(long, value_enum, default_value_t = BioParam::SigmaM)]
    pub y_param: BioParam,

    /// Parameter on the x axis (the fast-cycling one).
    #[arg(long, value_enum, default_value_t = BioParam::SigmaW)]
    pub x_param: BioParam,

    /// Results columns to plot, in order.
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = TargetColumn::ALL.to_vec()
    )]
    pub columns: Vec<TargetColumn>,

    /// Fail when the results do not exactly fill the grid (instead of zero-padding).
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Options for `sweep render`.
#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Output directory for `{column}.svg` files.
    #[arg(long, default_value = "plots")]
    pub out_dir: PathBuf,

    /// Image width (pixels).
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Image height (pixels).
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Also export the reshaped grid as `{column}_grid.{csv,json}`.
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,
}

impl Command {
    pub fn sweep_args(&self) -> &SweepArgs {
        match self {
            Command::Show(args) | Command::Ascii(args) => args,
            Command::Render(args) => &args.sweep,
        }
    }
}

pub fn sweep_config_from_args(args: &SweepArgs) -> SweepConfig {
    SweepConfig {
        results_path: args.results.clone(),
        params_dir: args.params_dir.clone(),
        table_count: args.count,
        y_param: args.y_param,
        x_param: args.x_param,
        targets: args.columns.clone(),
        strict: args.strict,
    }
}
