//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the sweep pipeline
//! - hands the figures to the selected front-end

use std::fs::create_dir_all;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, RenderArgs, sweep_config_from_args};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sweep` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.command.sweep_args().verbose);

    match cli.command {
        Command::Show(args) => handle_show(&args),
        Command::Render(args) => handle_render(&args),
        Command::Ascii(args) => handle_ascii(&args),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_show(args: &crate::cli::SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(args);
    // Everything is loaded before the terminal switches to the alternate screen,
    // so load errors and warnings land on a normal stderr.
    let run = pipeline::run_sweep(&config)?;
    crate::tui::run(run.figures)
}

fn handle_render(args: &RenderArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(&args.sweep);
    let run = pipeline::run_sweep(&config)?;

    create_dir_all(&args.out_dir).map_err(|e| {
        AppError::input(format!(
            "Failed to create output directory '{}': {e}",
            args.out_dir.display()
        ))
    })?;

    for figure in &run.figures {
        let path = args.out_dir.join(format!("{}.svg", figure.target));
        crate::plot::write_svg(&path, figure, (args.width, args.height))?;
        tracing::info!(path = %path.display(), "wrote heatmap");
        println!("{}", path.display());

        if let Some(format) = args.export {
            let path = crate::io::export::export_path(&args.out_dir, figure, format);
            crate::io::export::write_grid(&path, figure, format)?;
            tracing::info!(path = %path.display(), "wrote grid export");
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn handle_ascii(args: &crate::cli::SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(args);
    let run = pipeline::run_sweep(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));
    for figure in &run.figures {
        println!("{}", crate::plot::render_ascii_heatmap(figure));
    }
    Ok(())
}

/// Rewrite argv so `sweep` defaults to `sweep show`.
///
/// Rules:
/// - `sweep`                          -> `sweep show`
/// - `sweep --strict ...`             -> `sweep show --strict ...`
/// - `sweep --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "render" | "ascii");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    argv
}
