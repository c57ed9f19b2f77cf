//! NoScope command-line driver
//!
//! Reads a `noscope.toml` manifest describing target types and scopes,
//! reports scope diagnostics, and writes generated facades.

mod commands;
mod logging;
mod manifest;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::OutputFormat;
use manifest::MANIFEST_NAME;
use output::ColorMode;

#[derive(Parser)]
#[command(name = "noscope")]
#[command(about = "Scoped facade generator", long_about = None)]
#[command(version)]
struct Cli {
    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze scopes and report diagnostics
    Check {
        /// Manifest file
        #[arg(default_value = MANIFEST_NAME)]
        manifest: PathBuf,
        /// Diagnostics format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Generate facades and accessor tables
    Generate {
        /// Manifest file
        #[arg(default_value = MANIFEST_NAME)]
        manifest: PathBuf,
        /// Output directory (default: `generated/` next to the manifest)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Generate even when analysis reports errors
        #[arg(long)]
        allow_errors: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest, format } => commands::check::execute(&manifest, format, cli.color),
        Commands::Generate {
            manifest,
            out_dir,
            allow_errors,
        } => commands::generate::execute(&manifest, out_dir, allow_errors, cli.color),
    }
}
