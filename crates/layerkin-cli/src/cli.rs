use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Layerkin Developers",
    version,
    about = "Layerkin CLI - layer-resolved residence-time and hopping-rate analysis for molecular-dynamics trajectories near surfaces.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discretize center-of-mass trajectories into decimal and integer layer series.
    Layers(LayersArgs),
    /// Derive residence-time distributions and hopping rate constants from layer series.
    Kinetics(KineticsArgs),
}

/// Arguments for the `layers` subcommand.
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// LAMMPS center-of-mass output files to process (e.g. O_COM.out).
    #[arg(required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Path to the analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the molecule diameter (single layer width, in Å) from the config file.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub molecule_diameter: Option<f64>,

    /// Override the decimal-layer reference z height from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub dec_origin_z: Option<f64>,

    /// Override the integer-layer reference z height from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub int_origin_z: Option<f64>,
}

/// Arguments for the `kinetics` subcommand.
#[derive(Args, Debug)]
pub struct KineticsArgs {
    /// Result directories containing intLayer.dat and intCount.dat from the
    /// `layers` pass.
    #[arg(required = true, value_name = "DIR")]
    pub results: Vec<PathBuf>,

    /// Path to the analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Drop the final run instead of counting it as a reverse exit.
    #[arg(long)]
    pub ignore_final_run: bool,
}
