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
    author,
    version,
    about = "catrace CLI - Reconstructs the order of a chain of points, such as a protein C-alpha trace, from unordered 3D coordinates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress display
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconstruct the chain order of a point list and write it out.
    Chain(ChainArgs),
    /// List close contacts and score the vertex angles of reachable triples.
    Survey(SurveyArgs),
}

/// Arguments for the `chain` subcommand.
#[derive(Args, Debug)]
pub struct ChainArgs {
    // --- Core Arguments ---
    /// Path to the input point records (`id x y z [label]` per line).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the ordered output records. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Threshold Overrides ---
    /// Override the distance cutoff for chain neighbors.
    #[arg(long, value_name = "FLOAT")]
    pub neighbor_threshold: Option<f64>,

    /// Override the distance cutoff for close contacts.
    #[arg(long, value_name = "FLOAT")]
    pub adjacent_threshold: Option<f64>,

    /// Exclude pairs lying exactly at a cutoff distance.
    #[arg(long)]
    pub exclusive: bool,

    // --- Reporting ---
    /// Expected chain order; the result is checked against it in either direction.
    #[arg(long, value_name = "ID,ID,...", value_delimiter = ',')]
    pub expected: Vec<i64>,

    /// Write a TOML summary of the reconstruction to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S angles.tolerance=25
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `survey` subcommand.
#[derive(Args, Debug)]
pub struct SurveyArgs {
    /// Path to the input point records (`id x y z [label]` per line).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the distance cutoff for close contacts.
    #[arg(long, value_name = "FLOAT")]
    pub adjacent_threshold: Option<f64>,

    /// Score every triple, not only those with two short arms.
    #[arg(long)]
    pub no_prefilter: bool,

    /// Number of best-scored triples to print.
    #[arg(long, value_name = "INT", default_value_t = 10)]
    pub top: usize,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thresholds.adjacent=4.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}
