use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Derive and plan static-site redirects from CSV manifests",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive old→new redirect mappings from a shipments manifest
    Identify(IdentifyArgs),
    /// Print the normalized redirect plan for a mapping file
    Plan(PlanArgs),
    /// Create a template redirect mapping file
    Init(InitArgs),
    /// Show the first records of any CSV file
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct IdentifyArgs {
    /// Shipment manifest; repeat to list fallbacks, the first existing file is used
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Destination mapping CSV (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Write detected conflicts as JSON to this file
    #[arg(long = "conflicts")]
    pub conflicts: Option<PathBuf>,
    /// YAML site configuration overriding hosts and path prefixes
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Redirect mapping CSV with old_url,new_url columns
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Emit the plan as JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Path of the mapping file to create
    #[arg(short = 'o', long = "output", default_value = "wix_redirects.csv")]
    pub output: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file to preview
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of records to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Character encoding for input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
