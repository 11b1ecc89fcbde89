use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hydrologic alteration indices for daily river flows.
#[derive(Parser)]
#[command(
    name = "eflow",
    version,
    about = "IHA parameters, DHRAM classification and IARI scoring for daily flows"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (defaults to ./eflow.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Extract the 33 IHA parameters of one reach.
    Iha(IhaArgs),
    /// Classify natural vs impacted flows with DHRAM.
    Dhram(CompareArgs),
    /// Score impacted flows against natural bands with IARI.
    Iari(CompareArgs),
}

/// Arguments for the `iha` subcommand.
#[derive(clap::Args)]
pub struct IhaArgs {
    /// Flow Parquet file (columns reach, date, flow).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Reach to extract.
    #[arg(short, long)]
    pub reach: String,

    /// Parquet path for the parameter table; JSON to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `dhram` and `iari` subcommands.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Flow Parquet file of the natural regime.
    #[arg(long)]
    pub natural: PathBuf,

    /// Flow Parquet file of the impacted regime.
    #[arg(long)]
    pub impacted: PathBuf,

    /// Reach to evaluate (repeatable); every shared reach if omitted.
    #[arg(short, long)]
    pub reach: Vec<String>,

    /// Path for the JSON report; stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
