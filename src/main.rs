mod cli;
mod compare_cmd;
mod config;
mod convert;
mod iha_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::EflowConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EflowConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Iha(args) => iha_cmd::run(args, &config),
        Command::Dhram(args) => compare_cmd::run_dhram(args, &config),
        Command::Iari(args) => compare_cmd::run_iari(args, &config),
    }
}
