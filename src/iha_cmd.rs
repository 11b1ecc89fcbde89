//! Iha command: extract the parameter matrix of one reach.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use eflow_evaluate::{FlowSource, ParameterReport, iha_from_reach, to_json};
use eflow_io::{read_flows, write_parameters};

use crate::cli::IhaArgs;
use crate::config::EflowConfig;
use crate::convert;

/// Run parameter extraction for a single reach.
pub fn run(args: IhaArgs, config: &EflowConfig) -> Result<()> {
    let _cmd = info_span!("iha", reach = %args.reach).entered();
    let iha_config = convert::build_iha_config(&config.iha)?;

    info!(path = %args.input.display(), "reading flows");
    let flows = read_flows(&args.input)
        .with_context(|| format!("failed to read flows: {}", args.input.display()))?;
    info!(n_reaches = flows.reach_ids().len(), "flows loaded");

    let matrix = iha_from_reach(&flows, &args.reach, &iha_config)
        .with_context(|| format!("failed to extract parameters for reach '{}'", args.reach))?;
    info!(
        n_years = matrix.n_years(),
        first_year = matrix.years().first().copied(),
        "parameters extracted"
    );

    match args.output {
        Some(path) => {
            let writer = convert::build_writer_config(&config.io)?;
            write_parameters(&path, &matrix, &writer)
                .with_context(|| format!("failed to write Parquet: {}", path.display()))?;
            info!(path = %path.display(), "parameters written");
        }
        None => println!("{}", to_json(&ParameterReport::from(&matrix))?),
    }
    Ok(())
}
