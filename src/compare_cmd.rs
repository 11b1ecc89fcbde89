//! Dhram and iari commands: compare natural and impacted flow files reach
//! by reach.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use eflow_evaluate::{DhramReport, IariReport, evaluate_dhram, evaluate_iari, to_json};
use eflow_io::{ReachFlows, read_flows};

use crate::cli::CompareArgs;
use crate::config::EflowConfig;
use crate::convert;

/// Run DHRAM classification over every selected reach.
pub fn run_dhram(args: CompareArgs, config: &EflowConfig) -> Result<()> {
    let _cmd = info_span!("dhram").entered();
    let eval_config = convert::build_evaluate_config(&config.iha, &args.reach)?;
    let dhram_config = convert::build_dhram_config(&config.dhram)?;
    let (natural, impacted) = read_pair(&args)?;

    let evaluation = evaluate_dhram(&natural, &impacted, &eval_config, &dhram_config)
        .context("DHRAM evaluation failed")?;
    for (reach, result) in evaluation.results() {
        info!(
            reach = %reach,
            points = result.total_points(),
            class = result.final_class(),
            status = %result.wfd_status(),
            "classified"
        );
    }
    emit(&DhramReport::from(&evaluation), args.output.as_deref())
}

/// Run IARI scoring over every selected reach.
pub fn run_iari(args: CompareArgs, config: &EflowConfig) -> Result<()> {
    let _cmd = info_span!("iari").entered();
    let eval_config = convert::build_evaluate_config(&config.iha, &args.reach)?;
    let iari_config = convert::build_iari_config(&config.iari);
    let (natural, impacted) = read_pair(&args)?;

    let evaluation = evaluate_iari(&natural, &impacted, &eval_config, &iari_config)
        .context("IARI evaluation failed")?;
    for (reach, result) in evaluation.results() {
        info!(
            reach = %reach,
            score = result.overall(),
            class = %result.class(),
            "scored"
        );
    }
    emit(&IariReport::from(&evaluation), args.output.as_deref())
}

/// Reads both files. Reaches rejected while reading stay in the maps and
/// end up in the report's failures.
fn read_pair(args: &CompareArgs) -> Result<(ReachFlows, ReachFlows)> {
    let natural = read_flows(&args.natural)
        .with_context(|| format!("failed to read natural flows: {}", args.natural.display()))?;
    let impacted = read_flows(&args.impacted)
        .with_context(|| format!("failed to read impacted flows: {}", args.impacted.display()))?;
    info!(
        natural_reaches = natural.len(),
        impacted_reaches = impacted.len(),
        "flows loaded"
    );
    Ok((natural, impacted))
}

fn emit<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = to_json(report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
