use anyhow::Result;
use llm_cost_calculator::config::Config;
use llm_cost_calculator::pricing::{user_evolution, UserRange};
use llm_cost_calculator::report::evolution_table;

use super::{build_calculator, print_json};
use crate::cli::UsageArgs;

/// Execute the sweep command
///
/// Range bounds not given on the command line come from the `[sweep]` config section;
/// the result is fitted into the configured user limits.
pub fn execute(
    cfg: &Config,
    start: Option<u32>,
    end: Option<u32>,
    step: Option<u32>,
    args: &UsageArgs,
) -> Result<()> {
    let calculator = build_calculator(cfg)?;
    let usage = cfg.usage(&args.overrides());
    let range = cfg.sweep_range(Some(UserRange {
        start: start.unwrap_or(cfg.sweep.start),
        end: end.unwrap_or(cfg.sweep.end),
        step: step.unwrap_or(cfg.sweep.step),
    }))?;

    let points = user_evolution(&calculator, &usage, &range)?;

    if args.json {
        return print_json(&points);
    }

    println!(
        "Evolution of Cost with Number of Users ({}..={} step {}):",
        range.start, range.end, range.step
    );
    println!("{}", evolution_table(&points));
    Ok(())
}
