use anyhow::Result;
use llm_cost_calculator::config::Config;
use llm_cost_calculator::pricing::compare_models;
use llm_cost_calculator::report::comparison_table;

use super::{build_calculator, print_json};
use crate::cli::UsageArgs;

/// Execute the compare command
pub fn execute(cfg: &Config, args: &UsageArgs) -> Result<()> {
    let calculator = build_calculator(cfg)?;
    let usage = cfg.usage(&args.overrides());
    let rows = compare_models(&calculator, &usage)?;

    if args.json {
        return print_json(&rows);
    }

    println!("Model Cost Comparison ({} users):", usage.num_users);
    println!("{}", comparison_table(&rows));
    Ok(())
}
