use anyhow::Result;
use llm_cost_calculator::config::Config;
use llm_cost_calculator::pricing::TokenBreakdown;
use llm_cost_calculator::report::{breakdown_table, metric_lines, usage_lines};
use serde_json::json;

use super::{build_calculator, print_json};
use crate::cli::UsageArgs;

/// Execute the estimate command
pub fn execute(cfg: &Config, model: Option<String>, args: &UsageArgs) -> Result<()> {
    let calculator = build_calculator(cfg)?;
    let model = model.unwrap_or_else(|| cfg.defaults.model.clone());
    let usage = cfg.usage(&args.overrides());

    let estimate = calculator.estimate(&model, &usage)?;

    if args.json {
        return print_json(&json!({
            "model": model,
            "usage": usage,
            "estimate": estimate,
        }));
    }

    println!("Inputs:");
    for line in usage_lines(&usage) {
        println!("{}", line);
    }
    println!();
    for line in metric_lines(&model, &estimate) {
        println!("{}", line);
    }
    println!();

    let breakdown = TokenBreakdown::from_estimate(&model, &estimate);
    println!("Cost Breakdown by Token Type:");
    println!("{}", breakdown_table(&breakdown));
    Ok(())
}
