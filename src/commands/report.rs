use anyhow::Result;
use llm_cost_calculator::config::Config;
use llm_cost_calculator::pricing::build_dashboard;
use llm_cost_calculator::report::render_dashboard;
use tracing::info;

use super::{build_calculator, print_json};
use crate::cli::UsageArgs;

/// Execute the report command
///
/// Runs the model comparison, the user-count evolution and the
/// selected-model breakdown for one set of inputs.
pub fn execute(cfg: &Config, model: Option<String>, args: &UsageArgs) -> Result<()> {
    let calculator = build_calculator(cfg)?;
    let model = model.unwrap_or_else(|| cfg.defaults.model.clone());
    let usage = cfg.usage(&args.overrides());

    info!(model = %model, users = usage.num_users, "Building cost report");
    let range = cfg.sweep_range(None)?;
    let report = build_dashboard(&calculator, &model, &usage, &range)?;

    if args.json {
        print_json(&report)
    } else {
        print!("{}", render_dashboard(&report));
        Ok(())
    }
}
