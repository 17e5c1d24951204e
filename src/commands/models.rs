use anyhow::Result;
use llm_cost_calculator::config::Config;
use llm_cost_calculator::pricing::ModelPrice;
use llm_cost_calculator::report::catalog_table;

use super::{build_calculator, print_json};

/// Execute the models command
pub fn execute(cfg: &Config, json: bool) -> Result<()> {
    let calculator = build_calculator(cfg)?;
    let catalog = calculator.catalog();

    if json {
        let models: Vec<&ModelPrice> = catalog.iter().collect();
        return print_json(&models);
    }

    println!("Price Catalog ({} models, prices per 1000 tokens):", catalog.len());
    println!("{}", catalog_table(catalog));
    Ok(())
}
