//! Command implementations for the CLI
//!
//! - report: full cost analysis (default)
//! - estimate / compare / sweep: individual views
//! - models: list the price catalog
//! - serve: JSON API
//! - test: validate configuration

pub mod compare;
pub mod estimate;
pub mod models;
pub mod report;
pub mod serve;
pub mod sweep;
pub mod test;

use anyhow::Result;
use llm_cost_calculator::config::Config;
use llm_cost_calculator::pricing::CostCalculator;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Build the calculator over the configured catalog
pub fn build_calculator(cfg: &Config) -> Result<CostCalculator> {
    let catalog = cfg.catalog.build()?;
    debug!("Using catalog with {} models", catalog.len());
    Ok(CostCalculator::new(Arc::new(catalog)))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
