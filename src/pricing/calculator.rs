use crate::error::CostError;
use crate::pricing::catalog::PriceCatalog;
use crate::pricing::models::{CostEstimate, PriceRate, UsageProfile};
use std::sync::Arc;
use tracing::{debug, warn};

/// Days used to normalize monthly request volume into a daily rate and back
const DAYS_PER_MONTH: f64 = 30.0;

/// Prices are quoted per this many tokens
const TOKENS_PER_PRICE_UNIT: f64 = 1000.0;

/// Compute the monthly cost of serving `usage` at `rate`.
///
/// Costs are computed per day and scaled back to the month in this exact
/// order; reordering changes the low bits of the result. No rounding is applied.
///
/// Fails with [`CostError::InvalidArgument`] when `num_users` is zero or any
/// real input is negative or not finite.
pub fn calculate_cost(rate: &PriceRate, usage: &UsageProfile) -> Result<CostEstimate, CostError> {
    validate(rate, usage)?;

    let num_users = f64::from(usage.num_users);
    let daily_requests_per_user = usage.requests_per_month / DAYS_PER_MONTH;

    let input_cost_daily = ((rate.input_rate / TOKENS_PER_PRICE_UNIT) * usage.avg_tokens_input)
        * daily_requests_per_user
        * num_users;
    let output_cost_daily = ((rate.output_rate / TOKENS_PER_PRICE_UNIT) * usage.avg_tokens_output)
        * daily_requests_per_user
        * num_users;

    let total_monthly_cost = (input_cost_daily + output_cost_daily) * DAYS_PER_MONTH;

    Ok(CostEstimate {
        total_monthly_cost,
        monthly_input_cost: input_cost_daily * DAYS_PER_MONTH,
        monthly_output_cost: output_cost_daily * DAYS_PER_MONTH,
        cost_per_user_per_month: total_monthly_cost / num_users,
    })
}

fn validate(rate: &PriceRate, usage: &UsageProfile) -> Result<(), CostError> {
    if usage.num_users == 0 {
        return Err(CostError::InvalidArgument(
            "num_users must be greater than zero".to_string(),
        ));
    }

    ensure_non_negative("input_rate", rate.input_rate)?;
    ensure_non_negative("output_rate", rate.output_rate)?;
    ensure_non_negative("requests_per_month", usage.requests_per_month)?;
    ensure_non_negative("avg_tokens_input", usage.avg_tokens_input)?;
    ensure_non_negative("avg_tokens_output", usage.avg_tokens_output)
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<(), CostError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::InvalidArgument(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Calculator for computing monthly costs of catalog models
#[derive(Debug, Clone)]
pub struct CostCalculator {
    catalog: Arc<PriceCatalog>,
}

impl CostCalculator {
    /// Create a new cost calculator
    pub fn new(catalog: Arc<PriceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// Estimate monthly cost for a catalog model
    pub fn estimate(&self, model: &str, usage: &UsageProfile) -> Result<CostEstimate, CostError> {
        let price = match self.catalog.get(model) {
            Some(p) => p,
            None => {
                warn!("No pricing data for model: {}", model);
                return Err(CostError::UnknownModel(model.to_string()));
            }
        };

        let estimate = calculate_cost(&price.rate, usage)?;
        debug!(
            model,
            users = usage.num_users,
            total = estimate.total_monthly_cost,
            "Estimated monthly cost"
        );
        Ok(estimate)
    }
}
