//! Cost sweeps over the catalog.
//!
//! Each sweep evaluates the cost model independently per point; results are
//! returned model-major in catalog order, user counts ascending.

use crate::error::CostError;
use crate::pricing::calculator::{calculate_cost, CostCalculator};
use crate::pricing::models::{CostEstimate, UsageProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive range of user counts sampled by the evolution sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl Default for UserRange {
    fn default() -> Self {
        Self {
            start: 100,
            end: 20_000,
            step: 1_900,
        }
    }
}

impl UserRange {
    /// Hard ceiling on the points one sweep may produce per model
    pub const MAX_POINTS: u64 = 10_000;

    pub fn validate(&self) -> Result<(), CostError> {
        if self.start == 0 {
            return Err(CostError::InvalidArgument(
                "user range must start above zero".to_string(),
            ));
        }
        if self.step == 0 {
            return Err(CostError::InvalidArgument(
                "user range step must be greater than zero".to_string(),
            ));
        }
        if self.start > self.end {
            return Err(CostError::InvalidArgument(format!(
                "user range start {} is above end {}",
                self.start, self.end
            )));
        }
        self.ensure_at_most(Self::MAX_POINTS)
    }

    /// Number of user counts in the range; only meaningful for a valid range
    pub fn point_count(&self) -> u64 {
        u64::from(self.end.saturating_sub(self.start)) / u64::from(self.step.max(1)) + 1
    }

    /// Reject ranges with more than `max_points` user counts
    pub fn ensure_at_most(&self, max_points: u64) -> Result<(), CostError> {
        let count = self.point_count();
        if count > max_points {
            return Err(CostError::InvalidArgument(format!(
                "user range {}..={} step {} has {} points, at most {} allowed",
                self.start, self.end, self.step, count, max_points
            )));
        }
        Ok(())
    }

    pub fn points(&self) -> Result<Vec<u32>, CostError> {
        self.validate()?;
        Ok((self.start..=self.end).step_by(self.step as usize).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub model: String,
    pub total_monthly_cost: f64,
    pub cost_per_user_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub model: String,
    pub num_users: u32,
    pub total_monthly_cost: f64,
    pub cost_per_user_per_month: f64,
}

/// Split of a model's monthly cost by token type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBreakdown {
    pub model: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    /// Fraction of the total in [0, 1], zero when the total is zero
    pub input_share: f64,
    pub output_share: f64,
}

impl TokenBreakdown {
    pub fn from_estimate(model: &str, estimate: &CostEstimate) -> Self {
        let total = estimate.total_monthly_cost;
        let share = |part: f64| if total > 0.0 { part / total } else { 0.0 };

        Self {
            model: model.to_string(),
            input_cost: estimate.monthly_input_cost,
            output_cost: estimate.monthly_output_cost,
            total_cost: total,
            input_share: share(estimate.monthly_input_cost),
            output_share: share(estimate.monthly_output_cost),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedModel {
    pub model: String,
    pub estimate: CostEstimate,
}

/// Everything the dashboard shows for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub usage: UsageProfile,
    pub comparison: Vec<ComparisonRow>,
    pub evolution: Vec<EvolutionPoint>,
    pub selected: SelectedModel,
    pub breakdown: TokenBreakdown,
}

/// Total and per-user monthly cost for every catalog model
pub fn compare_models(
    calculator: &CostCalculator,
    usage: &UsageProfile,
) -> Result<Vec<ComparisonRow>, CostError> {
    calculator
        .catalog()
        .iter()
        .map(|price| -> Result<ComparisonRow, CostError> {
            let estimate = calculate_cost(&price.rate, usage)?;
            Ok(ComparisonRow {
                model: price.model_name.clone(),
                total_monthly_cost: estimate.total_monthly_cost,
                cost_per_user_per_month: estimate.cost_per_user_per_month,
            })
        })
        .collect()
}

/// Cost of every catalog model at each user count in `range`.
///
/// `usage.num_users` is ignored; the range supplies the user counts.
pub fn user_evolution(
    calculator: &CostCalculator,
    usage: &UsageProfile,
    range: &UserRange,
) -> Result<Vec<EvolutionPoint>, CostError> {
    let user_counts = range.points()?;
    let mut points = Vec::with_capacity(user_counts.len() * calculator.catalog().len());

    for price in calculator.catalog().iter() {
        for &num_users in &user_counts {
            let estimate = calculate_cost(&price.rate, &usage.with_users(num_users))?;
            points.push(EvolutionPoint {
                model: price.model_name.clone(),
                num_users,
                total_monthly_cost: estimate.total_monthly_cost,
                cost_per_user_per_month: estimate.cost_per_user_per_month,
            });
        }
    }

    debug!("Computed {} evolution points", points.len());
    Ok(points)
}

pub fn token_breakdown(
    calculator: &CostCalculator,
    model: &str,
    usage: &UsageProfile,
) -> Result<TokenBreakdown, CostError> {
    let estimate = calculator.estimate(model, usage)?;
    Ok(TokenBreakdown::from_estimate(model, &estimate))
}

/// Run every sweep for one set of inputs
pub fn build_dashboard(
    calculator: &CostCalculator,
    model: &str,
    usage: &UsageProfile,
    range: &UserRange,
) -> Result<DashboardReport, CostError> {
    let estimate = calculator.estimate(model, usage)?;

    Ok(DashboardReport {
        usage: *usage,
        comparison: compare_models(calculator, usage)?,
        evolution: user_evolution(calculator, usage, range)?,
        selected: SelectedModel {
            model: model.to_string(),
            estimate,
        },
        breakdown: TokenBreakdown::from_estimate(model, &estimate),
    })
}
