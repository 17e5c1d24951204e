//! Input ranges accepted by the calculator front ends.
//!
//! The cost model itself only rejects invalid values; the CLI and HTTP API
//! clamp user input into these ranges first.

use crate::error::CostError;
use crate::pricing::{UsageProfile, UserRange};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Allowed ranges for every usage field
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputLimits {
    /// Clamp incoming values into range before computing
    #[serde(default = "default_clamp")]
    pub clamp: bool,

    #[serde(default = "default_token_bounds")]
    pub avg_tokens_input: Bounds<f64>,

    #[serde(default = "default_token_bounds")]
    pub avg_tokens_output: Bounds<f64>,

    #[serde(default = "default_user_bounds")]
    pub num_users: Bounds<u32>,

    #[serde(default = "default_request_bounds")]
    pub requests_per_month: Bounds<f64>,

    /// Most user counts one sweep may sample
    #[serde(default = "default_max_sweep_points")]
    pub max_sweep_points: u64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            clamp: default_clamp(),
            avg_tokens_input: default_token_bounds(),
            avg_tokens_output: default_token_bounds(),
            num_users: default_user_bounds(),
            requests_per_month: default_request_bounds(),
            max_sweep_points: default_max_sweep_points(),
        }
    }
}

fn default_clamp() -> bool {
    true
}

fn default_token_bounds() -> Bounds<f64> {
    Bounds::new(10.0, 10_000.0)
}

fn default_user_bounds() -> Bounds<u32> {
    Bounds::new(100, 20_000)
}

fn default_request_bounds() -> Bounds<f64> {
    Bounds::new(30.0, 1_000.0)
}

fn default_max_sweep_points() -> u64 {
    1_000
}

impl InputLimits {
    /// Clamp every field into range.
    ///
    /// Returns the adjusted profile and the names of the fields that moved.
    /// NaN values are left untouched for the cost model to reject.
    pub fn clamp(&self, usage: &UsageProfile) -> (UsageProfile, Vec<&'static str>) {
        let mut adjusted = Vec::new();
        let mut out = *usage;

        out.num_users = self.num_users.clamp(usage.num_users);
        if out.num_users != usage.num_users {
            adjusted.push("num_users");
        }

        let mut clamp_real = |name: &'static str, bounds: &Bounds<f64>, value: f64| -> f64 {
            let clamped = bounds.clamp(value);
            if clamped != value && !value.is_nan() {
                adjusted.push(name);
            }
            clamped
        };

        out.requests_per_month = clamp_real(
            "requests_per_month",
            &self.requests_per_month,
            usage.requests_per_month,
        );
        out.avg_tokens_input = clamp_real(
            "avg_tokens_input",
            &self.avg_tokens_input,
            usage.avg_tokens_input,
        );
        out.avg_tokens_output = clamp_real(
            "avg_tokens_output",
            &self.avg_tokens_output,
            usage.avg_tokens_output,
        );

        (out, adjusted)
    }

    /// Clamp when enabled, logging adjusted fields
    pub fn apply(&self, usage: UsageProfile) -> UsageProfile {
        if !self.clamp {
            return usage;
        }

        let (clamped, adjusted) = self.clamp(&usage);
        if !adjusted.is_empty() {
            warn!(fields = ?adjusted, "Usage input clamped into allowed range");
        }
        clamped
    }

    /// Fit a sweep range into the user bounds and the point budget.
    ///
    /// Endpoints are clamped into `num_users` when clamping is enabled and
    /// rejected otherwise. The point count is checked before anything is
    /// allocated.
    pub fn sweep_range(&self, range: &UserRange) -> Result<UserRange, CostError> {
        let mut fitted = *range;

        if self.clamp {
            fitted.start = self.num_users.clamp(range.start);
            fitted.end = self.num_users.clamp(range.end);
            if fitted != *range {
                warn!(
                    start = fitted.start,
                    end = fitted.end,
                    "Sweep range clamped into allowed user range"
                );
            }
        } else if !self.num_users.contains(range.start) || !self.num_users.contains(range.end) {
            return Err(CostError::InvalidArgument(format!(
                "user range {}..={} is outside the allowed {}..={}",
                range.start, range.end, self.num_users.min, self.num_users.max
            )));
        }

        fitted.validate()?;
        fitted.ensure_at_most(self.max_sweep_points)?;
        Ok(fitted)
    }

    pub fn admits(&self, usage: &UsageProfile) -> bool {
        self.num_users.contains(usage.num_users)
            && self.requests_per_month.contains(usage.requests_per_month)
            && self.avg_tokens_input.contains(usage.avg_tokens_input)
            && self.avg_tokens_output.contains(usage.avg_tokens_output)
    }
}
