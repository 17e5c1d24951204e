use serde::{Deserialize, Serialize};

/// Per-1000-token prices for a single model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRate {
    /// Currency per 1000 input tokens
    pub input_rate: f64,
    /// Currency per 1000 output tokens
    pub output_rate: f64,
}

impl PriceRate {
    pub const fn new(input_rate: f64, output_rate: f64) -> Self {
        Self {
            input_rate,
            output_rate,
        }
    }
}

/// Catalog entry: a named model with its price rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    pub model_name: String,
    pub provider: String,
    #[serde(flatten)]
    pub rate: PriceRate,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ModelPrice {
    pub fn new(model_name: &str, provider: &str, input_rate: f64, output_rate: f64) -> Self {
        Self {
            model_name: model_name.to_string(),
            provider: provider.to_string(),
            rate: PriceRate::new(input_rate, output_rate),
            currency: default_currency(),
            notes: None,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Usage assumptions fed into the cost model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    pub num_users: u32,
    /// Requests per user per month
    pub requests_per_month: f64,
    /// Average tokens per request
    pub avg_tokens_input: f64,
    pub avg_tokens_output: f64,
}

impl UsageProfile {
    /// Same profile with a different user count
    pub fn with_users(self, num_users: u32) -> Self {
        Self { num_users, ..self }
    }
}

/// Monthly cost estimate for one model and usage profile
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostEstimate {
    pub total_monthly_cost: f64,
    pub monthly_input_cost: f64,
    pub monthly_output_cost: f64,
    pub cost_per_user_per_month: f64,
}
