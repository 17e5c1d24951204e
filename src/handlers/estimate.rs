use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::UsageOverrides;
use crate::error::AppError;
use crate::handlers::{ApiJson, AppState};
use crate::pricing::{
    build_dashboard, compare_models, token_breakdown, user_evolution, ComparisonRow, CostEstimate,
    DashboardReport, EvolutionPoint, TokenBreakdown, UsageProfile, UserRange,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModelRequest {
    /// Falls back to the configured default model
    pub model: Option<String>,
    pub usage: UsageOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UsageRequest {
    pub usage: UsageOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SweepRequest {
    pub usage: UsageOverrides,
    /// Falls back to the configured sweep range
    pub range: Option<UserRange>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub model: String,
    pub usage: UsageProfile,
    pub estimate: CostEstimate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub usage: UsageProfile,
    pub data: Vec<ComparisonRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SweepResponse {
    pub usage: UsageProfile,
    pub range: UserRange,
    pub data: Vec<EvolutionPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BreakdownResponse {
    pub usage: UsageProfile,
    pub breakdown: TokenBreakdown,
}

fn selected_model(state: &AppState, requested: Option<String>) -> String {
    requested.unwrap_or_else(|| state.config.defaults.model.clone())
}

/// Handle /v1/estimate endpoint
pub async fn handle_estimate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ModelRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let model = selected_model(&state, request.model);
    let usage = state.config.usage(&request.usage);

    let estimate = state.calculator.estimate(&model, &usage)?;
    info!(
        model = %model,
        users = usage.num_users,
        total = estimate.total_monthly_cost,
        "Estimate served"
    );

    Ok(Json(EstimateResponse {
        model,
        usage,
        estimate,
    }))
}

/// Handle /v1/compare endpoint
pub async fn handle_compare(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UsageRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let usage = state.config.usage(&request.usage);
    let data = compare_models(&state.calculator, &usage)?;

    Ok(Json(CompareResponse { usage, data }))
}

/// Handle /v1/sweep endpoint
pub async fn handle_sweep(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SweepRequest>,
) -> Result<Json<SweepResponse>, AppError> {
    let usage = state.config.usage(&request.usage);
    let range = state.config.sweep_range(request.range)?;
    let data = user_evolution(&state.calculator, &usage, &range)?;

    Ok(Json(SweepResponse { usage, range, data }))
}

/// Handle /v1/breakdown endpoint
pub async fn handle_breakdown(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ModelRequest>,
) -> Result<Json<BreakdownResponse>, AppError> {
    let model = selected_model(&state, request.model);
    let usage = state.config.usage(&request.usage);
    let breakdown = token_breakdown(&state.calculator, &model, &usage)?;

    Ok(Json(BreakdownResponse { usage, breakdown }))
}

/// Handle /v1/report endpoint: every sweep in one response
pub async fn handle_report(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ModelRequest>,
) -> Result<Json<DashboardReport>, AppError> {
    let model = selected_model(&state, request.model);
    let usage = state.config.usage(&request.usage);
    let range = state.config.sweep_range(None)?;
    let report = build_dashboard(&state.calculator, &model, &usage, &range)?;

    Ok(Json(report))
}
