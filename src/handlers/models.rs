use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::handlers::AppState;
use crate::pricing::ModelPrice;

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelPrice>,
}

/// Handle /v1/models endpoint
/// Returns the price catalog in catalog order
pub async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    Json(ModelsResponse {
        object: "list".to_string(),
        data: state.calculator.catalog().iter().cloned().collect(),
    })
}
