pub mod estimate;
pub mod health;
pub mod models;

use crate::config::Config;
use crate::error::AppError;
use crate::pricing::CostCalculator;
use axum::extract::FromRequest;
use std::sync::Arc;

/// Shared state for all API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub calculator: Arc<CostCalculator>,
}

impl AppState {
    pub fn new(config: Config, calculator: CostCalculator) -> Self {
        Self {
            config: Arc::new(config),
            calculator: Arc::new(calculator),
        }
    }
}

/// JSON body extractor that rejects malformed bodies with the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
