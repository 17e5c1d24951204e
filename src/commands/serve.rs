use anyhow::Result;
use llm_cost_calculator::{config::Config, server};
use tracing::info;

use super::build_calculator;

/// Execute the serve command
pub async fn execute(mut cfg: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        cfg.server.port = port;
    }

    let calculator = build_calculator(&cfg)?;
    info!("Price catalog loaded with {} models", calculator.catalog().len());

    server::start_server(cfg, calculator).await
}
