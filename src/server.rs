use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    pricing::CostCalculator,
};

/// Start the cost calculator API
///
/// Binds to the configured address and serves until SIGINT/SIGTERM,
/// draining in-flight requests before returning.
pub async fn start_server(config: Config, calculator: CostCalculator) -> Result<()> {
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting LLM cost calculator API on {}", addr);
    info!(
        "Configuration: {} catalog models, default model '{}'",
        calculator.catalog().len(),
        config.defaults.model
    );

    let app = create_router(AppState::new(config, calculator));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/v1/models", get(handlers::models::list_models))
        .route("/v1/estimate", post(handlers::estimate::handle_estimate))
        .route("/v1/compare", post(handlers::estimate::handle_compare))
        .route("/v1/sweep", post(handlers::estimate::handle_sweep))
        .route("/v1/breakdown", post(handlers::estimate::handle_breakdown))
        .route("/v1/report", post(handlers::estimate::handle_report))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(64 * 1024)),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to setup SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, initiating graceful shutdown"),
        _ = terminate => info!("SIGTERM received, initiating graceful shutdown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceCatalog;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_router(AppState::new(
            Config::default(),
            CostCalculator::new(Arc::new(PriceCatalog::builtin())),
        ))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_estimate_route() {
        let body = r#"{"model": "OpenAPI GPT4", "usage": {"num_users": 2000, "requests_per_month": 150, "avg_tokens_input": 500, "avg_tokens_output": 200}}"#;
        let response = test_app()
            .oneshot(post_json("/v1/estimate", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let total = json["estimate"]["total_monthly_cost"].as_f64().unwrap();
        assert!((total - 8100.0).abs() < 1e-6);
        assert_eq!(json["model"], "OpenAPI GPT4");
    }

    #[tokio::test]
    async fn test_unknown_model_is_404() {
        let response = test_app()
            .oneshot(post_json("/v1/estimate", r#"{"model": "gpt-5"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "model_not_found");
    }

    #[tokio::test]
    async fn test_compare_route_with_empty_body() {
        let response = test_app()
            .oneshot(post_json("/v1/compare", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_sweep_range_is_400() {
        let body = r#"{"range": {"start": 100, "end": 1000, "step": 0}}"#;
        let response = test_app()
            .oneshot(post_json("/v1/sweep", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_sweep_is_400() {
        let body = r#"{"range": {"start": 1, "end": 2000000, "step": 1}}"#;
        let response = test_app()
            .oneshot(post_json("/v1/sweep", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "invalid_argument");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let body = r#"{"usage": {"num_users": -5}}"#;
        let response = test_app()
            .oneshot(post_json("/v1/estimate", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "invalid_argument");
        assert!(json["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_report_route() {
        let response = test_app()
            .oneshot(post_json("/v1/report", r#"{"model": "Claude3 Haiku"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["selected"]["model"], "Claude3 Haiku");
        assert_eq!(json["evolution"].as_array().unwrap().len(), 66);
    }
}
