use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::Result;
use crate::ui::web::{AppState, handlers};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route(
            "/api/v1/model/performance",
            get(handlers::performance::performance),
        )
        .route(
            "/api/v1/risk-factors/importance",
            get(handlers::risk_factors::importance),
        )
        .route(
            "/api/v1/risk-factors/explore",
            post(handlers::risk_factors::explore),
        )
        .route("/api/v1/analysis/:view", get(handlers::analysis::view))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
