pub mod handlers;

use crate::core::aggregator::DataViewService;
use crate::utils::error::Result;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub service: DataViewService,
}

impl AppState {
    pub fn new(service: DataViewService) -> Arc<Self> {
        Arc::new(Self { service })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/data/view",
            get(handlers::view)
                .post(handlers::filter)
                .options(handlers::preflight),
        )
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        // method + path + status + latency only
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Golf data API listening on http://{}", addr);
    tracing::info!("📊 Data view endpoint: http://{}/api/data/view", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
