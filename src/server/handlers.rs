use crate::core::aggregator::{FilterFailure, ViewQuery, ViewRequest};
use crate::core::envelope::{
    ErrorBody, ResponseEnvelope, INVALID_BODY, INVALID_FILTERS, UNSUPPORTED_DATA_TYPE,
};
use crate::core::filter::FilterRequest;
use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// GET /api/data/view
pub async fn view(State(state): State<Arc<AppState>>, Query(query): Query<ViewQuery>) -> Response {
    let request = ViewRequest::from_query(&query, state.service.default_limit());
    tracing::debug!("View request: {:?}", request);

    match state.service.view(request).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(e) => {
            tracing::error!(
                "❌ Data view failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseEnvelope::degraded(request.page, e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /api/data/view
///
/// 本文自行解析：不要求 `Content-Type`，解析失敗也回傳 JSON 錯誤本文。
pub async fn filter(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let body: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("⚠️ Rejected filter request body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(format!("{} ({})", INVALID_BODY, e))),
            )
                .into_response();
        }
    };

    let request = FilterRequest::from_body(body);
    tracing::debug!("Filter request for data type '{}'", request.data_type);

    match state.service.filter(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(FilterFailure::UnsupportedDataType) => {
            (StatusCode::BAD_REQUEST, Json(ErrorBody::new(UNSUPPORTED_DATA_TYPE))).into_response()
        }
        Err(FilterFailure::InvalidFilters(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(format!("{} ({})", INVALID_FILTERS, message))),
        )
            .into_response(),
        Err(FilterFailure::Collection(e)) => {
            tracing::error!("❌ Filter collection failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(e.to_string()))).into_response()
        }
    }
}

/// OPTIONS /api/data/view
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}
