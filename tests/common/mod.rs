#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use golf_etl::config::toml_config::TournamentSourceConfig;
use golf_etl::domain::model::{Association, SampleMember};
use golf_etl::{build_service, router, AppState, TomlConfig};
use httpmock::MockServer;
use serde_json::Value;
use tower::ServiceExt;

/// 所有來源都指向 mock server 的配置
pub fn config_for(server: &MockServer) -> TomlConfig {
    let mut config = TomlConfig::default();
    config.sources.request_timeout_seconds = 5;
    config.sources.tournaments = vec![
        TournamentSourceConfig {
            association: Association::Kpga,
            endpoint: Some(server.url("/kpga/tournaments")),
        },
        TournamentSourceConfig {
            association: Association::Klpga,
            endpoint: Some(server.url("/klpga/tournaments")),
        },
    ];
    config.sources.golf_course_endpoints = vec![server.url("/golf-courses")];
    config.sources.player_endpoint = Some(format!("{}/players/{{memberId}}", server.base_url()));
    config.sample_players = vec![
        SampleMember::new("K0001", Association::Kpga),
        SampleMember::new("K0002", Association::Kpga),
        SampleMember::new("L0001", Association::Klpga),
        SampleMember::new("L0002", Association::Klpga),
    ];
    config
}

pub fn app(config: &TomlConfig) -> Router {
    let service = build_service(config).expect("service should build");
    router(AppState::new(service))
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let is_json = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let body = if is_json {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    } else {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    };
    (status, headers, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub fn tournament(id: &str, organizer: &str, category: &str, start_date: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": format!("{} 대회", id),
        "organizer": organizer,
        "category": category,
        "startDate": start_date,
        "endDate": start_date,
        "region": "경기"
    })
}

pub fn course(id: &str, name: &str, region: &str, city: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "region": region,
        "city": city,
        "source": "public-data"
    })
}
