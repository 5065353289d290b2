mod common;

use common::{app, config_for, course, get, tournament};
use golf_etl::domain::model::StageOrder;
use golf_etl::TomlConfig;
use anyhow::Result;
use httpmock::prelude::*;
use serde_json::{json, Value};

async fn mock_live_tournaments(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/kpga/tournaments");
            then.status(200).json_body(json!([
                tournament("k1", "KPGA", "메이저", "2024-05-02"),
                tournament("k2", "KPGA", "정규투어", "2024-06-20"),
                tournament("k3", "KPGA", "정규투어", "2023-09-01")
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/klpga/tournaments");
            then.status(200).json_body(json!({
                "data": [
                    tournament("l1", "KLPGA", "메이저", "2024-04-25"),
                    tournament("l2", "KLPGA", "메이저", "2024-06-13"),
                    tournament("l3", "KLPGA", "정규투어", "2024-08-01"),
                    tournament("l4", "KLPGA", "정규투어", "2023-10-05")
                ]
            }));
        })
        .await;
}

fn pagination_is_consistent(block: &Value) {
    let items_key = ["all", "golfCourses", "players"]
        .into_iter()
        .find(|k| block.get(*k).is_some())
        .expect("block has an item list");
    let len = block[items_key].as_array().unwrap().len() as u64;
    let p = &block["pagination"];

    assert_eq!(block["count"].as_u64().unwrap(), len);
    assert!(len <= p["limit"].as_u64().unwrap());
    assert_eq!(
        p["hasMore"].as_bool().unwrap(),
        p["offset"].as_u64().unwrap() + p["limit"].as_u64().unwrap() < p["total"].as_u64().unwrap()
    );
}

#[tokio::test]
async fn test_all_view_with_no_sources_configured_uses_fallback_everywhere() {
    let (status, headers, body) = get(app(&TomlConfig::default()), "/api/data/view").await;

    assert_eq!(status, 200);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(body["success"], true);

    let data = &body["data"];
    for key in ["tournaments", "golfCourses", "players"] {
        assert_eq!(data[key]["isMock"], true, "{} should be fallback", key);
        assert_eq!(data[key]["provenance"], "static-sample");
        pagination_is_consistent(&data[key]);
    }

    assert_eq!(data["tournaments"]["total"], 10);
    assert_eq!(data["golfCourses"]["total"], 8);
    assert_eq!(data["players"]["total"], 1);
    assert_eq!(data["players"]["players"][0]["memberId"], "SAMPLE-001");
    assert_eq!(body["summary"]["totalDataTypes"], 3);
}

#[tokio::test]
async fn test_envelope_total_accumulates_page_sizes_not_full_totals() {
    let (status, _, body) = get(app(&TomlConfig::default()), "/api/data/view?type=all&limit=2").await;

    assert_eq!(status, 200);
    let data = &body["data"];
    assert_eq!(data["tournaments"]["count"], 2);
    assert_eq!(data["tournaments"]["pagination"]["total"], 10);
    assert_eq!(data["tournaments"]["pagination"]["hasMore"], true);
    assert_eq!(data["golfCourses"]["count"], 2);
    assert_eq!(data["players"]["count"], 1);

    // 2 + 2 + 1
    assert_eq!(body["pagination"]["total"], 5);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["summary"]["totalRecords"], 5);
}

#[tokio::test]
async fn test_players_all_failing_returns_single_fallback_player() {
    // 沒有任何 mock 符合 /players/*，每次查詢都會拿到 404
    let server = MockServer::start_async().await;
    let config = config_for(&server);

    let (status, _, body) = get(app(&config), "/api/data/view?type=players&limit=2").await;

    assert_eq!(status, 200);
    let players = &body["data"]["players"];
    assert_eq!(players["isMock"], true);
    assert_eq!(players["count"], 1);
    assert_eq!(players["players"].as_array().unwrap().len(), 1);
    assert_eq!(players["pagination"]["total"], 1);
    assert_eq!(players["pagination"]["hasMore"], false);
    assert_eq!(players["errors"].as_array().unwrap().len(), 4);
    assert!(body["data"].get("tournaments").is_none());
    assert!(body["data"].get("golfCourses").is_none());
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_players_partial_success_keeps_live_records_and_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/players/L0001");
            then.status(200).json_body(json!({
                "memberId": "L0001",
                "name": "라이브 선수",
                "association": "KLPGA"
            }));
        })
        .await;

    let (status, _, body) = get(app(&config_for(&server)), "/api/data/view?type=players").await;

    assert_eq!(status, 200);
    let players = &body["data"]["players"];
    assert_eq!(players["isMock"], false);
    assert_eq!(players["count"], 1);
    assert_eq!(players["players"][0]["memberId"], "L0001");
    assert_eq!(players["byAssociation"]["KLPGA"], 1);
    assert_eq!(players["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_live_tournaments_are_paginated_and_grouped() {
    let server = MockServer::start_async().await;
    mock_live_tournaments(&server).await;

    let (status, _, body) = get(app(&config_for(&server)), "/api/data/view?type=tournaments&limit=10").await;

    assert_eq!(status, 200);
    let block = &body["data"]["tournaments"];
    assert_eq!(block["isMock"], false);
    assert_eq!(block["provenance"], "live:KPGA+KLPGA");
    assert_eq!(block["all"].as_array().unwrap().len(), 7);
    assert_eq!(block["total"], 7);
    assert_eq!(block["pagination"]["hasMore"], false);
    assert_eq!(block["byOrganizer"], json!({"KLPGA": 4, "KPGA": 3}));
    assert_eq!(block["all"][0]["id"], "k1");
    assert_eq!(block["all"][3]["id"], "l1");
    pagination_is_consistent(block);
}

#[tokio::test]
async fn test_one_failing_association_discards_all_live_tournaments() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/kpga/tournaments");
            then.status(200)
                .json_body(json!([tournament("k1", "KPGA", "메이저", "2024-05-02")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/klpga/tournaments");
            then.status(502);
        })
        .await;

    let (status, _, body) = get(app(&config_for(&server)), "/api/data/view?type=tournaments").await;

    assert_eq!(status, 200);
    let block = &body["data"]["tournaments"];
    assert_eq!(block["isMock"], true);
    assert_eq!(block["total"], 10);
    assert!(block["all"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["id"] != "k1"));
}

#[tokio::test]
async fn test_offset_past_end_yields_empty_page() {
    let (status, _, body) =
        get(app(&TomlConfig::default()), "/api/data/view?type=golf-courses&limit=5&offset=20").await;

    assert_eq!(status, 200);
    let block = &body["data"]["golfCourses"];
    assert_eq!(block["count"], 0);
    assert_eq!(block["total"], 8);
    assert_eq!(block["pagination"]["hasMore"], false);
    assert!(block["byRegion"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_unparseable_query_values_fall_back_to_defaults() {
    let mut config = TomlConfig::default();
    config.pipeline.default_limit = 3;

    let (status, _, body) =
        get(app(&config), "/api/data/view?type=caddies&limit=abc&offset=-1").await;

    assert_eq!(status, 200);
    assert_eq!(body["summary"]["totalDataTypes"], 3);
    assert_eq!(body["pagination"]["limit"], 3);
    assert_eq!(body["pagination"]["offset"], 0);
    assert_eq!(body["data"]["tournaments"]["count"], 3);
}

#[tokio::test]
async fn test_mock_flag_skips_live_sources() {
    let server = MockServer::start_async().await;
    let kpga = server
        .mock_async(|when, then| {
            when.method(GET).path("/kpga/tournaments");
            then.status(200).json_body(json!([]));
        })
        .await;
    let courses = server
        .mock_async(|when, then| {
            when.method(GET).path("/golf-courses");
            then.status(200).json_body(json!([]));
        })
        .await;

    let (status, _, body) = get(app(&config_for(&server)), "/api/data/view?mock=true").await;

    assert_eq!(status, 200);
    assert_eq!(kpga.hits_async().await, 0);
    assert_eq!(courses.hits_async().await, 0);
    for key in ["tournaments", "golfCourses", "players"] {
        assert_eq!(body["data"][key]["isMock"], true);
    }
}

#[tokio::test]
async fn test_repeated_views_are_identical_apart_from_timestamps() {
    let server = MockServer::start_async().await;
    mock_live_tournaments(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/golf-courses");
            then.status(200).json_body(json!([
                course("c1", "핀크스", "제주", "서귀포시"),
                course("c2", "남서울", "경기", "성남시")
            ]));
        })
        .await;

    let config = config_for(&server);
    let (_, _, mut first) = get(app(&config), "/api/data/view?limit=4").await;
    let (_, _, mut second) = get(app(&config), "/api/data/view?limit=4").await;

    for body in [&mut first, &mut second] {
        let obj = body.as_object_mut().unwrap();
        obj.remove("timestamp");
        obj["summary"].as_object_mut().unwrap().remove("timestamp");
    }
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_broken_fallback_directory_yields_degraded_500() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = TomlConfig::default();
    config.pipeline.fallback_dir = Some(dir.path().to_string_lossy().into_owned());

    let (status, headers, body) = get(app(&config), "/api/data/view?limit=7").await;

    assert_eq!(status, 500);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "데이터 수집 중 오류가 발생했습니다.");
    assert!(body["details"].as_str().unwrap().contains("tournaments.json"));
    assert_eq!(body["data"]["tournaments"]["all"], json!([]));
    assert_eq!(body["data"]["golfCourses"]["golfCourses"], json!([]));
    assert_eq!(body["data"]["players"]["players"], json!([]));
    assert_eq!(body["pagination"]["limit"], 7);
    assert_eq!(body["pagination"]["total"], 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_fallback_dataset_is_a_pipeline_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("tournaments.json"), "[]")?;

    let mut config = TomlConfig::default();
    config.pipeline.fallback_dir = Some(dir.path().to_string_lossy().into_owned());

    let (status, _, body) = get(app(&config), "/api/data/view?type=tournaments").await;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    assert!(body["details"].as_str().unwrap().contains("is empty"));
    assert_eq!(body["data"]["tournaments"]["all"], json!([]));
    Ok(())
}

#[tokio::test]
async fn test_fallback_directory_supplies_datasets() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("tournaments.json"),
        json!([tournament("f1", "KPGA", "메이저", "2022-05-01")]).to_string(),
    )?;
    std::fs::write(
        dir.path().join("golf_courses.csv"),
        "id,name,region,city,source,address\nf-c1,파일 골프장,전남,순천시,file,전라남도 순천시\n",
    )?;
    std::fs::write(
        dir.path().join("players.json"),
        json!([{"memberId": "FILE-1", "name": "파일 선수", "association": "KLPGA"}]).to_string(),
    )?;

    let mut config = TomlConfig::default();
    config.pipeline.fallback_dir = Some(dir.path().to_string_lossy().into_owned());

    let (status, _, body) = get(app(&config), "/api/data/view").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["tournaments"]["all"][0]["id"], "f1");
    assert_eq!(body["data"]["golfCourses"]["golfCourses"][0]["city"], "순천시");
    assert_eq!(body["data"]["players"]["players"][0]["memberId"], "FILE-1");
    assert_eq!(body["pagination"]["total"], 3);
    Ok(())
}

#[tokio::test]
async fn test_aggregate_then_paginate_groups_the_full_set() {
    let mut config = TomlConfig::default();
    config.pipeline.stage_order = StageOrder::AggregateThenPaginate;

    let (_, _, body) = get(app(&config), "/api/data/view?type=golf-courses&limit=2").await;
    let by_region = &body["data"]["golfCourses"]["byRegion"];
    let grouped: u64 = by_region.as_object().unwrap().values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(grouped, 8);
    assert_eq!(by_region["제주"], 3);

    let (_, _, body) =
        get(app(&TomlConfig::default()), "/api/data/view?type=golf-courses&limit=2").await;
    let by_region = &body["data"]["golfCourses"]["byRegion"];
    let grouped: u64 = by_region.as_object().unwrap().values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(grouped, 2);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, _, body) = get(app(&TomlConfig::default()), "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
}
