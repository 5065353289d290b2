// Adapters layer: concrete implementations for external systems (live sources over HTTP).

pub mod http;

use crate::core::aggregator::DataViewService;
use crate::core::collectors::{GolfCourseCollector, PlayerCollector, TournamentCollector};
use crate::core::fallback::FallbackData;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use self::http::{build_client, HttpGolfCourseSource, HttpPlayerSource, HttpTournamentSource};
use std::sync::Arc;

/// 依設定組裝 HTTP 來源、備援資料與收集器
pub fn build_service<C: ConfigProvider>(config: &C) -> Result<DataViewService> {
    let client = build_client(config.request_timeout())?;
    let fallback = match config.fallback_dir() {
        Some(dir) => FallbackData::from_dir(dir),
        None => FallbackData::builtin(),
    };

    let tournaments = TournamentCollector::new(
        Arc::new(HttpTournamentSource::new(client.clone(), config.tournament_endpoints())),
        fallback.clone(),
    );
    let golf_courses = GolfCourseCollector::new(
        Arc::new(HttpGolfCourseSource::new(
            client.clone(),
            config.golf_course_endpoints().to_vec(),
        )),
        fallback.clone(),
    );
    let players = PlayerCollector::new(
        Arc::new(HttpPlayerSource::new(
            client,
            config.player_endpoint().map(str::to_string),
        )),
        fallback,
        config.sample_players().to_vec(),
    );

    Ok(DataViewService::new(tournaments, golf_courses, players)
        .with_default_limit(config.default_limit())
        .with_stage_order(config.stage_order()))
}
