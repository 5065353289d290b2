use crate::core::collectors::{GolfCourseCollector, PlayerCollector, TournamentCollector};
use crate::core::envelope::{
    timestamp, GolfCourseBlock, PlayerBlock, ResponseEnvelope, TournamentBlock, ViewData,
};
use crate::core::filter::{
    filter_golf_courses, filter_tournaments, parse_filters, FilterRequest, FilterResponse,
    FilterTarget, FilteredData, FilteredGolfCourses, FilteredTournaments, GolfCourseFilters,
    TournamentFilters,
};
use crate::core::gather::FallbackPolicy;
use crate::core::stages::{run_stages, Grouper, PageRequest};
use crate::domain::model::{CollectionResult, GolfCourse, PlayerInfo, StageOrder, Tournament};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

/// GET 模式要收集的資料類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    All,
    Tournaments,
    GolfCourses,
    Players,
}

impl ViewType {
    /// 無法辨識的值視為 `all`
    pub fn parse(value: &str) -> Self {
        match value {
            "tournaments" => ViewType::Tournaments,
            "golf-courses" => ViewType::GolfCourses,
            "players" => ViewType::Players,
            _ => ViewType::All,
        }
    }

    fn includes(&self, other: ViewType) -> bool {
        *self == ViewType::All || *self == other
    }
}

/// 原始查詢字串參數
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub mock: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRequest {
    pub view: ViewType,
    pub force_fallback: bool,
    pub page: PageRequest,
}

impl ViewRequest {
    pub fn from_query(query: &ViewQuery, default_limit: usize) -> Self {
        let view = query
            .data_type
            .as_deref()
            .map(ViewType::parse)
            .unwrap_or(ViewType::All);
        let force_fallback = query
            .mock
            .as_deref()
            .map(|m| matches!(m.trim(), "true" | "1"))
            .unwrap_or(false);
        let limit = parse_count(query.limit.as_deref()).unwrap_or(default_limit);
        let offset = parse_count(query.offset.as_deref()).unwrap_or(0);

        Self {
            view,
            force_fallback,
            page: PageRequest { limit, offset },
        }
    }
}

fn parse_count(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

/// POST 模式的失敗原因，由 HTTP 層決定狀態碼
#[derive(Debug)]
pub enum FilterFailure {
    UnsupportedDataType,
    InvalidFilters(String),
    Collection(EtlError),
}

pub struct DataViewService {
    tournaments: TournamentCollector,
    golf_courses: GolfCourseCollector,
    players: PlayerCollector,
    default_limit: usize,
    stage_order: StageOrder,
}

impl DataViewService {
    pub fn new(
        tournaments: TournamentCollector,
        golf_courses: GolfCourseCollector,
        players: PlayerCollector,
    ) -> Self {
        Self {
            tournaments,
            golf_courses,
            players,
            default_limit: 50,
            stage_order: StageOrder::default(),
        }
    }

    pub fn with_default_limit(mut self, default_limit: usize) -> Self {
        self.default_limit = default_limit;
        self
    }

    pub fn with_stage_order(mut self, stage_order: StageOrder) -> Self {
        self.stage_order = stage_order;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// GET：依序收集所選資料類型，分頁後組成回應
    ///
    /// 個別來源失敗會改用備援資料；只有備援資料本身無法建立時才回傳錯誤。
    pub async fn view(&self, request: ViewRequest) -> Result<ResponseEnvelope> {
        let page = request.page;
        let mut data = ViewData::default();
        // 累加的是各類型分頁後的筆數，而非完整總數
        let mut running_total = 0;

        if request.view.includes(ViewType::Tournaments) {
            let collected = if request.force_fallback {
                self.tournaments.collect_fallback()?
            } else {
                self.tournaments.collect(FallbackPolicy::AllOrNothing).await?
            };
            let block = self.tournament_block(collected, page);
            running_total += block.count;
            data.tournaments = Some(block);
        }

        if request.view.includes(ViewType::GolfCourses) {
            let collected = if request.force_fallback {
                self.golf_courses.collect_fallback()?
            } else {
                self.golf_courses.collect(FallbackPolicy::AllOrNothing).await?
            };
            let block = self.golf_course_block(collected, page);
            running_total += block.count;
            data.golf_courses = Some(block);
        }

        if request.view.includes(ViewType::Players) {
            let collected = if request.force_fallback {
                self.players.collect_fallback()?
            } else {
                self.players.collect(FallbackPolicy::PartialWithErrors).await?
            };
            let block = self.player_block(collected, page);
            running_total += block.count;
            data.players = Some(block);
        }

        tracing::info!(
            "✅ View {:?} built: {} data type(s), {} record(s) on page",
            request.view,
            data.domain_count(),
            running_total
        );

        Ok(ResponseEnvelope::success(data, page, running_total))
    }

    /// POST：重新收集單一資料類型並套用過濾條件，不使用備援資料
    pub async fn filter(&self, request: FilterRequest) -> std::result::Result<FilterResponse, FilterFailure> {
        let target = FilterTarget::parse(&request.data_type).ok_or(FilterFailure::UnsupportedDataType)?;

        let data = match target {
            FilterTarget::Tournaments => {
                let filters: TournamentFilters = parse_filters(request.filters)
                    .map_err(|e| FilterFailure::InvalidFilters(e.to_string()))?;
                let collected = self
                    .tournaments
                    .collect(FallbackPolicy::None)
                    .await
                    .map_err(FilterFailure::Collection)?;
                let tournaments = filter_tournaments(collected.items, &filters);
                FilteredData::Tournaments(FilteredTournaments {
                    count: tournaments.len(),
                    tournaments,
                    filters,
                })
            }
            FilterTarget::GolfCourses => {
                let filters: GolfCourseFilters = parse_filters(request.filters)
                    .map_err(|e| FilterFailure::InvalidFilters(e.to_string()))?;
                let collected = self
                    .golf_courses
                    .collect(FallbackPolicy::None)
                    .await
                    .map_err(FilterFailure::Collection)?;
                let golf_courses = filter_golf_courses(collected.items, &filters);
                FilteredData::GolfCourses(FilteredGolfCourses {
                    count: golf_courses.len(),
                    golf_courses,
                    filters,
                })
            }
        };

        Ok(FilterResponse {
            success: true,
            timestamp: timestamp(),
            data_type: target.as_str().to_string(),
            data,
        })
    }

    fn tournament_block(&self, collected: CollectionResult<Tournament>, page: PageRequest) -> TournamentBlock {
        let groupers: [Grouper<Tournament>; 1] = [("byOrganizer", |t| t.organizer.clone())];
        let staged = run_stages(&collected.items, page, self.stage_order, &groupers);

        TournamentBlock {
            count: staged.page.len(),
            total: staged.window.total,
            is_mock: collected.is_fallback,
            provenance: collected.provenance_tag,
            by_organizer: staged.group("byOrganizer"),
            pagination: staged.window,
            all: staged.page,
        }
    }

    fn golf_course_block(&self, collected: CollectionResult<GolfCourse>, page: PageRequest) -> GolfCourseBlock {
        let groupers: [Grouper<GolfCourse>; 2] = [
            ("byRegion", |c| c.region.clone()),
            ("bySource", |c| c.source.clone()),
        ];
        let staged = run_stages(&collected.items, page, self.stage_order, &groupers);

        GolfCourseBlock {
            count: staged.page.len(),
            total: staged.window.total,
            is_mock: collected.is_fallback,
            provenance: collected.provenance_tag,
            by_region: staged.group("byRegion"),
            by_source: staged.group("bySource"),
            pagination: staged.window,
            golf_courses: staged.page,
        }
    }

    fn player_block(&self, collected: CollectionResult<PlayerInfo>, page: PageRequest) -> PlayerBlock {
        let groupers: [Grouper<PlayerInfo>; 1] = [("byAssociation", |p| p.association.to_string())];
        let staged = run_stages(&collected.items, page, self.stage_order, &groupers);

        PlayerBlock {
            count: staged.page.len(),
            total: staged.window.total,
            is_mock: collected.is_fallback,
            provenance: collected.provenance_tag,
            by_association: staged.group("byAssociation"),
            errors: collected.errors,
            pagination: staged.window,
            players: staged.page,
        }
    }
}
