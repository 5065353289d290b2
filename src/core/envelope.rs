use crate::core::stages::{PageRequest, PaginationWindow};
use crate::domain::model::{GolfCourse, PlayerInfo, Tournament};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const UNSUPPORTED_DATA_TYPE: &str = "지원하지 않는 데이터 타입입니다.";
pub const INVALID_FILTERS: &str = "필터 형식이 올바르지 않습니다.";
pub const INVALID_BODY: &str = "요청 본문이 올바른 JSON 형식이 아닙니다.";
pub const PIPELINE_FAILED: &str = "데이터 수집 중 오류가 발생했습니다.";

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentBlock {
    pub all: Vec<Tournament>,
    pub count: usize,
    pub total: usize,
    pub is_mock: bool,
    pub provenance: String,
    pub by_organizer: BTreeMap<String, usize>,
    pub pagination: PaginationWindow,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GolfCourseBlock {
    pub golf_courses: Vec<GolfCourse>,
    pub count: usize,
    pub total: usize,
    pub is_mock: bool,
    pub provenance: String,
    pub by_region: BTreeMap<String, usize>,
    pub by_source: BTreeMap<String, usize>,
    pub pagination: PaginationWindow,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBlock {
    pub players: Vec<PlayerInfo>,
    pub count: usize,
    pub total: usize,
    pub is_mock: bool,
    pub provenance: String,
    pub by_association: BTreeMap<String, usize>,
    pub errors: Vec<String>,
    pub pagination: PaginationWindow,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournaments: Option<TournamentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golf_courses: Option<GolfCourseBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<PlayerBlock>,
}

impl ViewData {
    pub fn domain_count(&self) -> usize {
        [
            self.tournaments.is_some(),
            self.golf_courses.is_some(),
            self.players.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopePagination {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_data_types: usize,
    pub total_records: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    pub timestamp: String,
    pub data: ViewData,
    pub pagination: EnvelopePagination,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseEnvelope {
    /// `running_total` 為各資料類型分頁後筆數的累加
    pub fn success(data: ViewData, page: PageRequest, running_total: usize) -> Self {
        let timestamp = timestamp();
        Self {
            success: true,
            summary: Summary {
                total_data_types: data.domain_count(),
                total_records: running_total,
                timestamp: timestamp.clone(),
            },
            timestamp,
            data,
            pagination: EnvelopePagination {
                limit: page.limit,
                offset: page.offset,
                total: running_total,
            },
            error: None,
            details: None,
        }
    }

    /// 整個流程失敗時的降級回應：所有資料類型皆為空清單
    pub fn degraded(page: PageRequest, details: impl Into<String>) -> Self {
        let empty = PaginationWindow::new(page, 0);
        let data = ViewData {
            tournaments: Some(TournamentBlock {
                all: Vec::new(),
                count: 0,
                total: 0,
                is_mock: true,
                provenance: "unavailable".to_string(),
                by_organizer: BTreeMap::new(),
                pagination: empty,
            }),
            golf_courses: Some(GolfCourseBlock {
                golf_courses: Vec::new(),
                count: 0,
                total: 0,
                is_mock: true,
                provenance: "unavailable".to_string(),
                by_region: BTreeMap::new(),
                by_source: BTreeMap::new(),
                pagination: empty,
            }),
            players: Some(PlayerBlock {
                players: Vec::new(),
                count: 0,
                total: 0,
                is_mock: true,
                provenance: "unavailable".to_string(),
                by_association: BTreeMap::new(),
                errors: Vec::new(),
                pagination: empty,
            }),
        };

        let mut envelope = Self::success(data, page, 0);
        envelope.success = false;
        envelope.error = Some(PIPELINE_FAILED.to_string());
        envelope.details = Some(details.into());
        envelope
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: timestamp(),
        }
    }
}
