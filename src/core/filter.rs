use crate::domain::model::{GolfCourse, Tournament};
use serde::{Deserialize, Deserializer, Serialize};

/// POST 模式可查詢的資料類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    Tournaments,
    GolfCourses,
}

impl FilterTarget {
    pub fn parse(data_type: &str) -> Option<Self> {
        match data_type {
            "tournaments" => Some(FilterTarget::Tournaments),
            "golf-courses" => Some(FilterTarget::GolfCourses),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterTarget::Tournaments => "tournaments",
            FilterTarget::GolfCourses => "golf-courses",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterRequest {
    pub data_type: String,
    pub filters: serde_json::Value,
}

impl FilterRequest {
    /// 從 POST 本文取出 `dataType` 與 `filters`
    ///
    /// `dataType` 缺少或不是字串時視為空字串，交由 `FilterTarget::parse` 判定為不支援。
    pub fn from_body(body: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut obj) = body else {
            return Self::default();
        };

        let data_type = match obj.remove("dataType") {
            Some(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };

        Self {
            data_type,
            filters: obj.remove("filters").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GolfCourseFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// `null` 或缺少 `filters` 視為不過濾
pub fn parse_filters<T>(value: serde_json::Value) -> serde_json::Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if value.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(value)
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Year>::deserialize(deserializer)?.map(|year| match year {
        Year::Number(n) => n.to_string(),
        Year::Text(s) => s.trim().to_string(),
    }))
}

/// 依序套用主辦單位、類別、年份條件（皆需符合）
pub fn filter_tournaments(items: Vec<Tournament>, filters: &TournamentFilters) -> Vec<Tournament> {
    let mut result = items;

    if let Some(organizer) = &filters.organizer {
        result.retain(|t| &t.organizer == organizer);
    }
    if let Some(category) = &filters.category {
        result.retain(|t| &t.category == category);
    }
    if let Some(year) = &filters.year {
        let wanted: Option<i32> = year.parse().ok();
        result.retain(|t| wanted.is_some() && t.year() == wanted);
    }

    result
}

pub fn filter_golf_courses(items: Vec<GolfCourse>, filters: &GolfCourseFilters) -> Vec<GolfCourse> {
    let mut result = items;

    if let Some(region) = &filters.region {
        result.retain(|c| &c.region == region);
    }
    if let Some(city) = &filters.city {
        result.retain(|c| &c.city == city);
    }
    if let Some(source) = &filters.source {
        result.retain(|c| &c.source == source);
    }

    result
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredTournaments {
    pub tournaments: Vec<Tournament>,
    pub count: usize,
    pub filters: TournamentFilters,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredGolfCourses {
    pub golf_courses: Vec<GolfCourse>,
    pub count: usize,
    pub filters: GolfCourseFilters,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FilteredData {
    Tournaments(FilteredTournaments),
    GolfCourses(FilteredGolfCourses),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    pub success: bool,
    pub timestamp: String,
    pub data_type: String,
    pub data: FilteredData,
}
