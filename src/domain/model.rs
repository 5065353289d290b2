use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 兩個職業協會
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Association {
    #[serde(rename = "KPGA")]
    Kpga,
    #[serde(rename = "KLPGA")]
    Klpga,
}

impl Association {
    pub const ALL: [Association; 2] = [Association::Kpga, Association::Klpga];

    pub fn as_str(&self) -> &'static str {
        match self {
            Association::Kpga => "KPGA",
            Association::Klpga => "KLPGA",
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Association {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KPGA" => Ok(Association::Kpga),
            "KLPGA" => Ok(Association::Klpga),
            other => Err(format!("unknown association: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub organizer: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purse: Option<String>,
}

impl Tournament {
    /// 開始日期的年份部分（`YYYY-MM-DD` 或 `YYYY.MM.DD`）
    pub fn year(&self) -> Option<i32> {
        self.start_date.get(..4).and_then(|y| y.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GolfCourse {
    pub id: String,
    pub name: String,
    pub region: String,
    pub city: String,
    pub source: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holes: Option<u32>,
}

impl GolfCourse {
    /// 去重用的鍵：名稱去空白後與城市組合
    pub fn dedup_key(&self) -> (String, String) {
        let name: String = self.name.chars().filter(|c| !c.is_whitespace()).collect();
        (name.to_lowercase(), self.city.trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntry {
    pub year: i32,
    pub title: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub member_id: String,
    pub name: String,
    pub association: Association,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(default)]
    pub career: Vec<CareerEntry>,
    #[serde(default)]
    pub ranking: BTreeMap<String, u32>,
}

/// 球員查詢用的樣本會員
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMember {
    pub id: String,
    pub association: Association,
}

impl SampleMember {
    pub fn new(id: impl Into<String>, association: Association) -> Self {
        Self {
            id: id.into(),
            association,
        }
    }
}

/// 收集器產出的結果，回傳後不再變動
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub is_fallback: bool,
    pub provenance_tag: String,
    pub errors: Vec<String>,
}

impl<T> CollectionResult<T> {
    pub fn live(items: Vec<T>, provenance_tag: impl Into<String>) -> Self {
        let total = items.len();
        Self {
            items,
            total,
            is_fallback: false,
            provenance_tag: provenance_tag.into(),
            errors: Vec::new(),
        }
    }

    pub fn fallback(items: Vec<T>, errors: Vec<String>) -> Self {
        let total = items.len();
        Self {
            items,
            total,
            is_fallback: true,
            provenance_tag: FALLBACK_TAG.to_string(),
            errors,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

pub const FALLBACK_TAG: &str = "static-sample";

/// 分組統計與分頁兩個階段的執行順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageOrder {
    /// 先切頁再統計：統計只涵蓋當前頁
    #[default]
    PaginateThenAggregate,
    /// 先統計完整清單再切頁
    AggregateThenPaginate,
}
