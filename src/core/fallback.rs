use crate::domain::model::{Association, CareerEntry, GolfCourse, PlayerInfo, Tournament};
use crate::utils::error::{EtlError, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const TOURNAMENTS_FILE: &str = "tournaments.json";
pub const GOLF_COURSES_FILE: &str = "golf_courses.csv";
pub const PLAYERS_FILE: &str = "players.json";

/// 來源失敗時使用的備援資料集
///
/// 未設定目錄時使用內建樣本；設定目錄後每次都從檔案讀取，
/// 讀取或解析失敗視為備援資料本身無法建立。
#[derive(Debug, Clone, Default)]
pub struct FallbackData {
    dir: Option<PathBuf>,
}

impl FallbackData {
    pub fn builtin() -> Self {
        Self { dir: None }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn tournaments(&self) -> Result<Vec<Tournament>> {
        match &self.dir {
            Some(dir) => non_empty(read_json(&dir.join(TOURNAMENTS_FILE), "tournaments")?, "tournaments", dir),
            None => Ok(builtin_tournaments()),
        }
    }

    pub fn golf_courses(&self) -> Result<Vec<GolfCourse>> {
        match &self.dir {
            Some(dir) => non_empty(read_courses_csv(&dir.join(GOLF_COURSES_FILE))?, "golfCourses", dir),
            None => Ok(builtin_golf_courses()),
        }
    }

    pub fn players(&self) -> Result<Vec<PlayerInfo>> {
        match &self.dir {
            Some(dir) => non_empty(read_json(&dir.join(PLAYERS_FILE), "players")?, "players", dir),
            None => Ok(vec![builtin_player()]),
        }
    }
}

/// 備援資料必須至少有一筆，否則回應會是標示為備援的空清單
fn non_empty<T>(items: Vec<T>, domain: &str, dir: &Path) -> Result<Vec<T>> {
    if items.is_empty() {
        return Err(EtlError::FallbackError {
            domain: domain.to_string(),
            message: format!("dataset in {} is empty", dir.display()),
        });
    }
    Ok(items)
}

fn read_json<T: DeserializeOwned>(path: &Path, domain: &str) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| EtlError::FallbackError {
        domain: domain.to_string(),
        message: format!("{}: {}", path.display(), e),
    })?;

    serde_json::from_str(&content).map_err(|e| EtlError::FallbackError {
        domain: domain.to_string(),
        message: format!("{}: {}", path.display(), e),
    })
}

fn read_courses_csv(path: &Path) -> Result<Vec<GolfCourse>> {
    let to_fallback_error = |e: csv::Error| EtlError::FallbackError {
        domain: "golfCourses".to_string(),
        message: format!("{}: {}", path.display(), e),
    };

    let mut reader = csv::Reader::from_path(path).map_err(to_fallback_error)?;
    let mut courses = Vec::new();
    for row in reader.deserialize() {
        courses.push(row.map_err(to_fallback_error)?);
    }

    tracing::debug!("Loaded {} fallback golf courses from {}", courses.len(), path.display());
    Ok(courses)
}

fn tournament(
    id: &str,
    name: &str,
    organizer: Association,
    category: &str,
    dates: (&str, &str),
    region: &str,
    location: &str,
) -> Tournament {
    Tournament {
        id: id.to_string(),
        name: name.to_string(),
        organizer: organizer.as_str().to_string(),
        category: category.to_string(),
        start_date: dates.0.to_string(),
        end_date: dates.1.to_string(),
        region: Some(region.to_string()),
        location: Some(location.to_string()),
        purse: None,
    }
}

pub fn builtin_tournaments() -> Vec<Tournament> {
    use Association::{Kpga, Klpga};

    vec![
        tournament("kpga-2024-01", "DB손해보험 프로미 오픈", Kpga, "정규투어", ("2024-04-18", "2024-04-21"), "강원", "강원 춘천"),
        tournament("kpga-2024-02", "GS칼텍스 매경오픈", Kpga, "메이저", ("2024-05-02", "2024-05-05"), "경기", "경기 성남"),
        tournament("kpga-2024-03", "KPGA 선수권대회", Kpga, "메이저", ("2024-06-06", "2024-06-09"), "경남", "경남 양산"),
        tournament("kpga-2024-04", "코오롱 한국오픈", Kpga, "메이저", ("2024-06-20", "2024-06-23"), "충남", "충남 천안"),
        tournament("kpga-2024-05", "제네시스 챔피언십", Kpga, "정규투어", ("2024-10-24", "2024-10-27"), "인천", "인천 연수"),
        tournament("klpga-2024-01", "KLPGA 챔피언십", Klpga, "메이저", ("2024-04-25", "2024-04-28"), "경기", "경기 포천"),
        tournament("klpga-2024-02", "한국여자오픈", Klpga, "메이저", ("2024-06-13", "2024-06-16"), "충북", "충북 음성"),
        tournament("klpga-2024-03", "제주삼다수 마스터스", Klpga, "정규투어", ("2024-08-01", "2024-08-04"), "제주", "제주 제주시"),
        tournament("klpga-2024-04", "KB금융 스타챔피언십", Klpga, "메이저", ("2024-09-05", "2024-09-08"), "경기", "경기 이천"),
        tournament("klpga-2023-01", "하이트진로 챔피언십", Klpga, "메이저", ("2023-10-05", "2023-10-08"), "경기", "경기 여주"),
    ]
}

fn course(id: &str, name: &str, region: &str, city: &str, address: &str, holes: u32) -> GolfCourse {
    GolfCourse {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        city: city.to_string(),
        source: "manual".to_string(),
        address: address.to_string(),
        phone: None,
        website: None,
        holes: Some(holes),
    }
}

pub fn builtin_golf_courses() -> Vec<GolfCourse> {
    vec![
        course("gc-001", "핀크스 골프클럽", "제주", "서귀포시", "제주특별자치도 서귀포시 안덕면", 27),
        course("gc-002", "나인브릿지", "제주", "서귀포시", "제주특별자치도 서귀포시 안덕면", 18),
        course("gc-003", "블랙스톤 제주", "제주", "제주시", "제주특별자치도 제주시 한림읍", 27),
        course("gc-004", "남서울 컨트리클럽", "경기", "성남시", "경기도 성남시 분당구", 18),
        course("gc-005", "레이크사이드 컨트리클럽", "경기", "용인시", "경기도 용인시 처인구", 54),
        course("gc-006", "오크밸리 컨트리클럽", "강원", "원주시", "강원특별자치도 원주시 지정면", 36),
        course("gc-007", "정산 컨트리클럽", "경남", "김해시", "경상남도 김해시 진례면", 27),
        course("gc-008", "우정힐스 컨트리클럽", "충남", "천안시", "충청남도 천안시 동남구", 18),
    ]
}

pub fn builtin_player() -> PlayerInfo {
    let mut ranking = BTreeMap::new();
    ranking.insert("prize".to_string(), 12);
    ranking.insert("points".to_string(), 15);

    PlayerInfo {
        member_id: "SAMPLE-001".to_string(),
        name: "샘플 선수".to_string(),
        association: Association::Kpga,
        birth: Some("1995-03-15".to_string()),
        career: vec![
            CareerEntry {
                year: 2023,
                title: "GS칼텍스 매경오픈".to_string(),
                result: "T5".to_string(),
                prize: Some("₩52,000,000".to_string()),
            },
            CareerEntry {
                year: 2024,
                title: "KPGA 선수권대회".to_string(),
                result: "T12".to_string(),
                prize: Some("₩18,500,000".to_string()),
            },
        ],
        ranking,
    }
}
