use crate::core::stages::dedup_by_key;
use crate::domain::model::{Association, GolfCourse, PlayerInfo, SampleMember, Tournament};
use crate::domain::ports::{GolfCourseSource, PlayerSource, TournamentSource};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

async fn get_json(client: &Client, source_name: &str, endpoint: &str) -> Result<Value> {
    tracing::debug!("Making API request to: {}", endpoint);
    let response = client.get(endpoint).send().await?;
    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if !status.is_success() {
        return Err(EtlError::source_error(
            source_name,
            format!("HTTP {} from {}", status, endpoint),
        ));
    }

    Ok(response.json().await?)
}

/// 取出清單本體：接受陣列，或以 `data` / `items` 包裝的物件
fn unwrap_payload(value: Value) -> Value {
    match value {
        Value::Object(mut obj) => {
            if let Some(inner) = obj.remove("data") {
                inner
            } else if let Some(inner) = obj.remove("items") {
                inner
            } else {
                Value::Object(obj)
            }
        }
        other => other,
    }
}

fn parse_list<T: DeserializeOwned>(source_name: &str, value: Value) -> Result<Vec<T>> {
    match unwrap_payload(value) {
        list @ Value::Array(_) => Ok(serde_json::from_value(list)?),
        other => Err(EtlError::source_error(
            source_name,
            format!("expected a JSON array, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct HttpTournamentSource {
    client: Client,
    endpoints: Vec<(Association, Option<String>)>,
}

impl HttpTournamentSource {
    pub fn new(client: Client, endpoints: Vec<(Association, Option<String>)>) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl TournamentSource for HttpTournamentSource {
    fn associations(&self) -> Vec<Association> {
        self.endpoints.iter().map(|(association, _)| *association).collect()
    }

    async fn fetch(&self, association: Association) -> Result<Vec<Tournament>> {
        let endpoint = self
            .endpoints
            .iter()
            .find(|(a, _)| *a == association)
            .and_then(|(_, endpoint)| endpoint.as_deref())
            .ok_or_else(|| EtlError::MissingConfigError {
                field: format!("sources.tournaments[{}].endpoint", association),
            })?;

        let payload = get_json(&self.client, association.as_str(), endpoint).await?;
        let mut tournaments: Vec<Tournament> = parse_list(association.as_str(), payload)?;

        // 來源未標示主辦單位時以協會補上
        for tournament in &mut tournaments {
            if tournament.organizer.is_empty() {
                tournament.organizer = association.to_string();
            }
        }

        tracing::debug!("📡 {}: {} tournament(s)", association, tournaments.len());
        Ok(tournaments)
    }
}

pub struct HttpGolfCourseSource {
    client: Client,
    endpoints: Vec<String>,
}

impl HttpGolfCourseSource {
    pub fn new(client: Client, endpoints: Vec<String>) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl GolfCourseSource for HttpGolfCourseSource {
    /// 依序抓取所有端點，合併後以名稱與城市去重
    async fn fetch_all(&self) -> Result<Vec<GolfCourse>> {
        if self.endpoints.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "sources.golf_course_endpoints".to_string(),
            });
        }

        let mut courses = Vec::new();
        for endpoint in &self.endpoints {
            let payload = get_json(&self.client, "golf-courses", endpoint).await?;
            let batch: Vec<GolfCourse> = parse_list("golf-courses", payload)?;
            tracing::debug!("📡 {}: {} course(s)", endpoint, batch.len());
            courses.extend(batch);
        }

        let before = courses.len();
        let courses = dedup_by_key(courses, GolfCourse::dedup_key);
        if courses.len() < before {
            tracing::debug!("Removed {} duplicate course(s)", before - courses.len());
        }

        Ok(courses)
    }
}

/// 百分比編碼單一路徑或查詢片段；空白編為 `%20`
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub struct HttpPlayerSource {
    client: Client,
    endpoint_template: Option<String>,
}

impl HttpPlayerSource {
    pub fn new(client: Client, endpoint_template: Option<String>) -> Self {
        Self {
            client,
            endpoint_template,
        }
    }

    fn build_endpoint(&self, member: &SampleMember) -> Result<String> {
        let template = self
            .endpoint_template
            .as_deref()
            .ok_or_else(|| EtlError::MissingConfigError {
                field: "sources.player_endpoint".to_string(),
            })?;

        let endpoint = template
            .replace("{memberId}", &encode_component(&member.id))
            .replace("{association}", member.association.as_str());

        if endpoint.contains('{') && endpoint.contains('}') {
            return Err(EtlError::ProcessingError {
                message: format!("Unresolved parameters in endpoint: {}", endpoint),
            });
        }

        Ok(endpoint)
    }
}

#[async_trait]
impl PlayerSource for HttpPlayerSource {
    async fn lookup(&self, member: &SampleMember) -> Result<PlayerInfo> {
        let endpoint = self.build_endpoint(member)?;
        let payload = get_json(&self.client, "players", &endpoint).await?;

        match unwrap_payload(payload) {
            obj @ Value::Object(_) => Ok(serde_json::from_value(obj)?),
            other => Err(EtlError::source_error(
                "players",
                format!("expected a JSON object for {}, got {}", member.id, json_kind(&other)),
            )),
        }
    }
}
