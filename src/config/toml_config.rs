use crate::domain::model::{Association, SampleMember, StageOrder};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_endpoint_template, validate_non_empty_string, validate_path, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default = "default_sample_players")]
    pub sample_players: Vec<SampleMember>,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_tournament_sources")]
    pub tournaments: Vec<TournamentSourceConfig>,
    #[serde(default)]
    pub golf_course_endpoints: Vec<String>,
    pub player_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSourceConfig {
    pub association: Association,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default)]
    pub stage_order: StageOrder,
    pub fallback_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_limit() -> usize {
    50
}

fn default_tournament_sources() -> Vec<TournamentSourceConfig> {
    Association::ALL
        .iter()
        .map(|association| TournamentSourceConfig {
            association: *association,
            endpoint: None,
        })
        .collect()
}

fn default_sample_players() -> Vec<SampleMember> {
    vec![
        SampleMember::new("K0001", Association::Kpga),
        SampleMember::new("K0002", Association::Kpga),
        SampleMember::new("L0001", Association::Klpga),
        SampleMember::new("L0002", Association::Klpga),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_timeout_seconds(),
            tournaments: default_tournament_sources(),
            golf_course_endpoints: Vec::new(),
            player_endpoint: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            stage_order: StageOrder::default(),
            fallback_dir: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            sources: SourcesConfig::default(),
            sample_players: default_sample_players(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${KPGA_ENDPOINT})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_range(
            "sources.request_timeout_seconds",
            self.sources.request_timeout_seconds,
            1,
            300,
        )?;

        let mut seen = HashSet::new();
        for source in &self.sources.tournaments {
            if !seen.insert(source.association) {
                return Err(EtlError::InvalidConfigValueError {
                    field: "sources.tournaments".to_string(),
                    value: source.association.to_string(),
                    reason: "Association configured more than once".to_string(),
                });
            }
            if let Some(endpoint) = &source.endpoint {
                validate_url(&format!("sources.tournaments[{}].endpoint", source.association), endpoint)?;
            }
        }

        for endpoint in &self.sources.golf_course_endpoints {
            validate_url("sources.golf_course_endpoints", endpoint)?;
        }

        if let Some(template) = &self.sources.player_endpoint {
            validate_endpoint_template("sources.player_endpoint", template)?;
        }

        for member in &self.sample_players {
            validate_non_empty_string("sample_players.id", &member.id)?;
        }

        validate_range("pipeline.default_limit", self.pipeline.default_limit, 1, 1000)?;

        if let Some(dir) = &self.pipeline.fallback_dir {
            validate_path("pipeline.fallback_dir", dir)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.sources.request_timeout_seconds)
    }

    fn tournament_endpoints(&self) -> Vec<(Association, Option<String>)> {
        self.sources
            .tournaments
            .iter()
            .map(|s| (s.association, s.endpoint.clone()))
            .collect()
    }

    fn golf_course_endpoints(&self) -> &[String] {
        &self.sources.golf_course_endpoints
    }

    fn player_endpoint(&self) -> Option<&str> {
        self.sources.player_endpoint.as_deref()
    }

    fn sample_players(&self) -> &[SampleMember] {
        &self.sample_players
    }

    fn default_limit(&self) -> usize {
        self.pipeline.default_limit
    }

    fn stage_order(&self) -> StageOrder {
        self.pipeline.stage_order
    }

    fn fallback_dir(&self) -> Option<&str> {
        self.pipeline.fallback_dir.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
