pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use self::toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "golf-etl")]
#[command(about = "Golf tournament, course and player data aggregation service")]
pub struct CliConfig {
    /// Path to TOML configuration file (built-in defaults are used if it does not exist)
    #[arg(short, long, default_value = "golf-etl.toml")]
    pub config: String,

    /// Override server.host from config
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port from config
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Validate configuration and exit")]
    pub check: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML 配置並套用命令列覆蓋設定
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = if std::path::Path::new(&self.config).exists() {
            tracing::info!("📁 Loading configuration from: {}", self.config);
            TomlConfig::from_file(&self.config)?
        } else {
            tracing::info!("📁 {} not found, using built-in defaults", self.config);
            TomlConfig::default()
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
            tracing::info!("🔧 server.host overridden to: {}", host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
            tracing::info!("🔧 server.port overridden to: {}", port);
        }

        Ok(config)
    }
}
