pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::build_service;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::aggregator::{DataViewService, ViewRequest};
pub use crate::server::{router, AppState};
pub use crate::utils::error::{EtlError, Result};
