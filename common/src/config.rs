use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub etl: EtlConfig,
    #[serde(default)]
    pub queries: QueryConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EtlConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub on_parse_error: ParsePolicy,
}

/// What the extract reader does with a row it cannot coerce.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Abort the run on the first bad row. Nothing is written.
    #[default]
    Fail,
    /// Drop the row, log it and keep going.
    Skip,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    #[serde(default = "default_sql_dir")]
    pub sql_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            seed: default_seed(),
            on_parse_error: ParsePolicy::default(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            sql_dir: default_sql_dir(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("ecommerce.db")
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/ecommerce_dataset_10000.csv")
}

fn default_seed() -> u64 {
    42
}

fn default_sql_dir() -> PathBuf {
    PathBuf::from("sql")
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8050
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        Self::build(builder)
    }

    /// Parses settings from TOML text, still honouring `APP_*` overrides.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        debug!(
            database = %settings.database.path.display(),
            sql_dir = %settings.queries.sql_dir.display(),
            "Loaded settings"
        );

        Ok(settings)
    }
}
