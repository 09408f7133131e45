use log::LevelFilter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug)]
pub struct LogConfig {
    pub file_path: String,
    pub archive_pattern: String,
    pub stderr_level: LevelFilter,
}

#[derive(Debug)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Games are kept in memory when unset.
    pub database_url: Option<String>,
    pub log: LogConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let port = required("RPS_HTTP_API_PORT")?;
        let http_port = port.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "RPS_HTTP_API_PORT",
            value: port,
        })?;

        let stderr_level = match lookup("RPS_LOG_LEVEL") {
            None => LevelFilter::Info,
            Some(level) => level.parse().map_err(|_| ConfigError::Invalid {
                name: "RPS_LOG_LEVEL",
                value: level,
            })?,
        };

        Ok(Self {
            http_port,
            database_url: lookup("RPS_DATABASE_URL").filter(|url| !url.trim().is_empty()),
            log: LogConfig {
                file_path: required("LOG_FILE_PATH")?,
                archive_pattern: required("LOG_ARCHIVE_PATTERN")?,
                stderr_level,
            },
        })
    }
}
