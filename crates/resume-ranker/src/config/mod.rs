use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::candidates::{ExperienceFallback, SortKey};

const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ranking: RankingSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ranking: RankingSettings::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Extraction and ranking knobs exposed through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingSettings {
    pub experience_fallback: ExperienceFallback,
    pub default_sort: SortKey,
    pub preview_chars: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            experience_fallback: ExperienceFallback::NotStated,
            default_sort: SortKey::Score,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl RankingSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let experience_fallback = match env::var("RANKER_EXPERIENCE_FALLBACK") {
            Ok(raw) => raw
                .parse::<ExperienceFallback>()
                .map_err(|_| ConfigError::InvalidExperienceFallback(raw))?,
            Err(_) => defaults.experience_fallback,
        };

        let default_sort = match env::var("RANKER_DEFAULT_SORT") {
            Ok(raw) => raw
                .parse::<SortKey>()
                .map_err(|_| ConfigError::InvalidSortKey(raw))?,
            Err(_) => defaults.default_sort,
        };

        let preview_chars = match env::var("RANKER_PREVIEW_CHARS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidPreviewChars)?,
            Err(_) => defaults.preview_chars,
        };

        Ok(Self {
            experience_fallback,
            default_sort,
            preview_chars,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidExperienceFallback(String),
    InvalidSortKey(String),
    InvalidPreviewChars,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidExperienceFallback(value) => write!(
                f,
                "RANKER_EXPERIENCE_FALLBACK must be 'not_stated' or 'legacy_random', got '{value}'"
            ),
            ConfigError::InvalidSortKey(value) => write!(
                f,
                "RANKER_DEFAULT_SORT must be 'score', 'experience' or 'education', got '{value}'"
            ),
            ConfigError::InvalidPreviewChars => {
                write!(f, "RANKER_PREVIEW_CHARS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
