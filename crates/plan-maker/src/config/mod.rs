use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::workflows::planning::generator::GeneratorConfig;
use crate::workflows::planning::novelty::NoveltyConfig;

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
    pub planning: PlanningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            planning: PlanningConfig::from_env()?,
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

/// Where plans are stored, which writer drafts them, and how strict the novelty filter is.
#[derive(Debug, Clone)]
pub struct PlanningConfig {
    pub output_dir: PathBuf,
    pub llm_command: String,
    pub llm_timeout: Duration,
    pub generator: GeneratorConfig,
}

impl PlanningConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = GeneratorConfig::default();
        let novelty = NoveltyConfig {
            title_similarity: number_var(
                "PLAN_TITLE_SIMILARITY",
                defaults.novelty.title_similarity,
            )?,
            tag_overlap: number_var("PLAN_TAG_OVERLAP", defaults.novelty.tag_overlap)?,
            theme_similarity: number_var(
                "PLAN_THEME_SIMILARITY",
                defaults.novelty.theme_similarity,
            )?,
            ..defaults.novelty
        };

        Ok(Self {
            output_dir: env::var("PLAN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
            llm_command: env::var("PLAN_LLM_COMMAND").unwrap_or_else(|_| "claude".to_string()),
            llm_timeout: Duration::from_secs(number_var("PLAN_LLM_TIMEOUT_SECS", 120)?),
            generator: GeneratorConfig {
                theme_attempts: number_var("PLAN_THEME_ATTEMPTS", defaults.theme_attempts)?,
                duplicate_retries: number_var(
                    "PLAN_DUPLICATE_RETRIES",
                    defaults.duplicate_retries,
                )?,
                novelty,
            },
        })
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            llm_command: "claude".to_string(),
            llm_timeout: Duration::from_secs(120),
            generator: GeneratorConfig::default(),
        }
    }
}

fn number_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be numeric (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
