use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub sales: SalesConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("POOLSIDE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("POOLSIDE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("POOLSIDE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("POOLSIDE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let hot_alert_template =
            env::var("POOLSIDE_HOT_ALERT_TEMPLATE").unwrap_or_else(|_| "hot_lead".to_string());
        let queue_limit = env::var("POOLSIDE_QUEUE_LIMIT")
            .unwrap_or_else(|_| "25".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidQueueLimit)?;
        if queue_limit == 0 {
            return Err(ConfigError::InvalidQueueLimit);
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            sales: SalesConfig {
                hot_alert_template,
                queue_limit,
            },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the sales follow-up machinery.
#[derive(Debug, Clone)]
pub struct SalesConfig {
    /// CRM template name used when a hot lead alert is published.
    pub hot_alert_template: String,
    /// Upper bound on call-queue entries returned to the sales desk.
    pub queue_limit: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidQueueLimit,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "POOLSIDE_PORT must be a valid u16"),
            ConfigError::InvalidQueueLimit => {
                write!(f, "POOLSIDE_QUEUE_LIMIT must be a positive integer")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "POOLSIDE_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidQueueLimit => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
