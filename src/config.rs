//! Configuration types for github-repo-search
//!
//! Settings are plain values passed to constructors at startup. [`Config::load`]
//! fills them from an optional `.env` file and `GITHUB_REPO_SEARCH_API_*`
//! environment variables; anything unset keeps its default.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Prefix shared by every environment variable the service reads
pub const ENV_PREFIX: &str = "GITHUB_REPO_SEARCH_API";

/// Token values that ship in example `.env` files and must not be sent upstream
const TOKEN_PLACEHOLDERS: &[&str] = &[
    "your-token-here",
    "your_token_here",
    "token",
    "your_github_token",
];

/// Shorter strings cannot be a real personal access token
const MIN_TOKEN_LENGTH: usize = 20;

/// Main configuration
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Upstream GitHub API settings
    pub github: GitHubConfig,

    /// CSV export settings
    pub export: ExportConfig,

    /// Log verbosity used when `RUST_LOG` is not set
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    pub cors_origins: Vec<String>,

    /// Serve Swagger UI at /api/docs (default: true)
    pub swagger_ui: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Upstream GitHub API configuration
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    /// API root (default: https://api.github.com)
    pub base_url: String,

    /// Personal access token sent as a bearer credential (None = anonymous)
    pub token: Option<String>,

    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,

    /// User-Agent header; GitHub rejects requests without one
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: default_github_base_url(),
            token: None,
            timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// CSV export configuration
#[derive(Clone, Debug)]
pub struct ExportConfig {
    /// Directory the CSV files are written to and served from (default: "static")
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// Log verbosity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Diagnostic detail, including every upstream page request
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Recoverable problems
    Warn,
    /// Failures only
    Error,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" | "notset" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "fatal" | "critical" => Ok(LogLevel::Error),
            other => Err(Error::Config {
                message: format!("unknown log level '{other}'"),
                key: Some("log_level".into()),
            }),
        }
    }
}

impl Config {
    /// Load configuration from `.env` and the process environment
    ///
    /// A missing `.env` file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(Error::Config {
                    message: format!("failed to read .env file: {e}"),
                    key: None,
                });
            }
        }

        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Build configuration from an environment source
    ///
    /// Recognised keys (after the `GITHUB_REPO_SEARCH_API_` prefix): `HOST`,
    /// `PORT`, `LOG_LEVEL`, `GITHUB_TOKEN`, `GITHUB_BASE_URL`,
    /// `GITHUB_TIMEOUT_SECS`, `STATIC_DIR`, `CORS_ENABLED`, `SWAGGER_UI`.
    pub fn from_environment(source: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build configuration: {e}"),
                key: None,
            })?;

        let values = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| Error::Config {
                message: format!("failed to deserialize configuration: {e}"),
                key: None,
            })?;

        let mut config = Config::default();
        config.apply_overrides(&values)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, values: &HashMap<String, String>) -> Result<()> {
        if values.contains_key("host") || values.contains_key("port") {
            let host = values
                .get("host")
                .cloned()
                .unwrap_or_else(|| self.server.bind_address.ip().to_string());
            let port = match values.get("port") {
                Some(port) => parse_value::<u16>("port", port)?,
                None => self.server.bind_address.port(),
            };
            self.server.bind_address = parse_bind_address(&host, port)?;
        }

        if let Some(level) = values.get("log_level") {
            self.log_level = level.parse()?;
        }

        if let Some(url) = values.get("github_base_url") {
            self.github.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = values.get("github_timeout_secs") {
            self.github.timeout = Duration::from_secs(parse_value("github_timeout_secs", secs)?);
        }

        self.github.token = sanitize_token(values.get("github_token").map(String::as_str));

        if let Some(dir) = values.get("static_dir") {
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(enabled) = values.get("cors_enabled") {
            self.server.cors_enabled = parse_value("cors_enabled", enabled)?;
        }

        if let Some(enabled) = values.get("swagger_ui") {
            self.server.swagger_ui = parse_value("swagger_ui", enabled)?;
        }

        Ok(())
    }

    /// Check values that parsing alone cannot
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.github.base_url).map_err(|e| Error::Config {
            message: format!("invalid GitHub base URL '{}': {e}", self.github.base_url),
            key: Some("github_base_url".into()),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("GitHub base URL must be http or https, got '{}'", url.scheme()),
                key: Some("github_base_url".into()),
            });
        }

        if self.github.timeout.is_zero() {
            return Err(Error::Config {
                message: "GitHub request timeout must be greater than zero".into(),
                key: Some("github_timeout_secs".into()),
            });
        }

        Ok(())
    }
}

/// Drop empty, placeholder, and implausibly short tokens
///
/// Anonymous access still works against the search API, only with a lower
/// rate limit, so a bad token is discarded rather than rejected.
pub fn sanitize_token(token: Option<&str>) -> Option<String> {
    let token = token?.trim();

    if token.is_empty() {
        return None;
    }

    if TOKEN_PLACEHOLDERS.contains(&token.to_lowercase().as_str()) {
        return None;
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return None;
    }

    Some(token.to_string())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Config {
        message: format!("invalid value '{value}' for {key}"),
        key: Some(key.to_string()),
    })
}

fn parse_bind_address(host: &str, port: u16) -> Result<SocketAddr> {
    let host = if host.eq_ignore_ascii_case("localhost") {
        "127.0.0.1"
    } else {
        host
    };

    let ip: std::net::IpAddr = host.parse().map_err(|_| Error::Config {
        message: format!("invalid host '{host}', expected an IP address"),
        key: Some("host".into()),
    })?;

    Ok(SocketAddr::new(ip, port))
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_github_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("github-repo-search/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static")
}
