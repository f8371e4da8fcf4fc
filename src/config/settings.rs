//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Model used when the caller does not name one
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// `X-Title` sent upstream unless `APP_TITLE` overrides it
pub const DEFAULT_APP_TITLE: &str = "Haxe AI Chat Gateway";

/// Value shipped in the sample `.env`; treated the same as a missing key
pub const PLACEHOLDER_API_KEY: &str = "your_openrouter_api_key_here";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream completion API configuration
    pub upstream: UpstreamConfig,
    /// Chat defaults
    pub chat: ChatConfig,
    /// Static front end
    pub frontend: FrontendConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API key, absent when the operator has not configured one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// `HTTP-Referer` attribution header
    pub referer: String,
    /// `X-Title` attribution header
    pub title: String,
}

/// Chat defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model used when the request omits one
    pub default_model: String,
}

/// Static front end configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Directory holding the built single-page app
    pub static_dir: PathBuf,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (env-filter directive)
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl UpstreamConfig {
    /// Usable credential, or `None` when missing, blank or still the placeholder
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    /// Chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl FrontendConfig {
    /// SPA entry document
    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            server: ServerConfig {
                host: get("HOST", "0.0.0.0"),
                port: get("PORT", "3000")
                    .parse()
                    .context("Invalid port number")?,
            },
            upstream: UpstreamConfig {
                api_key: lookup("OPENROUTER_API_KEY"),
                base_url: get("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
                timeout: get("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
                referer: get("HTTP_REFERER", "http://localhost:3000"),
                title: get("APP_TITLE", DEFAULT_APP_TITLE),
            },
            chat: ChatConfig {
                default_model: get("DEFAULT_MODEL", DEFAULT_MODEL),
            },
            frontend: FrontendConfig {
                static_dir: PathBuf::from(get("STATIC_DIR", "bin/frontend")),
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    ///
    /// A missing API key is not an error here; requests report it instead.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.upstream.base_url.starts_with("http") {
            anyhow::bail!("Invalid upstream base URL format, should start with 'http'");
        }

        if self.upstream.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.chat.default_model.trim().is_empty() {
            anyhow::bail!("Default model cannot be empty");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log level: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the model for a request, falling back to the configured default
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(model) if !model.is_empty() => model.to_string(),
            _ => self.chat.default_model.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            upstream: UpstreamConfig {
                api_key: None,
                base_url: "https://openrouter.ai/api/v1".to_string(),
                timeout: 30,
                referer: "http://localhost:3000".to_string(),
                title: DEFAULT_APP_TITLE.to_string(),
            },
            chat: ChatConfig {
                default_model: DEFAULT_MODEL.to_string(),
            },
            frontend: FrontendConfig {
                static_dir: PathBuf::from("bin/frontend"),
            },
            request: RequestConfig {
                max_request_size: 1024 * 1024,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
                cors_enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}
