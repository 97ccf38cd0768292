//! Configuration module for mediagate.

use serde::Deserialize;
use std::path::Path;

use crate::{Error, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Deployment environment name, reported at startup.
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_upload_size() -> u64 {
    10
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size_mb: default_max_upload_size(),
            cors_origins: vec![],
            environment: default_environment(),
        }
    }
}

impl ServerConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize) * 1024 * 1024
    }
}

/// ImageKit provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageKitConfig {
    /// Public API key.
    ///
    /// Server-side calls authenticate with the private key only; the public
    /// key is accepted so one config can be shared with browser upload clients.
    #[serde(default)]
    pub public_key: String,
    /// Private API key (used for basic auth).
    #[serde(default)]
    pub private_key: String,
    /// Public URL endpoint, e.g. `https://ik.imagekit.io/your_id`.
    #[serde(default)]
    pub url_endpoint: String,
    /// Base URL of the upload API.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
    /// Base URL of the management API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

fn default_upload_url() -> String {
    "https://upload.imagekit.io".to_string()
}

fn default_api_url() -> String {
    "https://api.imagekit.io".to_string()
}

fn default_provider_timeout() -> u64 {
    30
}

impl Default for ImageKitConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            url_endpoint: String::new(),
            upload_url: default_upload_url(),
            api_url: default_api_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

/// Link preview fetcher configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Connection timeout in seconds.
    #[serde(default = "default_preview_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_preview_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_preview_max_redirects")]
    pub max_redirects: usize,
    /// Maximum page size in bytes.
    #[serde(default = "default_preview_max_body")]
    pub max_body_bytes: u64,
    /// User agent sent with preview requests.
    #[serde(default = "default_preview_user_agent")]
    pub user_agent: String,
    /// Reject loopback, private and link-local targets.
    #[serde(default = "default_block_private_hosts")]
    pub block_private_hosts: bool,
}

fn default_preview_connect_timeout() -> u64 {
    10
}

fn default_preview_total_timeout() -> u64 {
    15
}

fn default_preview_max_redirects() -> usize {
    10
}

fn default_preview_max_body() -> u64 {
    5 * 1024 * 1024 // 5MB
}

fn default_preview_user_agent() -> String {
    "mediagate/0.1 (Link Preview)".to_string()
}

fn default_block_private_hosts() -> bool {
    true
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_preview_connect_timeout(),
            total_timeout_secs: default_preview_total_timeout(),
            max_redirects: default_preview_max_redirects(),
            max_body_bytes: default_preview_max_body(),
            user_agent: default_preview_user_agent(),
            block_private_hosts: default_block_private_hosts(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// ImageKit configuration.
    #[serde(default)]
    pub imagekit: ImageKitConfig,
    /// Link preview configuration.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    ///
    /// A missing file is not an error here; defaults plus the environment are used.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        // .env is optional
        let _ = dotenvy::dotenv();

        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `HOST`, `PORT`
    /// - `IMAGEKIT_PUBLIC_KEY`, `IMAGEKIT_PRIVATE_KEY`, `IMAGEKIT_URL_ENDPOINT`
    /// - `LOG_LEVEL`
    /// - `APP_ENV`
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
            }
        }
        if let Some(key) = get("IMAGEKIT_PUBLIC_KEY") {
            self.imagekit.public_key = key;
        }
        if let Some(key) = get("IMAGEKIT_PRIVATE_KEY") {
            self.imagekit.private_key = key;
        }
        if let Some(endpoint) = get("IMAGEKIT_URL_ENDPOINT") {
            self.imagekit.url_endpoint = endpoint;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(environment) = get("APP_ENV") {
            self.server.environment = environment;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the ImageKit private key is not set
    /// - the ImageKit URL endpoint is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.imagekit.private_key.is_empty() {
            return Err(Error::Config(
                "imagekit.private_key is not set. \
                 Set it in config.toml or via IMAGEKIT_PRIVATE_KEY environment variable."
                    .to_string(),
            ));
        }

        match url::Url::parse(&self.imagekit.url_endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(Error::Config(format!(
                "imagekit.url_endpoint must be an http(s) URL, got {:?}",
                self.imagekit.url_endpoint
            ))),
        }
    }
}
