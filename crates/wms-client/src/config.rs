//! # Hub Configuration
//!
//! Where the backend lives, how long to wait for it, and how much to log.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command Line (highest priority, applied by the app)                │
//! │     --base-url http://10.0.0.5:8080/api                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     WMS_API_BASE_URL=http://10.0.0.5:8080/api                          │
//! │     WMS_REQUEST_TIMEOUT_SECS=10                                        │
//! │     WMS_LOG_FILTER=debug                                               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/wms-hub/wms-hub.toml (Linux)                             │
//! │     ~/Library/Application Support/com.wms.hub/wms-hub.toml (macOS)     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     http://localhost:8080/api, no timeout, info,wms=debug             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The base URL is resolved once at startup and never changes while the
//! process runs.
//!
//! ## Configuration File Format
//! ```toml
//! # wms-hub.toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! request_timeout_secs = 30   # omit or 0 for no timeout
//!
//! [log]
//! filter = "info,wms=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// File name of the config file inside the platform config dir.
pub const CONFIG_FILE_NAME: &str = "wms-hub.toml";

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Log filter used when neither `RUST_LOG` nor the config set one.
pub const DEFAULT_LOG_FILTER: &str = "info,wms=debug";

// =============================================================================
// API Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root of the REST resources, e.g. `http://localhost:8080/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. `None` or `0` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

// =============================================================================
// Log Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl HubConfig {
    /// Loads configuration from file, environment and defaults.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from TOML file if it exists
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading hub config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.log.filter.trim().is_empty() {
            return Err(ClientError::InvalidConfig("log filter must not be empty".into()));
        }

        Ok(())
    }

    /// Overrides the base URL (from a CLI flag) and re-validates it.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> ClientResult<Self> {
        self.api.base_url = base_url.into();
        self.base_url()?;
        Ok(self)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `WMS_*` overrides from a variable lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WMS_API_BASE_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("WMS_REQUEST_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(0) => self.api.request_timeout_secs = None,
                Ok(n) => self.api.request_timeout_secs = Some(n),
                Err(_) => warn!(value = %secs, "Ignoring non-numeric WMS_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(filter) = lookup("WMS_LOG_FILTER") {
            self.log.filter = filter;
        }
    }

    /// Returns the default config file path for the current platform.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "wms", "hub")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL. Only `http` and `https` are accepted.
    pub fn base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(self.api.base_url.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "API base URL must start with http:// or https://, got scheme '{}'",
                other
            ))),
        }
    }

    /// Base URL without the trailing `/api` segment, where `/health` lives.
    pub fn gateway_url(&self) -> ClientResult<String> {
        let base = self.base_url()?;
        let trimmed = base.as_str().trim_end_matches('/');
        Ok(trimmed.strip_suffix("/api").unwrap_or(trimmed).to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api
            .request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}
