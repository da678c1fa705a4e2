//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Whether cookies set by the gateway carry the Secure attribute
    pub fn cookie_secure(&self) -> bool {
        self.auth
            .cookie_secure
            .unwrap_or(!self.app.is_development())
    }
}

/// Server configuration for the HTTP gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where the backend service lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; unset means the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Application identity reported by `/api` and `/api/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,

    #[serde(default = "default_app_description")]
    pub description: String,

    /// `development` disables the Secure attribute on cookies
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_app_name() -> String {
    "Genie".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_app_description() -> String {
    "Genie - Your AI Assistant".to_string()
}

fn default_environment() -> String {
    "production".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            description: default_app_description(),
            environment: default_environment(),
        }
    }
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Token handling
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Shared HS256 secret. When set, tokens are signature-checked instead
    /// of only decoded.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Secure flag on the login cookie; unset follows `app.environment`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_secure: Option<bool>,
}

/// Settings for the command-line client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Gateway the client reads gateway-owned data (agents) from
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
}

fn default_gateway_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".genie/session.json")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            gateway_url: default_gateway_url(),
        }
    }
}
