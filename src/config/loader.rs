//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "genie.toml";

/// Environment variable that overrides `backend.base_url`
pub const BASE_URL_ENV: &str = "GENIE_API_BASE_URL";

/// Load configuration from genie.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load genie.toml if one exists, otherwise fall back to defaults
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Ok(config) => Ok(config),
        Err(Error::ConfigNotFound) => {
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let mut config: Config = toml::from_str(&content)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = env::var(BASE_URL_ENV) {
        if !url.is_empty() {
            config.backend.base_url = url;
        }
    }
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Genie Configuration

[server]
host = "0.0.0.0"
port = 3000

[backend]
base_url = "${GENIE_API_BASE_URL:-http://localhost:8000}"
# timeout_secs = 30

[app]
name = "Genie"
version = "1.0.0"
description = "Genie - Your AI Assistant"
environment = "production"  # "development" drops the Secure cookie flag by default

[logging]
level = "INFO"  # DEBUG, INFO, WARNING, ERROR, CRITICAL

[auth]
# Tokens are only decoded unless a shared secret is configured.
# jwt_secret = "${GENIE_JWT_SECRET}"
# cookie_secure = true  # defaults to true outside development

[client]
storage_path = ".genie/session.json"
gateway_url = "http://localhost:3000"
"#
}
