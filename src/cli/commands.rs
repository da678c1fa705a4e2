//! CLI command implementations

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::api;
use crate::auth::{landing_path, AuthService, AuthSession, FileStore, TokenDecoder};
use crate::backend::{reason_phrase, BackendClient};
use crate::cli::{
    error, info, print_agent_activity, print_agents_table, print_user_detail, print_users_table,
    success, warn, OutputFormat,
};
use crate::config::{self, BackendConfig, Config};
use crate::logging::Logger;

/// Initialize a new genie.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("genie.toml");

    if config_path.exists() {
        warn("genie.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created genie.toml");
    info("Point backend.base_url at your backend and run 'genie serve'");

    Ok(())
}

/// Start the HTTP gateway
pub async fn serve(
    config: Config,
    logger: Logger,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting gateway on {}:{}", host, port));
    api::run_server(config, logger, &host, port).await?;
    Ok(())
}

/// Build the client session from the token store and restore it
fn open_session(config: &Config, logger: &Logger) -> Result<AuthSession> {
    let backend = BackendClient::new(&config.backend, logger.clone())?;
    let decoder = TokenDecoder::from_config(config.auth.jwt_secret.as_deref());
    let service = AuthService::new(backend, decoder, logger.clone());
    let store = Arc::new(FileStore::new(&config.client.storage_path));

    let mut session = AuthSession::new(service, store, logger.clone());
    session.restore();
    Ok(session)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Log in and persist the token
pub async fn login(
    config: &Config,
    logger: &Logger,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password, false)?;
    let mut session = open_session(config, logger)?;

    let pb = spinner("Logging in...");
    let result = session.login(username, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(user) => {
            success(&format!("Logged in as {}", user.username));
            info(&format!("Landing page: {}", landing_path(&user)));
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

/// Register, then log in with the same credentials
pub async fn register(
    config: &Config,
    logger: &Logger,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password, true)?;
    let mut session = open_session(config, logger)?;

    let pb = spinner("Creating account...");
    let result = session.register(username, email, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(user) => {
            success(&format!("Registered and logged in as {}", user.username));
            info(&format!("Landing page: {}", landing_path(&user)));
            Ok(())
        }
        Err(e) => {
            error(&format!("Registration failed: {}", e));
            Err(e.into())
        }
    }
}

pub async fn logout(config: &Config, logger: &Logger) -> Result<()> {
    let mut session = open_session(config, logger)?;
    if session.user().is_none() {
        warn("Not logged in");
        return Ok(());
    }
    let next = session.logout();
    success(&format!("Logged out (next: {})", next));
    Ok(())
}

pub async fn whoami(config: &Config, logger: &Logger, format: OutputFormat) -> Result<()> {
    let session = open_session(config, logger)?;
    let Some(user) = session.user() else {
        bail!("Not logged in. Run 'genie login' first.");
    };

    match format {
        OutputFormat::Table => print_user_detail(user),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(user)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(user)?),
    }
    Ok(())
}

/// Send a question to the backend agent with the stored token
pub async fn ask(config: &Config, logger: &Logger, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Message is empty");
    }
    let session = open_session(config, logger)?;
    let Some(token) = session.token() else {
        bail!("Not logged in. Run 'genie login' first.");
    };

    let backend = BackendClient::new(&config.backend, logger.clone())?;
    let pb = spinner("Waiting for the assistant...");
    let reply = backend
        .post_json("/api/ask", &json!({ "message": message }), Some(token))
        .await;
    pb.finish_and_clear();

    let reply = reply?;
    let status = reply.status;
    let body = reply.into_result(reason_phrase(status))?;

    match body.get("response").and_then(Value::as_str) {
        Some(text) => println!("{}", text),
        None => println!("{}", serde_json::to_string_pretty(&body)?),
    }
    Ok(())
}

/// List users through the backend's admin endpoint
pub async fn users(config: &Config, logger: &Logger, format: OutputFormat) -> Result<()> {
    let session = open_session(config, logger)?;
    let Some(token) = session.token() else {
        bail!("Not logged in. Run 'genie login' first.");
    };
    if !session.is_admin() {
        bail!("Admin access required");
    }

    let backend = BackendClient::new(&config.backend, logger.clone())?;
    let reply = backend.get("/api/admin/users", Some(token)).await?;
    let status = reply.status;
    let body = reply.into_result(reason_phrase(status))?;
    let users = body.as_array().cloned().unwrap_or_default();

    match format {
        OutputFormat::Table => print_users_table(&users),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&users)?),
    }
    Ok(())
}

/// Client for the gateway itself, which owns the agent registry
fn gateway_client(config: &Config, logger: &Logger) -> Result<BackendClient> {
    let gateway = BackendConfig {
        base_url: config.client.gateway_url.clone(),
        timeout_secs: config.backend.timeout_secs,
    };
    Ok(BackendClient::new(&gateway, logger.clone())?)
}

fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Table => {}
    }
    Ok(())
}

/// List agents, or their activity with `--status`
pub async fn agents(
    config: &Config,
    logger: &Logger,
    status: bool,
    format: OutputFormat,
) -> Result<()> {
    let gateway = gateway_client(config, logger)?;

    if status {
        let reply = gateway.get("/api/agents/status", None).await?;
        let code = reply.status;
        let body = reply.into_result(reason_phrase(code))?;
        return match format {
            OutputFormat::Table => {
                print_agent_activity(&body);
                Ok(())
            }
            _ => print_value(&body, format),
        };
    }

    let session = open_session(config, logger)?;
    let Some(token) = session.token() else {
        bail!("Not logged in. Run 'genie login' first.");
    };

    let reply = gateway.get("/api/agents", Some(token)).await?;
    let code = reply.status;
    let body = reply.into_result(reason_phrase(code))?;

    match format {
        OutputFormat::Table => {
            print_agents_table(body.as_array().map(Vec::as_slice).unwrap_or_default());
            Ok(())
        }
        _ => print_value(&body, format),
    }
}
