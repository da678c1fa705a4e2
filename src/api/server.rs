//! HTTP gateway server

use axum::{
    extract::FromRef,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthService, TokenDecoder};
use crate::backend::BackendClient;
use crate::config::Config;
use crate::error::Result;
use crate::logging::Logger;

use super::cache::PageCache;
use super::mock::{self, Agent};
use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub logger: Logger,
    pub backend: BackendClient,
    pub auth: AuthService,
    pub agents: RwLock<Vec<Agent>>,
    pub cache: PageCache,
    pub started_at: Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, logger: Logger) -> Result<Self> {
        let backend = BackendClient::new(&config.backend, logger.clone())?;
        let decoder = TokenDecoder::from_config(config.auth.jwt_secret.as_deref());
        let auth = AuthService::new(backend.clone(), decoder, logger.clone());

        Ok(Self {
            config,
            logger,
            backend,
            auth,
            agents: RwLock::new(mock::seed_agents()),
            cache: PageCache::new(),
            started_at: Instant::now(),
        })
    }
}

impl FromRef<SharedState> for AuthService {
    fn from_ref(state: &SharedState) -> Self {
        state.auth.clone()
    }
}

/// Run the HTTP gateway
pub async fn run_server(config: Config, logger: Logger, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config, logger)?);

    if !state.auth.decoder().verifies_signature() {
        tracing::warn!("auth.jwt_secret is not set; bearer tokens are decoded without signature checks");
    }

    let app = create_router(state.clone());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "Gateway listening on {} (backend {})",
        addr,
        state.backend.base_url()
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api", get(routes::info::welcome))
        .route("/api/health", get(routes::info::health))
        .route("/api/info", get(routes::info::api_info))
        // Auth
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        // User
        .route("/api/user/me", get(routes::user::me))
        .route("/api/user/history", get(routes::user::history))
        // Admin
        .route(
            "/api/admin/config",
            get(routes::admin::get_config).post(routes::admin::update_config),
        )
        .route("/api/admin/logging", post(routes::admin::set_log_level))
        .route("/api/admin/upload", post(routes::admin::upload))
        .route("/api/admin/users", get(routes::admin::list_users))
        .route(
            "/api/admin/users/{id}",
            patch(routes::admin::update_user).delete(routes::admin::delete_user),
        )
        // Agents
        .route(
            "/api/agents",
            get(routes::agents::list_agents).post(routes::agents::create_agent),
        )
        .route("/api/agents/status", get(routes::agents::agents_status))
        // Chat
        .route("/api/ask", post(routes::chat::ask))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
