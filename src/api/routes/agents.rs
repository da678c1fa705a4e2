//! Agent listing and creation (in-memory)

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{json_body, non_empty};
use crate::api::mock::{self, Agent};
use crate::api::server::SharedState;
use crate::auth::{AdminUser, AuthenticatedUser};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub model_id: Option<String>,
    pub instructions: Option<String>,
    #[serde(default)]
    pub knowledge_sources: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

pub async fn list_agents(
    State(state): State<SharedState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let agents = state.agents.read().await;
    Json(agents.clone())
}

pub async fn create_agent(
    State(state): State<SharedState>,
    AdminUser { user, .. }: AdminUser,
    payload: std::result::Result<Json<CreateAgentRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;

    let (Some(name), Some(description), Some(instructions)) = (
        non_empty(req.name),
        non_empty(req.description),
        non_empty(req.instructions),
    ) else {
        return Err(Error::BadRequest(
            "Name, description, and instructions are required".to_string(),
        ));
    };

    let now = chrono::Utc::now();
    let agent = Agent {
        id: now.timestamp_millis().to_string(),
        name,
        description,
        model_id: non_empty(req.model_id).unwrap_or_else(|| "mistral".to_string()),
        instructions: Some(instructions),
        knowledge_sources: req.knowledge_sources,
        tools: req.tools,
        status: "active".to_string(),
        created_at: now.to_rfc3339(),
    };

    state.agents.write().await.push(agent.clone());
    state.logger.info(
        "Agent created",
        &[json!({ "agent": agent.name, "createdBy": user.username }).into()],
    );

    Ok(Json(json!({ "message": "Agent created successfully", "agent": agent })))
}

pub async fn agents_status() -> impl IntoResponse {
    Json(mock::agents_status())
}
