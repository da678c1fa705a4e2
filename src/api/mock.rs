//! In-memory data for endpoints without real persistence

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub knowledge_sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub agent_name: String,
    pub timestamp: String,
    pub response_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentActivity {
    pub id: String,
    pub name: String,
    pub status: String,
    pub last_activity: String,
    pub requests_processed: u64,
    pub average_response_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsStatus {
    pub total_agents: usize,
    pub active_agents: usize,
    pub inactive_agents: usize,
    pub agents: Vec<AgentActivity>,
    pub system_status: String,
    pub uptime: String,
}

fn agent(id: &str, name: &str, description: &str, created_at: &str) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        model_id: "mistral".to_string(),
        instructions: None,
        knowledge_sources: Vec::new(),
        tools: Vec::new(),
        status: "active".to_string(),
        created_at: created_at.to_string(),
    }
}

/// Agents the gateway starts with
pub fn seed_agents() -> Vec<Agent> {
    vec![
        agent(
            "1",
            "Financial Analyst",
            "Specialized in financial analysis and reporting",
            "2024-01-01T00:00:00Z",
        ),
        agent(
            "2",
            "Data Processor",
            "Handles data processing and analysis",
            "2024-01-02T00:00:00Z",
        ),
    ]
}

pub fn user_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: "1".to_string(),
            question: "What is the current market trend?".to_string(),
            answer: "Based on recent data, the market shows an upward trend...".to_string(),
            agent_name: "Financial Analyst".to_string(),
            timestamp: "2024-01-19T20:30:00Z".to_string(),
            response_time: 2.5,
        },
        HistoryEntry {
            id: "2".to_string(),
            question: "Analyze the quarterly earnings report".to_string(),
            answer: "The quarterly earnings report indicates strong performance...".to_string(),
            agent_name: "Data Processor".to_string(),
            timestamp: "2024-01-19T20:25:00Z".to_string(),
            response_time: 1.8,
        },
    ]
}

pub fn agents_status() -> AgentsStatus {
    let agents = vec![
        AgentActivity {
            id: "1".to_string(),
            name: "Financial Analyst".to_string(),
            status: "active".to_string(),
            last_activity: "2024-01-19T20:30:00Z".to_string(),
            requests_processed: 150,
            average_response_time: 2.5,
        },
        AgentActivity {
            id: "2".to_string(),
            name: "Data Processor".to_string(),
            status: "active".to_string(),
            last_activity: "2024-01-19T20:25:00Z".to_string(),
            requests_processed: 89,
            average_response_time: 1.8,
        },
    ];
    let active = agents.iter().filter(|a| a.status == "active").count();

    AgentsStatus {
        total_agents: agents.len(),
        active_agents: active,
        inactive_agents: agents.len() - active,
        agents,
        system_status: "healthy".to_string(),
        uptime: "24h 15m 30s".to_string(),
    }
}
