//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde_json::Value;

use crate::auth::User;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print the session's user
pub fn print_user_detail(user: &User) {
    println!("{}", "Current User".bold().underline());
    println!();
    println!("  {} {}", "Username:".bold(), user.username);
    println!("  {} {}", "Email:".bold(), user.email);
    println!("  {} {}", "ID:".bold(), user.id);
    let role = if user.is_admin {
        "admin".green()
    } else {
        "user".normal()
    };
    println!("  {} {}", "Role:".bold(), role);
}

fn field(user: &Value, key: &str) -> String {
    match user.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

fn flag(user: &Value, key: &str) -> Option<bool> {
    user.get(key).and_then(Value::as_bool)
}

/// Print the backend's user list as a table
pub fn print_users_table(users: &[Value]) {
    if users.is_empty() {
        info("No users found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Username").fg(Color::Cyan),
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Active").fg(Color::Cyan),
            Cell::new("Admin").fg(Color::Cyan),
            Cell::new("Requests").fg(Color::Cyan),
            Cell::new("Created").fg(Color::Cyan),
        ]);

    for user in users {
        let active = match flag(user, "is_active") {
            Some(true) => Cell::new("yes").fg(Color::Green),
            Some(false) => Cell::new("no").fg(Color::Red),
            None => Cell::new("-"),
        };
        let admin = if flag(user, "is_admin").unwrap_or(false) {
            "yes"
        } else {
            "no"
        };

        table.add_row(vec![
            Cell::new(field(user, "id")),
            Cell::new(field(user, "username")),
            Cell::new(field(user, "email")),
            active,
            Cell::new(admin),
            Cell::new(field(user, "chat_requests_count")),
            Cell::new(field(user, "created_at")),
        ]);
    }

    println!("{table}");
}

/// Print the gateway's agents as a table
pub fn print_agents_table(agents: &[Value]) {
    if agents.is_empty() {
        info("No agents found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Model").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
            Cell::new("Created").fg(Color::Cyan),
        ]);

    for agent in agents {
        table.add_row(vec![
            Cell::new(field(agent, "id")),
            Cell::new(field(agent, "name")),
            Cell::new(field(agent, "model_id")),
            status_cell(&field(agent, "status")),
            Cell::new(field(agent, "description")),
            Cell::new(field(agent, "created_at")),
        ]);
    }

    println!("{table}");
}

fn status_cell(status: &str) -> Cell {
    match status {
        "active" => Cell::new(status).fg(Color::Green),
        "inactive" => Cell::new(status).fg(Color::Red),
        _ => Cell::new(status),
    }
}

/// Print agent activity from `/api/agents/status`
pub fn print_agent_activity(status: &Value) {
    println!(
        "{} {} ({} active, {} inactive), system {}, up {}",
        "Agents:".bold(),
        field(status, "total_agents"),
        field(status, "active_agents"),
        field(status, "inactive_agents"),
        field(status, "system_status"),
        field(status, "uptime"),
    );

    let Some(agents) = status.get("agents").and_then(Value::as_array) else {
        return;
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Requests").fg(Color::Cyan),
            Cell::new("Avg response (s)").fg(Color::Cyan),
            Cell::new("Last activity").fg(Color::Cyan),
        ]);

    for agent in agents {
        table.add_row(vec![
            Cell::new(field(agent, "name")),
            status_cell(&field(agent, "status")),
            Cell::new(field(agent, "requests_processed")),
            Cell::new(field(agent, "average_response_time")),
            Cell::new(field(agent, "last_activity")),
        ]);
    }

    println!("{table}");
}
