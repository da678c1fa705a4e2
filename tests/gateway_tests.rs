//! HTTP gateway tests
//! Drives the router in-process with axum-test, against a wiremock backend
//!
//! Run with: cargo test --test gateway_tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use genie::api::{create_router, AppState};
use genie::auth::{sign_claims, TokenClaims};
use genie::config::Config;
use genie::logging::{LogLevel, Logger, MemorySink};

fn token_for(username: &str, is_admin: bool) -> String {
    let claims = TokenClaims {
        sub: username.to_string(),
        email: format!("{}@example.com", username),
        is_admin,
        id: "7".to_string(),
        exp: None,
    };
    sign_claims(&claims, b"test-secret").unwrap()
}

/// Gateway wired to `backend`, with log output captured in memory
fn create_test_server(backend: &MockServer) -> (TestServer, Arc<MemorySink>) {
    create_test_server_with(&backend.uri(), |_| {})
}

/// Same, with a chance to adjust the config first
fn create_test_server_with(
    backend_url: &str,
    configure: impl FnOnce(&mut Config),
) -> (TestServer, Arc<MemorySink>) {
    let mut config = Config::default();
    config.backend.base_url = backend_url.to_string();
    config.app.environment = "development".to_string();
    configure(&mut config);

    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(LogLevel::Debug, sink.clone());
    let state = Arc::new(AppState::new(config, logger).unwrap());

    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    (server, sink)
}

#[tokio::test]
async fn test_health_and_info() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");

    let response = server.get("/api").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("Genie"));

    server.get("/api/info").await.assert_status_ok();
}

#[tokio::test]
async fn test_login_sets_user_cookie_from_token() {
    let backend = MockServer::start().await;
    let token = token_for("alice", true);
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("username=alice"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": token, "token_type": "bearer" })),
        )
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["access_token"], token);
    assert_eq!(body["token_type"], "bearer");

    let cookie = response.cookie("user");
    assert_eq!(cookie.http_only(), Some(true));
    assert_ne!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    let user: Value = serde_json::from_str(cookie.value()).unwrap();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["is_admin"], true);
}

#[tokio::test]
async fn test_login_requires_username_and_password() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"],
        "Username and password are required"
    );
}

#[tokio::test]
async fn test_login_relays_backend_rejection() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Bad credentials" })),
        )
        .mount(&backend)
        .await;

    let (server, sink) = create_test_server(&backend);
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"], "Bad credentials");
    assert!(sink.contains("Login failed"));
}

#[tokio::test]
async fn test_register_returns_created() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "username": "bob",
            "email": "bob@example.com",
            "is_admin": false
        })))
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "bob", "email": "bob@example.com", "password": "pw" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["username"], "bob");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "bob", "password": "pw" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"], "Missing required fields");
}

#[tokio::test]
async fn test_logout_clears_token_cookie() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Logout successful");

    let set_cookie = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .map(str::to_string)
        .expect("token removal cookie");
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    server.get("/api/admin/users").await.assert_status_unauthorized();
    server
        .post("/api/admin/logging")
        .json(&json!({ "level": "DEBUG" }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_admin_routes_reject_non_admin() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server
        .get("/api/admin/users")
        .authorization_bearer(token_for("carol", false))
        .await;

    response.assert_status_forbidden();
    assert_eq!(response.json::<Value>()["error"], "Admin access required");
}

#[tokio::test]
async fn test_undecodable_token_is_unauthorized() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    server
        .get("/api/agents")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_admin_users_are_cached_until_delete() {
    let backend = MockServer::start().await;
    let token = token_for("root", true);

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "username": "root", "is_admin": true },
            { "id": 2, "username": "carol", "is_admin": false }
        ])))
        .expect(2)
        .mount(&backend)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);

    // Second read is served from the cache
    for _ in 0..2 {
        let response = server
            .get("/api/admin/users")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
    }

    let response = server
        .delete("/api/admin/users/2")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    // Invalidated, so this one reaches the backend again
    server
        .get("/api/admin/users")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_user_relays_backend_error() {
    let backend = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "User not found" })),
        )
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let response = server
        .patch("/api/admin/users/99")
        .authorization_bearer(token_for("root", true))
        .json(&json!({ "is_active": false }))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"], "User not found");
}

#[tokio::test]
async fn test_set_log_level() {
    let backend = MockServer::start().await;
    let (server, sink) = create_test_server(&backend);
    let token = token_for("root", true);

    let response = server
        .post("/api/admin/logging")
        .authorization_bearer(&token)
        .json(&json!({ "level": "ERROR" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Log level updated successfully");
    assert_eq!(body["logger"], "root");
    assert_eq!(body["level"], "ERROR");

    // Below the new threshold, so nothing is recorded
    sink.clear();
    server.get("/api/health").await.assert_status_ok();
    server
        .get("/api/user/history")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn test_set_log_level_rejects_unknown_names() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    for level in ["TRACE", "debug", ""] {
        let response = server
            .post("/api/admin/logging")
            .authorization_bearer(token_for("root", true))
            .json(&json!({ "level": level, "logger_name": "genie.api" }))
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid log level"));
    }
}

#[tokio::test]
async fn test_update_config_requires_key_and_value() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server
        .post("/api/admin/config")
        .authorization_bearer(token_for("root", true))
        .json(&json!({ "key": "max_tokens" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_agent_and_list() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let before = server
        .get("/api/agents")
        .authorization_bearer(token_for("dave", false))
        .await
        .json::<Value>()
        .as_array()
        .unwrap()
        .len();

    let response = server
        .post("/api/agents")
        .authorization_bearer(token_for("root", true))
        .json(&json!({
            "name": "Summarizer",
            "description": "Summarizes documents",
            "instructions": "Be brief"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Agent created successfully");
    assert_eq!(body["agent"]["model_id"], "mistral");

    let after: Value = server
        .get("/api/agents")
        .authorization_bearer(token_for("dave", false))
        .await
        .json();
    assert_eq!(after.as_array().unwrap().len(), before + 1);
}

#[tokio::test]
async fn test_create_agent_validation_and_permissions() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server
        .post("/api/agents")
        .authorization_bearer(token_for("root", true))
        .json(&json!({ "name": "Half", "description": "" }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"],
        "Name, description, and instructions are required"
    );

    server
        .post("/api/agents")
        .authorization_bearer(token_for("dave", false))
        .json(&json!({ "name": "A", "description": "B", "instructions": "C" }))
        .await
        .assert_status_forbidden();
}

#[tokio::test]
async fn test_agents_status_is_public() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server.get("/api/agents/status").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["total_agents"].as_u64().unwrap() as usize,
        body["agents"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_ask_forwards_with_token() {
    let backend = MockServer::start().await;
    let token = token_for("erin", false);
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "Paris", "agent": "geo" })),
        )
        .expect(1)
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let response = server
        .post("/api/ask")
        .authorization_bearer(&token)
        .json(&json!({ "message": "Capital of France?" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "Paris");
}

#[tokio::test]
async fn test_ask_relays_backend_status_with_fixed_message() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "detail": "model offline" })),
        )
        .mount(&backend)
        .await;

    let (server, sink) = create_test_server(&backend);
    let response = server
        .post("/api/ask")
        .authorization_bearer(token_for("erin", false))
        .json(&json!({ "message": "hi" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["error"],
        "Failed to get response from agent."
    );
    assert!(sink.contains("Backend chat request failed with status 503"));
}

#[tokio::test]
async fn test_ask_without_token() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    server
        .post("/api/ask")
        .json(&json!({ "message": "hi" }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_me_forwards_to_backend() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "erin",
            "chat_requests_count": 3
        })))
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let response = server
        .get("/api/user/me")
        .authorization_bearer(token_for("erin", false))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["chat_requests_count"], 3);
}

#[tokio::test]
async fn test_upload_forwards_file() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/knowledge/upload"))
        .and(body_string_contains("notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Indexed" })))
        .expect(1)
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let form = MultipartForm::new()
        .add_text("description", "Team notes")
        .add_text("sourceType", "document")
        .add_part(
            "file",
            Part::bytes(b"hello world".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        );

    let response = server
        .post("/api/admin/upload")
        .authorization_bearer(token_for("root", true))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Indexed");
    assert_eq!(body["filename"], "notes.txt");
    assert_eq!(body["size"], 11);
    assert_eq!(body["type"], "text/plain");
}

#[tokio::test]
async fn test_upload_without_file() {
    let backend = MockServer::start().await;
    let (server, _) = create_test_server(&backend);

    let response = server
        .post("/api/admin/upload")
        .authorization_bearer(token_for("root", true))
        .multipart(MultipartForm::new().add_text("description", "empty"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"], "No file provided");
}

/// Nothing listens on port 9
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

fn forged_admin_token() -> String {
    let claims = TokenClaims {
        sub: "root".to_string(),
        email: "root@example.com".to_string(),
        is_admin: true,
        id: "1".to_string(),
        exp: None,
    };
    sign_claims(&claims, b"not-the-backend-secret").unwrap()
}

#[tokio::test]
async fn test_cached_admin_data_is_not_served_to_other_tokens() {
    let backend = MockServer::start().await;
    let token = token_for("root", true);

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "username": "root", "email": "root@corp" }])),
        )
        .with_priority(1)
        .expect(1)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .expect(1)
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);

    // Fills the cache, then hits it
    for _ in 0..2 {
        server
            .get("/api/admin/users")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
    }

    // Claims say admin, but the backend never accepted this token
    let response = server
        .get("/api/admin/users")
        .authorization_bearer(forged_admin_token())
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<Value>()["error"],
        "Could not validate credentials"
    );
}

#[tokio::test]
async fn test_login_without_token_in_reply() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "bearer" })))
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<Value>()["error"],
        "Login failed, please try again."
    );
}

#[tokio::test]
async fn test_login_with_backend_down() {
    let (server, _) = create_test_server_with(UNREACHABLE_BACKEND, |_| {});

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<Value>()["error"],
        "An unexpected error occurred during login."
    );
}

#[tokio::test]
async fn test_register_with_backend_down() {
    let (server, _) = create_test_server_with(UNREACHABLE_BACKEND, |_| {});

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "bob", "email": "bob@example.com", "password": "pw" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "An unexpected error occurred during registration."
    );
}

#[tokio::test]
async fn test_admin_read_with_backend_down_is_generic_500() {
    let (server, sink) = create_test_server_with(UNREACHABLE_BACKEND, |_| {});

    let response = server
        .get("/api/admin/users")
        .authorization_bearer(token_for("root", true))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Internal server error");
    assert!(sink.contains("Admin users error"));
}

#[tokio::test]
async fn test_login_cookie_secure_when_configured() {
    let backend = MockServer::start().await;
    mount_login_reply(&backend, &token_for("alice", false)).await;

    let (server, _) = create_test_server_with(&backend.uri(), |config| {
        config.auth.cookie_secure = Some(true);
    });
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.cookie("user").secure(), Some(true));
}

async fn mount_login_reply(backend: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": token, "token_type": "bearer" })),
        )
        .mount(backend)
        .await;
}

#[tokio::test]
async fn test_config_update_invalidates_cached_config() {
    let backend = MockServer::start().await;
    let token = token_for("root", true);

    Mock::given(method("GET"))
        .and(path("/api/admin/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "key": "max_tokens", "value": "512" }
        ])))
        .expect(2)
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/config"))
        .and(body_string_contains("max_tokens"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "key": "max_tokens", "value": "1024" })),
        )
        .expect(1)
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);

    for _ in 0..2 {
        let response = server
            .get("/api/admin/config")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()[0]["key"], "max_tokens");
    }

    let response = server
        .post("/api/admin/config")
        .authorization_bearer(&token)
        .json(&json!({ "key": "max_tokens", "value": "1024" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["value"], "1024");

    server
        .get("/api/admin/config")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_user_update_invalidates_cached_users() {
    let backend = MockServer::start().await;
    let token = token_for("root", true);

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "username": "carol", "is_active": true }
        ])))
        .expect(2)
        .mount(&backend)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "username": "carol", "is_active": false
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);

    for _ in 0..2 {
        server
            .get("/api/admin/users")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
    }

    let response = server
        .patch("/api/admin/users/2")
        .authorization_bearer(&token)
        .json(&json!({ "is_active": false }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_active"], false);

    server
        .get("/api/admin/users")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_user_requires_no_content_reply() {
    let backend = MockServer::start().await;
    let token = token_for("root", true);

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 2 }])))
        .expect(1)
        .mount(&backend)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&backend)
        .await;

    let (server, _) = create_test_server(&backend);
    server
        .get("/api/admin/users")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let response = server
        .delete("/api/admin/users/2")
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    // Nothing was confirmed deleted, so the cached list is still served
    server
        .get("/api/admin/users")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}
