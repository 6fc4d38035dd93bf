//! Test utilities for integration tests
use std::env;
use std::fs;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use axum::Router;

use chronosage::api::AppState;
use chronosage::api::app;
use chronosage::core::AppConfig;
use chronosage::core::db::{async_db, initialize_db};

/// Creates a test application router with a temporary credential
/// database. All outbound hostnames point at `hostname`, typically a
/// mockito server that plays the language model, the OAuth endpoint,
/// and the calendar API at once. A refresh token for
/// `test@example.com` is seeded so authorized flows work against the
/// mock.
pub async fn test_app_with(hostname: &str) -> Router {
    // Create a unique directory for the test with a randomly
    // generated name using a timestamp to avoid collisions
    let temp_dir = env::temp_dir();
    let ts = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        .to_string();
    let dir = temp_dir.join(ts);
    let db_path = dir.join("db");
    fs::create_dir_all(&db_path).expect("Failed to create db directory");
    let db_path = db_path.to_str().unwrap().to_string();

    let db = async_db(&db_path)
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        initialize_db(conn).expect("Failed to migrate db");
        conn.execute(
            "INSERT INTO auth (id, service, refresh_token) VALUES (?1, ?2, ?3)",
            ("test@example.com", "google", "refresh_123"),
        )
        .expect("Failed to seed refresh token");
        Ok(())
    })
    .await
    .unwrap();

    let app_config = AppConfig {
        storage_path: dir.display().to_string(),
        db_path,
        timezone: String::from("America/Denver"),
        google_client_id: String::from("test_client_id"),
        google_client_secret: String::from("test_client_secret"),
        google_api_hostname: hostname.to_string(),
        google_oauth_hostname: hostname.to_string(),
        openai_api_hostname: hostname.to_string(),
        openai_api_key: String::from("test-api-key"),
        openai_model: String::from("gpt-4o-mini"),
        calendar_id: String::from("primary"),
        max_days_ahead: 30,
        max_results: 10,
    };
    let app_state = AppState::new(db, app_config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Test application with no reachable outbound hosts, for request
/// validation tests
pub async fn test_app() -> Router {
    test_app_with("http://127.0.0.1:1").await
}

/// A chat completion response carrying a single schedule_event tool
/// call with the given arguments
pub fn tool_call_response(arguments: serde_json::Value) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_abc123",
                    "type": "function",
                    "function": {
                        "name": "schedule_event",
                        "arguments": arguments.to_string()
                    }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}

/// An OAuth token refresh response
pub fn token_response() -> String {
    serde_json::json!({
        "access_token": "access_456",
        "expires_in": 3599,
        "token_type": "Bearer"
    })
    .to_string()
}
