//! Common test utilities for integration tests.
//!
//! These tests run against a real PostgreSQL instance named by the
//! TEST_DATABASE_URL environment variable. When it is unset the tests
//! skip themselves so the suite stays green on machines without a
//! database.

// Allow dead code in this module - these are helper utilities that may not be
// used by every integration test.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use kerbside_api::{app::create_app, config::Config};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tower::ServiceExt;

/// Create a test database pool, or `None` when TEST_DATABASE_URL is unset.
pub async fn try_create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    Some(pool)
}

/// Run migrations on the test database.
pub async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");

        // Migrations might already be applied, ignore errors
        let _ = sqlx::raw_sql(&sql).execute(pool).await;
    }
}

/// Remove all rows so each test starts from a clean slate.
pub async fn cleanup_test_data(pool: &PgPool) {
    sqlx::raw_sql(
        "TRUNCATE TABLE student_pickups, parking_reservations, parking_spots, parkings, \
         student_guardians, students, addresses, schools, users CASCADE",
    )
    .execute(pool)
    .await
    .expect("Failed to clean test database");
}

/// Test configuration with rate limiting disabled.
pub fn test_config() -> Config {
    Config {
        server: kerbside_api::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
            request_timeout_secs: 30,
        },
        database: kerbside_api::config::DatabaseConfig {
            url: std::env::var("TEST_DATABASE_URL").unwrap_or_default(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: kerbside_api::config::LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: kerbside_api::config::SecurityConfig {
            cors_origins: vec![],
            rate_limit_per_minute: 0, // Disable rate limiting for tests
        },
        jwt: kerbside_api::config::JwtAuthConfig {
            secret: "integration-test-secret-32-bytes!!".to_string(),
            access_token_expiry_secs: 3600,
            refresh_token_expiry_secs: 86400,
            leeway_secs: 30,
        },
        pickup_policy: kerbside_api::config::PickupPolicyConfig {
            require_verified: false,
            enforce_validity_window: false,
        },
    }
}

/// Create a test application router.
pub fn create_test_app(config: Config, pool: PgPool) -> Router {
    create_app(config, pool)
}

/// Generate a unique email for testing.
pub fn unique_test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a JSON request carrying a bearer token.
pub fn auth_json_request(method: Method, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a GET request carrying a bearer token.
pub fn auth_get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Parse a JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Register a user through the API and return (user_id, access_token).
pub async fn register_user(app: &Router, user_type: &str) -> (String, String) {
    let request = json_request(
        Method::POST,
        "/api/v1/auth/register",
        json!({
            "name": "Test",
            "lastName": "User",
            "email": unique_test_email(),
            "password": "correct-horse-battery",
            "userType": user_type
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    let token = body["tokens"]["accessToken"].as_str().unwrap().to_string();
    (user_id, token)
}

/// Create a school through the API (requires a staff token) and return its id.
pub async fn create_school(app: &Router, staff_token: &str) -> String {
    let request = auth_json_request(
        Method::POST,
        "/api/v1/schools",
        staff_token,
        json!({
            "name": "Escola Teste",
            "phoneNumber": "+55 11 90000-0000"
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    body["id"].as_str().unwrap().to_string()
}

/// Enroll a student with one guardian link and return the student id.
pub async fn create_student(
    app: &Router,
    staff_token: &str,
    school_id: &str,
    guardian_user_id: &str,
) -> String {
    let request = auth_json_request(
        Method::POST,
        "/api/v1/students",
        staff_token,
        json!({
            "name": "Aluno Teste",
            "schoolId": school_id,
            "guardians": [{
                "userId": guardian_user_id,
                "relation": "mother",
                "isPrimary": true
            }]
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    body["id"].as_str().unwrap().to_string()
}
