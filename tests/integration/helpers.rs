//! Shared test helpers for integration tests.
//!
//! Requires a PostgreSQL instance; configure it through
//! `HEMOLINK__DATABASE__URL` before running.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use hemolink_auth::jwt::JwtEncoder;
use hemolink_core::config::AppConfig;
use hemolink_entity::user::UserRole;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Token encoder for minting test credentials
    pub encoder: JwtEncoder,
}

/// Response from a test request
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = Arc::new(AppConfig::load("test").expect("Failed to load test config"));

        let db = hemolink_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        hemolink_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let db_pool = db.into_pool();
        Self::clean_database(&db_pool).await;

        let encoder = JwtEncoder::new(&config.auth);
        let state = hemolink_api::AppState::build(config.clone(), db_pool.clone());
        let router = hemolink_api::build_router(state);

        Self {
            router,
            db_pool,
            encoder,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = ["notifications", "blood_requests", "donors", "users"];
        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a user row and return their ID
    pub async fn create_user(&self, name: &str, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, name, role) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(role)
            .execute(&self.db_pool)
            .await
            .expect("Failed to create test user");
        id
    }

    /// Create a donor with the given profile and return their ID
    pub async fn create_donor(
        &self,
        name: &str,
        blood_type: &str,
        is_active: bool,
        last_donation_date: Option<chrono::NaiveDate>,
    ) -> Uuid {
        let id = self.create_user(name, UserRole::Donor).await;
        sqlx::query(
            "INSERT INTO donors (id, blood_type, is_active, last_donation_date) \
             VALUES ($1, $2::blood_type, $3, $4)",
        )
        .bind(id)
        .bind(blood_type)
        .bind(is_active)
        .bind(last_donation_date)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test donor");
        id
    }

    /// Mint an access token for a user
    pub fn token_for(&self, user_id: Uuid, role: UserRole, name: &str) -> String {
        self.encoder
            .generate_access_token(user_id, role, name)
            .expect("Failed to mint test token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let response = self
            .router
            .clone()
            .oneshot(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
