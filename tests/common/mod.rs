#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;
use vendorhub_api::{
    app_router,
    auth::{self, AuthConfig, AuthService},
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

pub const TEST_PASSWORD: &str = "integration-password";
pub const TEST_EMAIL: &str = "test@example.com";

/// Helper harness for spinning up an application backed by an in-memory
/// SQLite database.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub token: String,
}

impl TestApp {
    /// Construct a new test application with fresh database state and one
    /// seeded login user.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            3600,
            86_400,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        // A single pooled connection keeps the in-memory database alive for
        // the duration of the test.
        let mut options = ConnectOptions::new(cfg.database_url.clone());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let pool = Database::connect(options)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        tokio::spawn(events::process_events(event_rx));

        let auth_cfg = AuthConfig::new(
            cfg.jwt_secret.clone(),
            "vendorhub-auth".to_string(),
            "vendorhub-api".to_string(),
            Duration::from_secs(3600),
            Duration::from_secs(86_400),
        );
        let auth_service = Arc::new(AuthService::new(auth_cfg, db_arc.clone()));

        let services = AppServices::new(db_arc.clone(), event_sender.clone());

        let state = AppState {
            db: db_arc.clone(),
            config: cfg,
            event_sender,
            services,
            auth: auth_service.clone(),
        };
        let router = app_router(state.clone());

        // Seed a login user and mint a real token pair for authenticated
        // calls.
        let now = Utc::now();
        let user = auth::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Test User".to_string()),
            email: Set(TEST_EMAIL.to_string()),
            password_hash: Set(auth::hash_password(TEST_PASSWORD).expect("hash test password")),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let user = user.insert(&*db_arc).await.expect("seed test user");
        let pair = auth_service
            .generate_token(&user)
            .await
            .expect("generate test token pair");

        Self {
            router,
            state,
            token: pair.access_token,
        }
    }

    /// Issue a request without an Authorization header.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.send(method, uri, body, None).await
    }

    /// Issue a request with an explicit bearer token.
    pub async fn send_with_token(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: &str,
    ) -> Response {
        self.send(method, uri, body, Some(token.to_string())).await
    }

    /// Issue a request with the seeded user's bearer token.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        self.send(method, uri, body, Some(self.token.clone())).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<String>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("route request")
    }
}

/// Read a response body as JSON.
pub async fn read_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body")
}

/// Assert a status and return the parsed body.
pub async fn expect_status(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status, "unexpected response status");
    read_json(response).await
}
