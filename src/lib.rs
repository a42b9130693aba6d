//! Vendorhub API Library
//!
//! Backend service for tracking vendors and purchase orders, with derived
//! vendor performance metrics recomputed after every purchase-order write.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{routing::get, Extension, Router};
use http::Method;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::AuthRouterExt;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
    pub auth: Arc<auth::AuthService>,
}

/// Assemble the application router.
///
/// User creation, token issuance, health, and the API docs are public;
/// everything else requires a valid bearer token.
pub fn app_router(state: AppState) -> Router {
    let auth_service = state.auth.clone();

    let protected = Router::new()
        .nest("/vendors", handlers::vendors::vendor_routes())
        .nest(
            "/purchase_orders",
            handlers::purchase_orders::purchase_order_routes(),
        )
        .with_auth()
        .layer(Extension(auth_service));

    let public = Router::new()
        .nest("/users", handlers::users::user_routes())
        .nest("/token", handlers::auth::token_routes())
        .route("/health", get(handlers::health::health_check));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
