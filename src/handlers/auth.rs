use super::common::JsonInput;
use crate::{
    auth::{AuthError, LoginCredentials, RefreshTokenRequest, TokenPair},
    handlers::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

// Handler functions

/// Obtain a JWT access/refresh pair from stored credentials
#[utoipa::path(
    post,
    path = "/token/",
    request_body = LoginCredentials,
    responses(
        (status = 200, description = "Token pair issued", body = crate::auth::TokenPair),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    JsonInput(payload): JsonInput<LoginCredentials>,
) -> Result<Json<TokenPair>, AuthError> {
    let pair = state.auth.login(&payload.email, &payload.password).await?;

    info!(email = %payload.email, "access token issued");

    Ok(Json(pair))
}

/// Rotate a refresh token into a new access/refresh pair
#[utoipa::path(
    post,
    path = "/token/refresh/",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token pair issued", body = crate::auth::TokenPair),
        (status = 401, description = "Invalid, expired, or already-used refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonInput(payload): JsonInput<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let pair = state.auth.refresh_token(&payload.refresh_token).await?;

    info!("access token refreshed");

    Ok(Json(pair))
}

/// Creates the router for token endpoints
pub fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(obtain_token))
        .route("/refresh/", post(refresh_token))
}
