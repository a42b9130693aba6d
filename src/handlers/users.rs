use super::common::{created_response, map_service_error, validate_input, JsonInput};
use crate::{errors::ApiError, handlers::AppState, services::users::CreateUserRequest};
use axum::{extract::State, response::IntoResponse, routing::post, Router};
use tracing::info;

// Handler functions

/// Create a login credential. Publicly accessible; the password is
/// write-only and never appears in the response.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::services::users::UserResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonInput(payload): JsonInput<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let user = state
        .services
        .users
        .create_user(payload)
        .await
        .map_err(map_service_error)?;

    info!(user_id = %user.id, "user created");

    Ok(created_response(user))
}

/// Creates the router for user endpoints
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}
