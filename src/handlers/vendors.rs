use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
    JsonInput, PaginationParams,
};
use crate::{
    auth::AuthenticatedUser,
    errors::ApiError,
    handlers::AppState,
    services::vendors::{CreateVendorRequest, UpdateVendorRequest},
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;

// Handler functions

/// Create a new vendor
#[utoipa::path(
    post,
    path = "/vendors/",
    request_body = CreateVendorRequest,
    responses(
        (status = 201, description = "Vendor created", body = crate::entities::vendor::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "vendors"
)]
pub async fn create_vendor(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    JsonInput(payload): JsonInput<CreateVendorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let vendor = state
        .services
        .vendors
        .create_vendor(payload)
        .await
        .map_err(map_service_error)?;

    info!(vendor_code = %vendor.vendor_code, "vendor created");

    Ok(created_response(vendor))
}

/// List vendors with pagination
#[utoipa::path(
    get,
    path = "/vendors/",
    params(PaginationParams),
    responses(
        (status = 200, description = "Vendors fetched", body = crate::services::vendors::VendorListResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "vendors"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let vendors = state
        .services
        .vendors
        .list_vendors(pagination.page, pagination.per_page)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(vendors))
}

/// Get a vendor by code
#[utoipa::path(
    get,
    path = "/vendors/{vendor_code}/",
    params(("vendor_code" = String, Path, description = "Vendor code")),
    responses(
        (status = 200, description = "Vendor fetched", body = crate::entities::vendor::Model),
        (status = 404, description = "Vendor not found", body = crate::errors::ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(vendor_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = state
        .services
        .vendors
        .get_vendor(&vendor_code)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Vendor '{vendor_code}' not found")))?;

    Ok(success_response(vendor))
}

/// Partially update a vendor
#[utoipa::path(
    put,
    path = "/vendors/{vendor_code}/",
    request_body = UpdateVendorRequest,
    params(("vendor_code" = String, Path, description = "Vendor code")),
    responses(
        (status = 200, description = "Vendor updated", body = crate::entities::vendor::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Vendor not found", body = crate::errors::ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn update_vendor(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(vendor_code): Path<String>,
    JsonInput(payload): JsonInput<UpdateVendorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let vendor = state
        .services
        .vendors
        .update_vendor(&vendor_code, payload)
        .await
        .map_err(map_service_error)?;

    info!(vendor_code = %vendor.vendor_code, "vendor updated");

    Ok(success_response(vendor))
}

/// Delete a vendor and, through the cascading foreign key, its purchase
/// orders
#[utoipa::path(
    delete,
    path = "/vendors/{vendor_code}/",
    params(("vendor_code" = String, Path, description = "Vendor code")),
    responses(
        (status = 204, description = "Vendor deleted"),
        (status = 404, description = "Vendor not found", body = crate::errors::ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn delete_vendor(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(vendor_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .vendors
        .delete_vendor(&vendor_code)
        .await
        .map_err(map_service_error)?;

    info!(%vendor_code, "vendor deleted");

    Ok(no_content_response())
}

/// Get only the four derived performance metrics for a vendor
#[utoipa::path(
    get,
    path = "/vendors/{vendor_code}/performance/",
    params(("vendor_code" = String, Path, description = "Vendor code")),
    responses(
        (status = 200, description = "Performance metrics fetched", body = crate::services::vendors::PerformanceResponse),
        (status = 404, description = "Vendor not found", body = crate::errors::ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn get_vendor_performance(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(vendor_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let performance = state
        .services
        .vendors
        .get_performance(&vendor_code)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(performance))
}

/// Creates the router for vendor endpoints
pub fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendors).post(create_vendor))
        .route(
            "/:vendor_code/",
            get(get_vendor)
                .put(update_vendor)
                .patch(update_vendor)
                .delete(delete_vendor),
        )
        .route("/:vendor_code/performance/", get(get_vendor_performance))
}
