use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
    JsonInput,
};
use crate::{
    auth::AuthenticatedUser,
    errors::ApiError,
    handlers::AppState,
    services::purchase_orders::{
        AcknowledgePurchaseOrderRequest, CreatePurchaseOrderRequest, UpdatePurchaseOrderRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

/// Query parameters for the purchase order list endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct PurchaseOrderListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Restrict the listing to one vendor's orders
    pub vendor: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

// Handler functions

/// Create a new purchase order
#[utoipa::path(
    post,
    path = "/purchase_orders/",
    request_body = CreatePurchaseOrderRequest,
    responses(
        (status = 201, description = "Purchase order created", body = crate::entities::purchase_order::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "purchase-orders"
)]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    JsonInput(payload): JsonInput<CreatePurchaseOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let order = state
        .services
        .purchase_orders
        .create_purchase_order(payload)
        .await
        .map_err(map_service_error)?;

    info!(po_number = %order.po_number, "purchase order created");

    Ok(created_response(order))
}

/// List purchase orders with pagination, optionally filtered by vendor
#[utoipa::path(
    get,
    path = "/purchase_orders/",
    params(PurchaseOrderListQuery),
    responses(
        (status = 200, description = "Purchase orders fetched", body = crate::services::purchase_orders::PurchaseOrderListResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "purchase-orders"
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<PurchaseOrderListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .services
        .purchase_orders
        .list_purchase_orders(query.page, query.per_page, query.vendor.as_deref())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(orders))
}

/// Get a purchase order by number
#[utoipa::path(
    get,
    path = "/purchase_orders/{po_number}/",
    params(("po_number" = String, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Purchase order fetched", body = crate::entities::purchase_order::Model),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(po_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .purchase_orders
        .get_purchase_order(&po_number)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Purchase order '{po_number}' not found")))?;

    Ok(success_response(order))
}

/// Partially update a purchase order
#[utoipa::path(
    put,
    path = "/purchase_orders/{po_number}/",
    request_body = UpdatePurchaseOrderRequest,
    params(("po_number" = String, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Purchase order updated", body = crate::entities::purchase_order::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn update_purchase_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(po_number): Path<String>,
    JsonInput(payload): JsonInput<UpdatePurchaseOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let order = state
        .services
        .purchase_orders
        .update_purchase_order(&po_number, payload)
        .await
        .map_err(map_service_error)?;

    info!(po_number = %order.po_number, "purchase order updated");

    Ok(success_response(order))
}

/// Delete a purchase order
#[utoipa::path(
    delete,
    path = "/purchase_orders/{po_number}/",
    params(("po_number" = String, Path, description = "Purchase order number")),
    responses(
        (status = 204, description = "Purchase order deleted"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(po_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .purchase_orders
        .delete_purchase_order(&po_number)
        .await
        .map_err(map_service_error)?;

    info!(%po_number, "purchase order deleted");

    Ok(no_content_response())
}

/// Acknowledge a purchase order, recomputing the vendor's average response
/// time
#[utoipa::path(
    put,
    path = "/purchase_orders/{po_number}/acknowledge/",
    request_body = AcknowledgePurchaseOrderRequest,
    params(("po_number" = String, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Acknowledgment date stored"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn acknowledge_purchase_order(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(po_number): Path<String>,
    JsonInput(payload): JsonInput<AcknowledgePurchaseOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .purchase_orders
        .acknowledge_purchase_order(&po_number, payload)
        .await
        .map_err(map_service_error)?;

    info!(po_number = %order.po_number, "purchase order acknowledged");

    Ok(success_response(serde_json::json!({
        "acknowledgment_date": order.acknowledgment_date,
    })))
}

/// Creates the router for purchase order endpoints
pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route(
            "/:po_number/",
            get(get_purchase_order)
                .put(update_purchase_order)
                .patch(update_purchase_order)
                .delete(delete_purchase_order),
        )
        .route("/:po_number/acknowledge/", put(acknowledge_purchase_order))
}
