use utoipa::OpenApi;

/// OpenAPI document for the HTTP surface, served through Swagger UI at
/// `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vendorhub API",
        description = "Vendor management and purchase order performance tracking"
    ),
    paths(
        crate::handlers::vendors::create_vendor,
        crate::handlers::vendors::list_vendors,
        crate::handlers::vendors::get_vendor,
        crate::handlers::vendors::update_vendor,
        crate::handlers::vendors::delete_vendor,
        crate::handlers::vendors::get_vendor_performance,
        crate::handlers::purchase_orders::create_purchase_order,
        crate::handlers::purchase_orders::list_purchase_orders,
        crate::handlers::purchase_orders::get_purchase_order,
        crate::handlers::purchase_orders::update_purchase_order,
        crate::handlers::purchase_orders::delete_purchase_order,
        crate::handlers::purchase_orders::acknowledge_purchase_order,
        crate::handlers::users::create_user,
        crate::handlers::auth::obtain_token,
        crate::handlers::auth::refresh_token,
    ),
    components(schemas(
        crate::entities::vendor::Model,
        crate::entities::purchase_order::Model,
        crate::entities::purchase_order::PurchaseOrderStatus,
        crate::entities::historical_performance::Model,
        crate::services::vendors::CreateVendorRequest,
        crate::services::vendors::UpdateVendorRequest,
        crate::services::vendors::VendorListResponse,
        crate::services::vendors::PerformanceResponse,
        crate::services::purchase_orders::CreatePurchaseOrderRequest,
        crate::services::purchase_orders::UpdatePurchaseOrderRequest,
        crate::services::purchase_orders::AcknowledgePurchaseOrderRequest,
        crate::services::purchase_orders::PurchaseOrderListResponse,
        crate::services::users::CreateUserRequest,
        crate::services::users::UserResponse,
        crate::auth::LoginCredentials,
        crate::auth::RefreshTokenRequest,
        crate::auth::TokenPair,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "vendors", description = "Vendor CRUD and performance metrics"),
        (name = "purchase-orders", description = "Purchase order CRUD and acknowledgment"),
        (name = "users", description = "Login credential management"),
        (name = "auth", description = "JWT issuance and refresh"),
    )
)]
pub struct ApiDoc;
