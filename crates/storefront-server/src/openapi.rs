use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "E-commerce REST API: users, authentication, catalog, orders, and sales reports."
    ),
    paths(
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::permissions::list_permissions,
        crate::routes::permissions::get_permission,
        crate::routes::permissions::create_permission,
        crate::routes::permissions::rename_permission,
        crate::routes::permissions::delete_permission,
        crate::routes::statuses::list_statuses,
        crate::routes::statuses::get_status,
        crate::routes::statuses::create_status,
        crate::routes::statuses::rename_status,
        crate::routes::statuses::delete_status,
        crate::routes::payment_methods::list_payment_methods,
        crate::routes::payment_methods::get_payment_method,
        crate::routes::payment_methods::create_payment_method,
        crate::routes::payment_methods::rename_payment_method,
        crate::routes::payment_methods::delete_payment_method,
        crate::routes::payment_statuses::list_payment_statuses,
        crate::routes::payment_statuses::get_payment_status,
        crate::routes::payment_statuses::create_payment_status,
        crate::routes::payment_statuses::rename_payment_status,
        crate::routes::payment_statuses::delete_payment_status,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        crate::routes::orders::list_orders,
        crate::routes::orders::get_order,
        crate::routes::orders::create_order,
        crate::routes::orders::update_order_status,
        crate::routes::orders::delete_order,
        crate::routes::reports::sales_report,
        crate::routes::reports::product_sales_report,
    ),
    components(schemas(
        crate::dto::CreateUserRequest,
        crate::dto::UpdateUserRequest,
        crate::dto::UserResponse,
        crate::dto::UserListResponse,
        crate::dto::LoginRequest,
        crate::dto::LoginResponse,
        crate::dto::LookupRequest,
        crate::dto::LookupResponse,
        crate::dto::LookupListResponse,
        crate::dto::ProductRequest,
        crate::dto::ProductResponse,
        crate::dto::ProductListResponse,
        crate::dto::OrderItemRequest,
        crate::dto::CreateOrderRequest,
        crate::dto::UpdateOrderStatusRequest,
        crate::dto::OrderItemResponse,
        crate::dto::OrderResponse,
        crate::dto::OrderListResponse,
        crate::dto::SalesReportResponse,
        crate::dto::ProductSalesResponse,
        crate::dto::ProductSalesReportResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "auth", description = "Registration, login, and session tokens"),
        (name = "permissions", description = "Permission lookup table"),
        (name = "statuses", description = "Order status lookup table"),
        (name = "payment-methods", description = "Payment method lookup table"),
        (name = "payment-statuses", description = "Payment status lookup table"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Orders and their line items"),
        (name = "reports", description = "Sales aggregations"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("token")
                        .description(Some("Session token issued by POST /auth/login."))
                        .build(),
                ),
            );
        }
    }
}
