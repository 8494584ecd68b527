//! End-to-end tests for the resource groups over the in-memory stores.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use uuid::Uuid;

use crate::integration::common::{send, send_empty, send_json, test_app};

async fn create_lookup(app: &Router, prefix: &str, name: &str) -> String {
    let (status, json) = send_json(app, "POST", prefix, &serde_json::json!({"name": name})).await;
    assert_eq!(status, StatusCode::CREATED, "POST {prefix}");
    json["id"].as_str().unwrap().to_string()
}

async fn create_user(app: &Router, email: &str) -> String {
    let body = serde_json::json!({
        "name": "Test User",
        "email": email,
        "password": "secret",
    });
    let (status, json) = send_json(app, "POST", "/users", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn create_product(app: &Router, name: &str, price_cents: i64) -> String {
    let body = serde_json::json!({
        "name": name,
        "description": "test product",
        "price_cents": price_cents,
        "stock": 10,
    });
    let (status, json) = send_json(app, "POST", "/products", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

struct OrderRefs {
    user_id: String,
    status_id: String,
    payment_method_id: String,
    payment_status_id: String,
}

async fn seed_order_refs(app: &Router) -> OrderRefs {
    OrderRefs {
        user_id: create_user(app, "buyer@example.com").await,
        status_id: create_lookup(app, "/status", "pending").await,
        payment_method_id: create_lookup(app, "/paymentmethod", "card").await,
        payment_status_id: create_lookup(app, "/paymentstatus", "unpaid").await,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn users_crud_flow() {
    let app = test_app();

    let create_body = serde_json::json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "secret",
    });
    let (status, json) = send_json(&app, "POST", "/users", &create_body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["email"], "ada@example.com");
    let id = json["id"].as_str().unwrap().to_string();

    let (status, json) = send_empty(&app, "GET", &format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id.as_str());

    let (status, json) = send_empty(&app, "GET", "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["users"][0]["email"], "ada@example.com");

    let update_body = serde_json::json!({
        "name": "Ada L.",
        "email": "ada.l@example.com",
    });
    let (status, json) = send_json(&app, "PUT", &format!("/users/{id}"), &update_body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Ada L.");
    assert_eq!(json["email"], "ada.l@example.com");

    let (status, _) = send_empty(&app, "DELETE", &format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send_empty(&app, "GET", &format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = test_app();

    create_user(&app, "dup@example.com").await;

    let body = serde_json::json!({
        "name": "Other",
        "email": "dup@example.com",
        "password": "secret",
    });
    let (status, json) = send_json(&app, "POST", "/users", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate");
}

#[tokio::test]
async fn invalid_user_input_is_rejected() {
    let app = test_app();

    for body in [
        serde_json::json!({"name": "", "email": "a@example.com", "password": "x"}),
        serde_json::json!({"name": "A", "email": "not-an-email", "password": "x"}),
        serde_json::json!({"name": "A", "email": "a@example.com", "password": ""}),
    ] {
        let (status, json) = send_json(&app, "POST", "/users", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["error"], "invalid_input");
    }
}

#[tokio::test]
async fn unknown_permission_is_a_foreign_key_error() {
    let app = test_app();

    let body = serde_json::json!({
        "name": "A",
        "email": "a@example.com",
        "password": "x",
        "permission_id": Uuid::new_v4(),
    });
    let (status, json) = send_json(&app, "POST", "/users", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "foreign_key_violation");
}

#[tokio::test]
async fn updating_missing_user_is_not_found() {
    let app = test_app();

    let body = serde_json::json!({"name": "A", "email": "a@example.com"});
    let (status, json) =
        send_json(&app, "PUT", &format!("/users/{}", Uuid::new_v4()), &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_crud_flow() {
    let app = test_app();

    create_lookup(&app, "/status", "shipped").await;
    create_lookup(&app, "/status", "delivered").await;
    let id = create_lookup(&app, "/status", "pending").await;

    let (status, json) = send_empty(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    let names: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["delivered", "pending", "shipped"]);

    let (status, json) = send_empty(&app, "GET", &format!("/status/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "pending");

    let rename = serde_json::json!({"name": "processing"});
    let (status, json) = send_json(&app, "PUT", &format!("/status/{id}"), &rename).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "processing");

    let (status, _) = send_empty(&app, "DELETE", &format!("/status/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send_empty(&app, "GET", &format!("/status/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], format!("Status not found: {id}"));
}

#[tokio::test]
async fn duplicate_lookup_name_is_a_conflict() {
    let app = test_app();

    create_lookup(&app, "/permissions", "admin").await;

    let (status, json) =
        send_json(&app, "POST", "/permissions", &serde_json::json!({"name": "admin"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate");

    // The same name is fine in a different table.
    let (status, _) =
        send_json(&app, "POST", "/status", &serde_json::json!({"name": "admin"})).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn referenced_permission_cannot_be_deleted() {
    let app = test_app();

    let permission_id = create_lookup(&app, "/permissions", "admin").await;
    let body = serde_json::json!({
        "name": "Admin",
        "email": "admin@example.com",
        "password": "secret",
        "permission_id": &permission_id,
    });
    let (status, _) = send_json(&app, "POST", "/users", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) =
        send_empty(&app, "DELETE", &format!("/permissions/{permission_id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "foreign_key_violation");
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn products_crud_flow() {
    let app = test_app();

    let id = create_product(&app, "Keyboard", 4_500).await;
    create_product(&app, "Mouse", 2_500).await;

    let (status, json) = send_empty(&app, "GET", "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    // Newest first.
    assert_eq!(json["products"][0]["name"], "Mouse");

    let update = serde_json::json!({
        "name": "Mechanical Keyboard",
        "description": "tactile switches",
        "price_cents": 9_900,
        "stock": 5,
    });
    let (status, json) = send_json(&app, "PUT", &format!("/products/{id}"), &update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Mechanical Keyboard");
    assert_eq!(json["price_cents"], 9_900);
    assert_eq!(json["stock"], 5);

    let (status, _) = send_empty(&app, "DELETE", &format!("/products/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send_empty(&app, "GET", &format!("/products/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn product_validation_rejects_negative_values() {
    let app = test_app();

    for body in [
        serde_json::json!({"name": "X", "price_cents": -1, "stock": 0}),
        serde_json::json!({"name": "X", "price_cents": 100, "stock": -1}),
        serde_json::json!({"name": "  ", "price_cents": 100, "stock": 0}),
    ] {
        let (status, json) = send_json(&app, "POST", "/products", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["error"], "invalid_input");
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_flow_computes_totals() {
    let app = test_app();

    let refs = seed_order_refs(&app).await;
    let keyboard = create_product(&app, "Keyboard", 4_500).await;
    let mouse = create_product(&app, "Mouse", 2_500).await;

    let create_body = serde_json::json!({
        "user_id": &refs.user_id,
        "status_id": &refs.status_id,
        "payment_method_id": &refs.payment_method_id,
        "payment_status_id": &refs.payment_status_id,
        "items": [
            {"product_id": &keyboard, "quantity": 2},
            {"product_id": &mouse, "quantity": 1},
        ],
    });
    let (status, json) = send_json(&app, "POST", "/orders", &create_body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["total_cents"], 11_500);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    let order_id = json["id"].as_str().unwrap().to_string();

    let (status, json) = send_empty(&app, "GET", &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_cents"], 11_500);
    assert_eq!(json["user_id"], refs.user_id.as_str());

    let (status, json) = send_empty(&app, "GET", "/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);

    let shipped = create_lookup(&app, "/status", "shipped").await;
    let (status, json) = send_json(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        &serde_json::json!({"status_id": &shipped}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status_id"], shipped.as_str());

    let (status, _) = send_empty(&app, "DELETE", &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_empty(&app, "GET", &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_item_validation() {
    let app = test_app();

    let refs = seed_order_refs(&app).await;
    let product = create_product(&app, "Widget", 100).await;

    let base = |items: serde_json::Value| {
        serde_json::json!({
            "user_id": &refs.user_id,
            "status_id": &refs.status_id,
            "payment_method_id": &refs.payment_method_id,
            "payment_status_id": &refs.payment_status_id,
            "items": items,
        })
    };

    // No items.
    let (status, json) = send_json(&app, "POST", "/orders", &base(serde_json::json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");

    // Non-positive quantity.
    let items = serde_json::json!([{"product_id": &product, "quantity": 0}]);
    let (status, json) = send_json(&app, "POST", "/orders", &base(items)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");

    // Unknown product.
    let items = serde_json::json!([{"product_id": Uuid::new_v4(), "quantity": 1}]);
    let (status, json) = send_json(&app, "POST", "/orders", &base(items)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "foreign_key_violation");

    // The same product twice in one order.
    let items = serde_json::json!([
        {"product_id": &product, "quantity": 1},
        {"product_id": &product, "quantity": 2},
    ]);
    let (status, json) = send_json(&app, "POST", "/orders", &base(items)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate");
}

#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let app = test_app();

    let refs = seed_order_refs(&app).await;
    let product = create_product(&app, "Widget", 100).await;

    let create_body = serde_json::json!({
        "user_id": &refs.user_id,
        "status_id": &refs.status_id,
        "payment_method_id": &refs.payment_method_id,
        "payment_status_id": &refs.payment_status_id,
        "items": [{"product_id": &product, "quantity": 1}],
    });
    let (status, json) = send_json(&app, "POST", "/orders", &create_body).await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = json["id"].as_str().unwrap().to_string();

    for path in [
        format!("/products/{product}"),
        format!("/users/{}", refs.user_id),
        format!("/status/{}", refs.status_id),
        format!("/paymentmethod/{}", refs.payment_method_id),
        format!("/paymentstatus/{}", refs.payment_status_id),
    ] {
        let (status, json) = send_empty(&app, "DELETE", &path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "DELETE {path}");
        assert_eq!(json["error"], "foreign_key_violation");
    }

    // Once the order is gone the product can be removed.
    let (status, _) = send_empty(&app, "DELETE", &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_empty(&app, "DELETE", &format!("/products/{product}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_flow() {
    let app = test_app();

    let register = serde_json::json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "correct horse",
    });
    let (status, json) = send_json(&app, "POST", "/auth/register", &register).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["email"], "ada@example.com");

    let login = serde_json::json!({"email": "ada@example.com", "password": "correct horse"});
    let (status, json) = send_json(&app, "POST", "/auth/login", &login).await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().unwrap().to_string();
    assert!(token.starts_with("tok_"));
    assert!(json["expires_at"].is_string());
    assert_eq!(json["user"]["email"], "ada@example.com");

    let me = |token: String| {
        Request::get("/auth/me")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, json) = send(&app, me(token.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "ada@example.com");

    let logout = Request::post("/auth/logout")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, logout).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The token is dead after logout.
    let (status, json) = send(&app, me(token.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");

    // Logging out again is a no-op.
    let logout = Request::post("/auth/logout")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, logout).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = test_app();

    create_user(&app, "ada@example.com").await;

    for body in [
        serde_json::json!({"email": "ada@example.com", "password": "wrong"}),
        serde_json::json!({"email": "nobody@example.com", "password": "secret"}),
    ] {
        let (status, json) = send_json(&app, "POST", "/auth/login", &body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");
        assert_eq!(json["error"], "unauthorized");
    }
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = test_app();

    let (status, _) = send_empty(&app, "GET", "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::get("/auth/me")
        .header("authorization", "Bearer tok_invalid")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn responses_never_expose_password_fields() {
    let app = test_app();

    let register = serde_json::json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "secret",
    });
    let (_, json) = send_json(&app, "POST", "/auth/register", &register).await;
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());

    let (_, json) = send_empty(&app, "GET", "/users").await;
    assert!(json["users"][0].get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

async fn seed_report_data(app: &Router) {
    let refs = seed_order_refs(app).await;
    let keyboard = create_product(app, "Keyboard", 4_500).await;
    let mouse = create_product(app, "Mouse", 2_500).await;

    for items in [
        serde_json::json!([{"product_id": &keyboard, "quantity": 1}]),
        serde_json::json!([
            {"product_id": &keyboard, "quantity": 1},
            {"product_id": &mouse, "quantity": 3},
        ]),
    ] {
        let body = serde_json::json!({
            "user_id": &refs.user_id,
            "status_id": &refs.status_id,
            "payment_method_id": &refs.payment_method_id,
            "payment_status_id": &refs.payment_status_id,
            "items": items,
        });
        let (status, _) = send_json(app, "POST", "/orders", &body).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn sales_report_aggregates_orders() {
    let app = test_app();
    seed_report_data(&app).await;

    // Orders: 4500 and 4500 + 3 * 2500 = 12000.
    let (status, json) = send_empty(&app, "GET", "/report/sales").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["orders"], 2);
    assert_eq!(json["revenue_cents"], 16_500);
    assert_eq!(json["average_order_cents"], 8_250);

    // A window in the future matches nothing.
    let (status, json) =
        send_empty(&app, "GET", "/report/sales?from=2999-01-01T00:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["orders"], 0);
    assert_eq!(json["revenue_cents"], 0);
    assert_eq!(json["average_order_cents"], 0);

    // A window covering everything matches both orders.
    let (status, json) = send_empty(
        &app,
        "GET",
        "/report/sales?from=2000-01-01T00:00:00Z&to=2999-01-01T00:00:00Z",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["orders"], 2);
}

#[tokio::test]
async fn product_report_ranks_by_revenue() {
    let app = test_app();
    seed_report_data(&app).await;

    let (status, json) = send_empty(&app, "GET", "/report/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);

    // Keyboard: 2 units, 9000 cents. Mouse: 3 units, 7500 cents.
    assert_eq!(json["products"][0]["name"], "Keyboard");
    assert_eq!(json["products"][0]["units_sold"], 2);
    assert_eq!(json["products"][0]["revenue_cents"], 9_000);
    assert_eq!(json["products"][1]["name"], "Mouse");
    assert_eq!(json["products"][1]["units_sold"], 3);
    assert_eq!(json["products"][1]["revenue_cents"], 7_500);
}
