mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use common::{expect_status, read_json, TestApp};

fn base_date() -> DateTime<Utc> {
    "2024-05-01T12:00:00Z".parse().unwrap()
}

async fn seed_vendor(app: &TestApp, code: &str) {
    let response = app
        .request_authenticated(
            Method::POST,
            "/vendors/",
            Some(json!({
                "vendor_code": code,
                "name": format!("Vendor {code}"),
                "contact_details": "orders@vendor.example",
                "address": "1 Factory Lane, Springfield",
            })),
        )
        .await;
    expect_status(response, StatusCode::CREATED).await;
}

fn order_payload(po_number: &str, vendor_code: &str, status: &str) -> Value {
    json!({
        "po_number": po_number,
        "vendor_code": vendor_code,
        "order_date": base_date(),
        "items": [{"sku": "WIDGET-1", "qty": 10}],
        "status": status,
        "issue_date": base_date(),
    })
}

async fn performance(app: &TestApp, vendor_code: &str) -> Value {
    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/vendors/{vendor_code}/performance/"),
            None,
        )
        .await;
    expect_status(response, StatusCode::OK).await
}

fn assert_metric(body: &Value, key: &str, expected: f64) {
    let actual = body[key].as_f64().unwrap_or_else(|| panic!("{key} missing"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "{key}: expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn create_and_fetch_purchase_order() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "V001", "pending")),
        )
        .await;
    let created = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(created["po_number"], "PO-1");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["items"][0]["sku"], "WIDGET-1");

    let response = app
        .request_authenticated(Method::GET, "/purchase_orders/PO-1/", None)
        .await;
    let fetched = expect_status(response, StatusCode::OK).await;
    assert_eq!(fetched["vendor_code"], "V001");
}

#[tokio::test]
async fn unknown_vendor_on_creation_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "GHOST", "pending")),
        )
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(body["message"].as_str().unwrap().contains("does not exist"));
}

#[tokio::test]
async fn invalid_status_is_a_validation_error() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "V001", "shipped")),
        )
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(body["message"].as_str().unwrap().contains("not a valid status"));
}

#[tokio::test]
async fn completed_orders_drive_on_time_and_quality_metrics() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let due = base_date();

    // One order delivered an hour early with rating 4, one an hour late with
    // rating 2.
    let mut early = order_payload("PO-1", "V001", "completed");
    early["delivery_date"] = json!(due);
    early["delivered_date"] = json!(due - Duration::hours(1));
    early["quality_rating"] = json!(4.0);

    let mut late = order_payload("PO-2", "V001", "completed");
    late["delivery_date"] = json!(due);
    late["delivered_date"] = json!(due + Duration::hours(1));
    late["quality_rating"] = json!(2.0);

    for payload in [early, late] {
        let response = app
            .request_authenticated(Method::POST, "/purchase_orders/", Some(payload))
            .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    let metrics = performance(&app, "V001").await;
    assert_metric(&metrics, "on_time_delivery_rate", 0.5);
    assert_metric(&metrics, "quality_rating_avg", 3.0);
    assert_metric(&metrics, "fulfillment_rate", 1.0);
}

#[tokio::test]
async fn zero_completed_orders_keep_rates_at_zero() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "V001", "pending")),
        )
        .await;
    expect_status(response, StatusCode::CREATED).await;

    let metrics = performance(&app, "V001").await;
    assert_metric(&metrics, "on_time_delivery_rate", 0.0);
    assert_metric(&metrics, "quality_rating_avg", 0.0);
    assert_metric(&metrics, "fulfillment_rate", 0.0);
}

#[tokio::test]
async fn fulfillment_counts_all_statuses_in_the_denominator() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let mut completed = order_payload("PO-1", "V001", "completed");
    completed["delivered_date"] = json!(base_date());
    for payload in [
        completed,
        order_payload("PO-2", "V001", "pending"),
        order_payload("PO-3", "V001", "canceled"),
        order_payload("PO-4", "V001", "pending"),
    ] {
        let response = app
            .request_authenticated(Method::POST, "/purchase_orders/", Some(payload))
            .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    let metrics = performance(&app, "V001").await;
    assert_metric(&metrics, "fulfillment_rate", 0.25);
}

#[tokio::test]
async fn completing_an_order_stamps_delivered_date_exactly_once() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "V001", "pending")),
        )
        .await;
    let created = expect_status(response, StatusCode::CREATED).await;
    assert!(created["delivered_date"].is_null());

    // First transition to completed stamps the completion timestamp.
    let response = app
        .request_authenticated(
            Method::PATCH,
            "/purchase_orders/PO-1/",
            Some(json!({"status": "completed"})),
        )
        .await;
    let completed = expect_status(response, StatusCode::OK).await;
    let stamped = completed["delivered_date"]
        .as_str()
        .expect("delivered_date should be stamped")
        .to_string();

    // A later save leaves the stamp untouched.
    let response = app
        .request_authenticated(
            Method::PATCH,
            "/purchase_orders/PO-1/",
            Some(json!({"quality_rating": 5.0})),
        )
        .await;
    let resaved = expect_status(response, StatusCode::OK).await;
    assert_eq!(resaved["delivered_date"].as_str(), Some(stamped.as_str()));
}

#[tokio::test]
async fn acknowledge_persists_the_date_verbatim_and_updates_response_time() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "V001", "pending")),
        )
        .await;
    expect_status(response, StatusCode::CREATED).await;

    let ack = base_date() + Duration::seconds(600);
    let response = app
        .request_authenticated(
            Method::PUT,
            "/purchase_orders/PO-1/acknowledge/",
            Some(json!({"acknowledgment_date": ack})),
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;

    let stored: DateTime<Utc> = body["acknowledgment_date"]
        .as_str()
        .expect("acknowledgment_date in response")
        .parse()
        .expect("acknowledgment_date parses");
    assert_eq!(stored, ack);

    let metrics = performance(&app, "V001").await;
    assert_metric(&metrics, "average_response_time", 600.0);
}

#[tokio::test]
async fn acknowledging_an_unknown_order_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/purchase_orders/NOPE/acknowledge/",
            Some(json!({"acknowledgment_date": base_date()})),
        )
        .await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn deleting_a_vendor_cascades_to_its_purchase_orders() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    for po in ["PO-1", "PO-2"] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/purchase_orders/",
                Some(order_payload(po, "V001", "pending")),
            )
            .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    let response = app
        .request_authenticated(Method::DELETE, "/vendors/V001/", None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for po in ["PO-1", "PO-2"] {
        let response = app
            .request_authenticated(Method::GET, &format!("/purchase_orders/{po}/"), None)
            .await;
        expect_status(response, StatusCode::NOT_FOUND).await;
    }
}

#[tokio::test]
async fn delete_purchase_order_then_404() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/purchase_orders/",
            Some(order_payload("PO-1", "V001", "pending")),
        )
        .await;
    expect_status(response, StatusCode::CREATED).await;

    let response = app
        .request_authenticated(Method::DELETE, "/purchase_orders/PO-1/", None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request_authenticated(Method::GET, "/purchase_orders/PO-1/", None)
        .await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn listing_filters_by_vendor() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;
    seed_vendor(&app, "V002").await;

    for (po, vendor) in [("PO-1", "V001"), ("PO-2", "V002"), ("PO-3", "V001")] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/purchase_orders/",
                Some(order_payload(po, vendor, "pending")),
            )
            .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    let response = app
        .request_authenticated(Method::GET, "/purchase_orders/?vendor=V001", None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["total"], 2);

    let response = app
        .request_authenticated(Method::GET, "/purchase_orders/", None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn malformed_json_body_is_a_400() {
    let app = TestApp::new().await;
    seed_vendor(&app, "V001").await;

    // order_date has the wrong type; the body extractor reports it as a
    // validation failure rather than a 422.
    let mut payload = order_payload("PO-1", "V001", "pending");
    payload["order_date"] = json!(12345);

    let response = app
        .request_authenticated(Method::POST, "/purchase_orders/", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["message"].as_str().is_some());
}
