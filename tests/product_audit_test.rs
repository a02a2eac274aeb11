mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{product_payload, response_json, TestApp};

#[tokio::test]
async fn creating_a_product_logs_an_add_action() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let product = response_json(response).await;
    assert_eq!(product["sku"], "WID123");
    assert_eq!(product["quantity"], 50);

    let response = app.request(Method::GET, "/api/logs", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let logs = response_json(response).await;
    let logs = logs.as_array().expect("logs array");
    assert_eq!(logs.len(), 1);

    let log = &logs[0];
    assert_eq!(log["action"], "add");
    assert_eq!(log["source"], "manual");
    assert_eq!(log["quantity_change"], "+50");
    assert_eq!(log["threshold_change"], "+5");
    assert_eq!(log["current_quantity"], 50);
    assert_eq!(log["current_threshold"], 5);
    assert_eq!(log["product"]["sku"], "WID123");
    assert_eq!(log["product"]["name"], "Widget");
    assert_eq!(log["product"]["id"], product["id"]);
}

#[tokio::test]
async fn unchanged_edit_logs_zero_deltas() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    let product = response_json(response).await;
    let id = product["id"].as_str().expect("product id");

    let response = app
        .request(
            Method::PUT,
            &format!("/api/products/{}", id),
            Some(json!({ "quantity": 50, "alert_threshold": 5 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    let log = &logs.as_array().expect("logs array")[0];
    assert_eq!(log["action"], "edit");
    assert_eq!(log["quantity_change"], "0");
    assert_eq!(log["threshold_change"], "0");
}

#[tokio::test]
async fn decreasing_edit_logs_negative_delta() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    let product = response_json(response).await;
    let id = product["id"].as_str().expect("product id");

    let response = app
        .request(
            Method::PUT,
            &format!("/api/products/{}", id),
            Some(json!({ "quantity": 45 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["quantity"], 45);

    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    let log = &logs.as_array().expect("logs array")[0];
    assert_eq!(log["action"], "edit");
    assert_eq!(log["quantity_change"], "-5");
    assert_eq!(log["threshold_change"], "0");
    assert_eq!(log["current_quantity"], 45);
}

#[tokio::test]
async fn increasing_threshold_logs_positive_delta() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    let product = response_json(response).await;
    let id = product["id"].as_str().expect("product id");

    app.request(
        Method::PUT,
        &format!("/api/products/{}", id),
        Some(json!({ "alert_threshold": 8 })),
    )
    .await;

    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    let log = &logs.as_array().expect("logs array")[0];
    assert_eq!(log["threshold_change"], "+3");
    assert_eq!(log["current_threshold"], 8);
}

#[tokio::test]
async fn deletion_preserves_snapshots_and_clears_product_reference() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    let product = response_json(response).await;
    let id = product["id"].as_str().expect("product id").to_string();

    let response = app
        .request(Method::DELETE, &format!("/api/products/{}", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::GET, &format!("/api/products/{}", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    let logs = logs.as_array().expect("logs array");
    assert_eq!(logs.len(), 2);

    let delete_log = &logs[0];
    assert_eq!(delete_log["action"], "delete");
    // Deletes record final values plain, without a sign prefix
    assert_eq!(delete_log["quantity_change"], "50");
    assert_eq!(delete_log["threshold_change"], "5");
    assert_eq!(delete_log["current_quantity"], 50);
    assert!(delete_log["product"]["id"].is_null());
    assert_eq!(delete_log["product"]["name"], "Widget");
    assert_eq!(delete_log["product"]["sku"], "WID123");

    // The earlier add log's weak reference is cleared too
    let add_log = &logs[1];
    assert_eq!(add_log["action"], "add");
    assert!(add_log["product"]["id"].is_null());
    assert_eq!(add_log["product"]["sku"], "WID123");
}

#[tokio::test]
async fn negative_quantity_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Widget",
                "sku": "WID123",
                "barcode": "999888777666",
                "quantity": -1,
                "expiry_date": "2027-06-30"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("error message")
        .contains("Quantity cannot be negative"));

    // Nothing was created and nothing was logged
    let products = response_json(app.request(Method::GET, "/api/products", None).await).await;
    assert!(products.as_array().expect("products array").is_empty());
    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    assert!(logs.as_array().expect("logs array").is_empty());
}

#[tokio::test]
async fn duplicate_sku_is_rejected_with_conflict() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Other widget", "WID123", "111222333444", 10)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(product_payload("Other widget", "WID999", "999888777666", 10)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn source_query_parameter_overrides_audit_source() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products?source=import",
            Some(product_payload("Widget", "WID123", "999888777666", 50)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    let log = &logs.as_array().expect("logs array")[0];
    assert_eq!(log["source"], "import");
}

#[tokio::test]
async fn updating_a_missing_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::PUT,
            "/api/products/00000000-0000-0000-0000-000000000000",
            Some(json!({ "quantity": 1 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
