mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use uuid::Uuid;

use common::{product_payload, response_json, TestApp};
use stocktrack_api::entities::scan_history;

#[tokio::test]
async fn scan_history_is_newest_first_and_enriched_with_products() {
    let app = TestApp::new().await;

    app.request(
        Method::POST,
        "/api/products",
        Some(product_payload("Widget", "WID123", "999888777666", 50)),
    )
    .await;

    app.request(Method::GET, "/api/products/barcode/999888777666", None)
        .await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    let response = app
        .request(Method::GET, "/api/products/barcode/424242424242", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::GET, "/api/history", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history = response_json(response).await;
    let history = history.as_array().expect("history array");
    assert_eq!(history.len(), 2);

    // Most recent scan first
    assert_eq!(history[0]["barcode"], "424242424242");
    assert!(history[0]["product"].is_null());
    assert_eq!(history[1]["barcode"], "999888777666");
    assert_eq!(history[1]["product"]["sku"], "WID123");

    let newest: DateTime<Utc> = history[0]["scanned_at"]
        .as_str()
        .expect("scanned_at string")
        .parse()
        .expect("parse scanned_at");
    let older: DateTime<Utc> = history[1]["scanned_at"]
        .as_str()
        .expect("scanned_at string")
        .parse()
        .expect("parse scanned_at");
    assert!(newest > older);
}

#[tokio::test]
async fn todays_history_excludes_older_scans() {
    let app = TestApp::new().await;

    // Seed a scan from two days ago directly
    let backdated = scan_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        barcode: Set("111111111111".to_string()),
        source: Set("scanner".to_string()),
        scanned_at: Set(Utc::now() - ChronoDuration::days(2)),
    };
    backdated
        .insert(app.state.db.as_ref())
        .await
        .expect("insert backdated scan");

    app.request(Method::GET, "/api/products/barcode/222222222222", None)
        .await;

    let all = response_json(app.request(Method::GET, "/api/history", None).await).await;
    assert_eq!(all.as_array().expect("history array").len(), 2);

    let response = app.request(Method::GET, "/api/history/today", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let today = response_json(response).await;
    let today = today.as_array().expect("today array");
    assert_eq!(today.len(), 1);
    assert_eq!(today[0]["barcode"], "222222222222");
}

#[tokio::test]
async fn action_logs_are_newest_first() {
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

    tokio::time::sleep(Duration::from_millis(20)).await;
    app.request(
        Method::PUT,
        &format!("/api/products/{}", id),
        Some(json!({ "quantity": 60 })),
    )
    .await;

    let logs = response_json(app.request(Method::GET, "/api/logs", None).await).await;
    let logs = logs.as_array().expect("logs array");
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["action"], "edit");
    assert_eq!(logs[0]["quantity_change"], "+10");
    assert_eq!(logs[1]["action"], "add");
}
