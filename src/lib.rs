//! Stocktrack API Library
//!
//! Inventory tracking over HTTP: audited product CRUD, barcode scan
//! resolution, and read-only reporting over scans and action logs.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
#[allow(elided_lifetimes_in_paths)]
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// Compose the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::products::product_routes())
        .nest("/history", handlers::scans::history_routes())
        .route("/logs", get(handlers::logs::list_action_logs))
        .route("/health", get(handlers::health::health))
}
