use super::SourceParam;
use crate::errors::ServiceError;
use crate::services::products::{CreateProductInput, UpdateProductInput};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

/// Create the products router
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/barcode/:barcode", get(super::scans::lookup_by_barcode))
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.products.list().await?;
    Ok(Json(products))
}

/// Create a product; records an `add` action log entry
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductInput,
    params(SourceParam),
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate SKU or barcode", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Query(params): Query<SourceParam>,
    Json(payload): Json<CreateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state
        .services
        .products
        .create(payload, params.source.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Fetch a single product
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.get(id).await?;
    Ok(Json(product))
}

/// Update a product; records an `edit` action log entry with field diffs
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID"), SourceParam),
    request_body = UpdateProductInput,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate SKU or barcode", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SourceParam>,
    Json(payload): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state
        .services
        .products
        .update(id, payload, params.source.as_deref())
        .await?;
    Ok(Json(product))
}

/// Delete a product; records a `delete` action log entry and clears the weak
/// product reference on existing log rows
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID"), SourceParam),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SourceParam>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .products
        .delete(id, params.source.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
