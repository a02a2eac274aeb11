use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stocktrack API",
        description = "Inventory tracking API: product CRUD with an append-only audit trail, \
barcode scan resolution with prefix-similarity fallback, and scan/action reporting."
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::create_product,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::scans::lookup_by_barcode,
        crate::handlers::scans::scan_history,
        crate::handlers::scans::scan_history_today,
        crate::handlers::logs::list_action_logs,
        crate::handlers::health::health,
    ),
    components(schemas(
        crate::entities::product::Model,
        crate::entities::product_action_log::AuditAction,
        crate::errors::ErrorResponse,
        crate::services::products::CreateProductInput,
        crate::services::products::UpdateProductInput,
        crate::services::scans::BarcodeResolution,
        crate::services::reports::ScanProduct,
        crate::services::reports::ScanRecord,
        crate::services::reports::ActionLogProduct,
        crate::services::reports::ActionLogRecord,
    )),
    tags(
        (name = "products", description = "Product CRUD, audited"),
        (name = "scans", description = "Barcode resolution and scan history"),
        (name = "logs", description = "Product action audit trail"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document from
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
