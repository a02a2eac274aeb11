pub mod health;
pub mod logs;
pub mod products;
pub mod scans;

use crate::db::DbPool;
use crate::services::{AuditLogService, ProductService, ReportService, ScanService};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Optional `?source=` override carried by write and scan endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SourceParam {
    /// Free-form origin tag recorded on the audit/scan row
    pub source: Option<String>,
}

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub scans: Arc<ScanService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let audit = AuditLogService::new(db_pool.clone());
        let products = Arc::new(ProductService::new(db_pool.clone(), audit));
        let scans = Arc::new(ScanService::new(db_pool.clone()));
        let reports = Arc::new(ReportService::new(db_pool));

        Self {
            products,
            scans,
            reports,
        }
    }
}
