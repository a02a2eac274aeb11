// Core services
pub mod audit;
pub mod products;
pub mod reports;
pub mod scans;

pub use audit::AuditLogService;
pub use products::ProductService;
pub use reports::ReportService;
pub use scans::ScanService;
