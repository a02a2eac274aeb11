pub mod product;
pub mod product_action_log;
pub mod scan_history;

pub use product::Entity as Product;
pub use product_action_log::Entity as ProductActionLog;
pub use scan_history::Entity as ScanHistory;
