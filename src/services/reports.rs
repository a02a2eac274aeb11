use crate::entities::product_action_log::AuditAction;
use crate::entities::{product, product_action_log, scan_history};
use crate::errors::ServiceError;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Current product carrying a scanned barcode, looked up at read time.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScanProduct {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
}

/// One scan history row, enriched with the product currently carrying the
/// barcode (if any).
#[derive(Debug, Serialize, ToSchema)]
pub struct ScanRecord {
    pub barcode: String,
    pub source: String,
    pub scanned_at: DateTime<Utc>,
    pub product: Option<ScanProduct>,
}

/// Snapshot block of an action log row; `id` is the live product reference
/// and is absent once the product has been deleted.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionLogProduct {
    pub id: Option<Uuid>,
    pub name: String,
    pub sku: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionLogRecord {
    pub product: ActionLogProduct,
    pub action: AuditAction,
    pub source: String,
    pub quantity_change: String,
    pub threshold_change: String,
    pub current_quantity: i32,
    pub current_threshold: i32,
    pub timestamp: DateTime<Utc>,
}

/// Read-only reporting over scans and action logs.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DatabaseConnection>,
}

impl ReportService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Every scan, newest first, enriched with a best-effort lookup of the
    /// product currently carrying each barcode. Product data reflects current
    /// state, not state at scan time.
    #[instrument(skip(self))]
    pub async fn list_scan_history(&self) -> Result<Vec<ScanRecord>, ServiceError> {
        let scans = scan_history::Entity::find()
            .order_by_desc(scan_history::Column::ScannedAt)
            .all(&*self.db)
            .await?;

        self.enrich_scans(scans).await
    }

    /// Scans whose timestamp falls on the server's local calendar date,
    /// newest first.
    #[instrument(skip(self))]
    pub async fn list_scans_today(&self) -> Result<Vec<ScanRecord>, ServiceError> {
        let (start, end) = local_day_bounds(Local::now().date_naive());

        let scans = scan_history::Entity::find()
            .filter(scan_history::Column::ScannedAt.gte(start))
            .filter(scan_history::Column::ScannedAt.lt(end))
            .order_by_desc(scan_history::Column::ScannedAt)
            .all(&*self.db)
            .await?;

        self.enrich_scans(scans).await
    }

    /// All product action logs, newest first.
    #[instrument(skip(self))]
    pub async fn list_action_logs(&self) -> Result<Vec<ActionLogRecord>, ServiceError> {
        let logs = product_action_log::Entity::find()
            .order_by_desc(product_action_log::Column::Timestamp)
            .all(&*self.db)
            .await?;

        Ok(logs
            .into_iter()
            .map(|log| ActionLogRecord {
                product: ActionLogProduct {
                    id: log.product_id,
                    name: log.product_name,
                    sku: log.product_sku,
                },
                action: log.action,
                source: log.source,
                quantity_change: log.quantity_change,
                threshold_change: log.threshold_change,
                current_quantity: log.current_quantity,
                current_threshold: log.current_threshold,
                timestamp: log.timestamp,
            })
            .collect())
    }

    async fn enrich_scans(
        &self,
        scans: Vec<scan_history::Model>,
    ) -> Result<Vec<ScanRecord>, ServiceError> {
        let barcodes: Vec<String> = scans.iter().map(|s| s.barcode.clone()).collect();

        let mut by_barcode: HashMap<String, product::Model> = HashMap::new();
        if !barcodes.is_empty() {
            let products = product::Entity::find()
                .filter(product::Column::Barcode.is_in(barcodes))
                .all(&*self.db)
                .await?;
            for p in products {
                by_barcode.insert(p.barcode.clone(), p);
            }
        }

        Ok(scans
            .into_iter()
            .map(|scan| {
                let product = by_barcode.get(&scan.barcode).map(|p| ScanProduct {
                    id: p.id,
                    name: p.name.clone(),
                    sku: p.sku.clone(),
                });
                ScanRecord {
                    barcode: scan.barcode,
                    source: scan.source,
                    scanned_at: scan.scanned_at,
                    product,
                }
            })
            .collect())
    }
}

/// UTC half-open range [midnight, next midnight) of the given local calendar
/// date. Falls back to interpreting midnight as UTC when the local timezone
/// skips it (DST transitions at midnight).
fn local_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let to_utc = |naive: NaiveDateTime| {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    };
    let start = day.and_time(NaiveTime::MIN);
    (to_utc(start), to_utc(start + Duration::days(1)))
}
