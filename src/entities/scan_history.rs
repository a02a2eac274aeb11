use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded barcode scan event.
///
/// Deliberately not linked to `products` by foreign key so scans of unknown
/// barcodes are still recorded; correlation happens at read time by matching
/// the barcode string.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scan_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// The scanned barcode, whether or not a product carries it
    pub barcode: String,

    /// Origin of the scan (e.g. "scanner", "scan-from-add")
    pub source: String,

    /// Scan timestamp, set once at insert
    pub scanned_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.scanned_at {
                active_model.scanned_at = Set(Utc::now());
            }
        }

        Ok(active_model)
    }
}
