use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only audit record for product mutations.
///
/// `product_id` is a weak reference: it is cleared when the product row is
/// deleted, while the `product_name`/`product_sku` snapshots keep the values
/// captured at action time. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_action_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Weak reference to the product; None once the product is deleted
    pub product_id: Option<Uuid>,

    /// Product name at the time of the action
    pub product_name: String,

    /// Product SKU at the time of the action
    pub product_sku: String,

    /// What happened: add, edit or delete
    pub action: AuditAction,

    /// Origin of the action (e.g. "manual", "import")
    pub source: String,

    /// Signed-delta text for the quantity ("+3", "-1", "0"; plain number for deletes)
    pub quantity_change: String,

    /// Signed-delta text for the alert threshold
    pub threshold_change: String,

    /// Quantity after the action (pre-delete value for deletes)
    pub current_quantity: i32,

    /// Threshold after the action (pre-delete value for deletes)
    pub current_threshold: i32,

    /// When the action was recorded
    pub timestamp: DateTime<Utc>,
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
            if let ActiveValue::NotSet = active_model.timestamp {
                active_model.timestamp = Set(Utc::now());
            }
        }

        Ok(active_model)
    }
}

/// Audit action enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    #[sea_orm(string_value = "add")]
    Add,
    #[sea_orm(string_value = "edit")]
    Edit,
    #[sea_orm(string_value = "delete")]
    Delete,
}
