use crate::entities::product_action_log::{self, AuditAction};
use crate::entities::product;
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Source tag applied to audited actions when the caller does not supply one.
pub const DEFAULT_AUDIT_SOURCE: &str = "manual";

/// An auditable product mutation, carrying the state snapshots needed to
/// compute the change record.
#[derive(Debug, Clone, Copy)]
pub enum AuditEvent<'a> {
    /// Product was created; snapshot is the freshly inserted row
    Add { product: &'a product::Model },
    /// Product was updated; both pre- and post-edit snapshots
    Edit {
        before: &'a product::Model,
        after: &'a product::Model,
    },
    /// Product is being deleted; snapshot is the pre-delete state
    Delete { product: &'a product::Model },
}

/// Records one append-only `product_action_logs` row per product mutation.
///
/// The log write is deliberately a separate statement from the product write:
/// a failure here propagates to the caller and the already-performed product
/// write stands, which is the documented crash-window behavior.
#[derive(Clone)]
pub struct AuditLogService {
    db: Arc<DatabaseConnection>,
}

impl AuditLogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Persist exactly one log row for the given event.
    ///
    /// `source` falls back to `"manual"` when absent. For deletes the row is
    /// written while the product row still exists; the caller clears the weak
    /// `product_id` reference after removing the product.
    #[instrument(skip(self, event))]
    pub async fn record(
        &self,
        event: AuditEvent<'_>,
        source: Option<&str>,
    ) -> Result<product_action_log::Model, ServiceError> {
        let source = source.unwrap_or(DEFAULT_AUDIT_SOURCE);

        let (action, snapshot, quantity_change, threshold_change) = match event {
            AuditEvent::Add { product } => (
                AuditAction::Add,
                product,
                format!("+{}", product.quantity),
                format!("+{}", product.alert_threshold),
            ),
            AuditEvent::Edit { before, after } => (
                AuditAction::Edit,
                after,
                format_signed_delta(after.quantity - before.quantity),
                format_signed_delta(after.alert_threshold - before.alert_threshold),
            ),
            AuditEvent::Delete { product } => (
                AuditAction::Delete,
                product,
                // Deletes record the final values plain, without a sign prefix
                product.quantity.to_string(),
                product.alert_threshold.to_string(),
            ),
        };

        let entry = product_action_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(Some(snapshot.id)),
            product_name: Set(snapshot.name.clone()),
            product_sku: Set(snapshot.sku.clone()),
            action: Set(action),
            source: Set(source.to_string()),
            quantity_change: Set(quantity_change),
            threshold_change: Set(threshold_change),
            current_quantity: Set(snapshot.quantity),
            current_threshold: Set(snapshot.alert_threshold),
            timestamp: Set(Utc::now()),
        };

        let entry = entry.insert(&*self.db).await?;

        info!(
            product_id = %snapshot.id,
            action = ?entry.action,
            source = %entry.source,
            "Recorded product action"
        );
        Ok(entry)
    }
}

/// Formats a quantity/threshold delta as signed-decimal text: `"0"` for no
/// change, otherwise `"+N"` or `"-N"`.
pub fn format_signed_delta(delta: i32) -> String {
    if delta == 0 {
        "0".to_string()
    } else {
        format!("{:+}", delta)
    }
}
