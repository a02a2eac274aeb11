use crate::entities::{product, product_action_log};
use crate::errors::ServiceError;
use crate::services::audit::{AuditEvent, AuditLogService};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Alert threshold applied when a creation request omits one.
pub const DEFAULT_ALERT_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 50,
        message = "SKU must be between 1 and 50 characters"
    ))]
    pub sku: String,

    #[validate(length(
        min = 1,
        max = 50,
        message = "Barcode must be between 1 and 50 characters"
    ))]
    pub barcode: String,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,

    pub expiry_date: NaiveDate,

    #[validate(range(min = 0, message = "Alert threshold cannot be negative"))]
    pub alert_threshold: Option<i32>,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(
        min = 1,
        max = 50,
        message = "SKU must be between 1 and 50 characters"
    ))]
    pub sku: Option<String>,

    #[validate(length(
        min = 1,
        max = 50,
        message = "Barcode must be between 1 and 50 characters"
    ))]
    pub barcode: Option<String>,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,

    pub expiry_date: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Alert threshold cannot be negative"))]
    pub alert_threshold: Option<i32>,
}

/// Product CRUD with an audit-log write on every mutation.
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    audit: AuditLogService,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, audit: AuditLogService) -> Self {
        Self { db, audit }
    }

    /// List every product.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        let products = product::Entity::find().all(&*self.db).await?;
        Ok(products)
    }

    /// Fetch a product by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {} not found", id)))
    }

    /// Create a product and record an `add` action.
    ///
    /// The product insert and the audit write are two separate statements; a
    /// crash between them leaves a product without its `add` log row, which
    /// is accepted behavior.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateProductInput,
        source: Option<&str>,
    ) -> Result<product::Model, ServiceError> {
        input.validate()?;
        self.ensure_unique_sku(&input.sku, None).await?;
        self.ensure_unique_barcode(&input.barcode, None).await?;

        let product = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            sku: Set(input.sku),
            barcode: Set(input.barcode),
            quantity: Set(input.quantity),
            expiry_date: Set(input.expiry_date),
            alert_threshold: Set(input.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD)),
            created_at: Set(Utc::now()),
        };

        let product = product.insert(&*self.db).await?;

        self.audit
            .record(AuditEvent::Add { product: &product }, source)
            .await?;

        info!("Created product: {}", product.id);
        Ok(product)
    }

    /// Apply a partial update and record an `edit` action with field diffs.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
        source: Option<&str>,
    ) -> Result<product::Model, ServiceError> {
        input.validate()?;

        let before = self.get(id).await?;

        if let Some(ref sku) = input.sku {
            self.ensure_unique_sku(sku, Some(id)).await?;
        }
        if let Some(ref barcode) = input.barcode {
            self.ensure_unique_barcode(barcode, Some(id)).await?;
        }

        let mut active: product::ActiveModel = before.clone().into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(sku) = input.sku {
            active.sku = Set(sku);
        }
        if let Some(barcode) = input.barcode {
            active.barcode = Set(barcode);
        }
        if let Some(quantity) = input.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(expiry_date) = input.expiry_date {
            active.expiry_date = Set(expiry_date);
        }
        if let Some(alert_threshold) = input.alert_threshold {
            active.alert_threshold = Set(alert_threshold);
        }

        let after = active.update(&*self.db).await?;

        self.audit
            .record(
                AuditEvent::Edit {
                    before: &before,
                    after: &after,
                },
                source,
            )
            .await?;

        info!("Updated product: {}", id);
        Ok(after)
    }

    /// Delete a product, recording a `delete` action from its pre-delete
    /// state and clearing the weak reference on every log row that points at
    /// it (the snapshot columns stay intact).
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid, source: Option<&str>) -> Result<(), ServiceError> {
        let product = self.get(id).await?;

        self.audit
            .record(AuditEvent::Delete { product: &product }, source)
            .await?;

        product.delete(&*self.db).await?;

        product_action_log::Entity::update_many()
            .col_expr(
                product_action_log::Column::ProductId,
                Expr::value(Option::<Uuid>::None),
            )
            .filter(product_action_log::Column::ProductId.eq(id))
            .exec(&*self.db)
            .await?;

        info!("Deleted product: {}", id);
        Ok(())
    }

    async fn ensure_unique_sku(&self, sku: &str, exclude: Option<Uuid>) -> Result<(), ServiceError> {
        let mut query = product::Entity::find().filter(product::Column::Sku.eq(sku));
        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "A product with SKU '{}' already exists",
                sku
            )));
        }
        Ok(())
    }

    async fn ensure_unique_barcode(
        &self,
        barcode: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = product::Entity::find().filter(product::Column::Barcode.eq(barcode));
        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "A product with barcode '{}' already exists",
                barcode
            )));
        }
        Ok(())
    }
}
