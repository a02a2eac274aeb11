use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_products_table::Migration),
            Box::new(m20260101_000002_create_scan_history_table::Migration),
            Box::new(m20260101_000003_create_product_action_logs_table::Migration),
        ]
    }
}

// Migration implementations

mod m20260101_000001_create_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create products table aligned with entities::product Model
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(
                            ColumnDef::new(Products::Sku)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Products::Barcode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Quantity).integer().not_null())
                        .col(ColumnDef::new(Products::ExpiryDate).date().not_null())
                        .col(
                            ColumnDef::new(Products::AlertThreshold)
                                .integer()
                                .not_null()
                                .default(10),
                        )
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_barcode")
                        .table(Products::Table)
                        .col(Products::Barcode)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        Name,
        Sku,
        Barcode,
        Quantity,
        ExpiryDate,
        AlertThreshold,
        CreatedAt,
    }
}

mod m20260101_000002_create_scan_history_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000002_create_scan_history_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // No foreign key to products: unknown barcodes are recorded too
            manager
                .create_table(
                    Table::create()
                        .table(ScanHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ScanHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ScanHistory::Barcode).string().not_null())
                        .col(
                            ColumnDef::new(ScanHistory::Source)
                                .string()
                                .not_null()
                                .default("scanner"),
                        )
                        .col(
                            ColumnDef::new(ScanHistory::ScannedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_scan_history_scanned_at")
                        .table(ScanHistory::Table)
                        .col(ScanHistory::ScannedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ScanHistory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ScanHistory {
        Table,
        Id,
        Barcode,
        Source,
        ScannedAt,
    }
}

mod m20260101_000003_create_product_action_logs_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000003_create_product_action_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // product_id is a weak reference cleared by the application when
            // the product is deleted; no DB-level cascade
            manager
                .create_table(
                    Table::create()
                        .table(ProductActionLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductActionLogs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductActionLogs::ProductId).uuid().null())
                        .col(
                            ColumnDef::new(ProductActionLogs::ProductName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::ProductSku)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::Action)
                                .string_len(10)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::Source)
                                .string()
                                .not_null()
                                .default("manual"),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::QuantityChange)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::ThresholdChange)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::CurrentQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::CurrentThreshold)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductActionLogs::Timestamp)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_action_logs_timestamp")
                        .table(ProductActionLogs::Table)
                        .col(ProductActionLogs::Timestamp)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_action_logs_product_id")
                        .table(ProductActionLogs::Table)
                        .col(ProductActionLogs::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductActionLogs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductActionLogs {
        Table,
        Id,
        ProductId,
        ProductName,
        ProductSku,
        Action,
        Source,
        QuantityChange,
        ThresholdChange,
        CurrentQuantity,
        CurrentThreshold,
        Timestamp,
    }
}
