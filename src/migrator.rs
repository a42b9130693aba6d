use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_vendors_table::Migration),
            Box::new(m20240601_000002_create_purchase_orders_table::Migration),
            Box::new(m20240601_000003_create_historical_performance_table::Migration),
            Box::new(m20240601_000004_create_auth_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240601_000001_create_vendors_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_vendors_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vendors::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Vendors::VendorCode)
                                .string_len(50)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Vendors::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Vendors::ContactDetails).text().not_null())
                        .col(ColumnDef::new(Vendors::Address).text().not_null())
                        .col(
                            ColumnDef::new(Vendors::OnTimeDeliveryRate)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Vendors::QualityRatingAvg)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Vendors::AverageResponseTime)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Vendors::FulfillmentRate)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vendors::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Vendors {
        Table,
        VendorCode,
        Name,
        ContactDetails,
        Address,
        OnTimeDeliveryRate,
        QualityRatingAvg,
        AverageResponseTime,
        FulfillmentRate,
    }
}

mod m20240601_000002_create_purchase_orders_table {

    use sea_orm_migration::prelude::*;

    use super::m20240601_000001_create_vendors_table::Vendors;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_purchase_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::PoNumber)
                                .string_len(50)
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::VendorCode)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::OrderDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::DeliveryDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::Items).json().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::Status)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::QualityRating).double().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::IssueDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::AcknowledgmentDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::DeliveredDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_orders_vendor")
                                .from(PurchaseOrders::Table, PurchaseOrders::VendorCode)
                                .to(Vendors::Table, Vendors::VendorCode)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_purchase_orders_vendor_code")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::VendorCode)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PurchaseOrders {
        Table,
        PoNumber,
        VendorCode,
        OrderDate,
        DeliveryDate,
        Items,
        Status,
        QualityRating,
        IssueDate,
        AcknowledgmentDate,
        DeliveredDate,
    }
}

mod m20240601_000003_create_historical_performance_table {

    use sea_orm_migration::prelude::*;

    use super::m20240601_000001_create_vendors_table::Vendors;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_historical_performance_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(HistoricalPerformance::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HistoricalPerformance::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(HistoricalPerformance::VendorCode)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistoricalPerformance::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistoricalPerformance::OnTimeDeliveryRate)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistoricalPerformance::QualityRatingAvg)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistoricalPerformance::AverageResponseTime)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistoricalPerformance::FulfillmentRate)
                                .double()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_historical_performance_vendor")
                                .from(
                                    HistoricalPerformance::Table,
                                    HistoricalPerformance::VendorCode,
                                )
                                .to(Vendors::Table, Vendors::VendorCode)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(HistoricalPerformance::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum HistoricalPerformance {
        Table,
        Id,
        VendorCode,
        Date,
        OnTimeDeliveryRate,
        QualityRatingAvg,
        AverageResponseTime,
        FulfillmentRate,
    }
}

mod m20240601_000004_create_auth_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_auth_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string_len(255)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).text().not_null())
                        .col(
                            ColumnDef::new(Users::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RefreshTokens::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RefreshTokens::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(RefreshTokens::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(RefreshTokens::TokenId)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::ExpiresAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::Revoked)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_refresh_tokens_user")
                                .from(RefreshTokens::Table, RefreshTokens::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RefreshTokens::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Name,
        Email,
        PasswordHash,
        Active,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum RefreshTokens {
        Table,
        Id,
        UserId,
        TokenId,
        CreatedAt,
        ExpiresAt,
        Revoked,
    }
}
