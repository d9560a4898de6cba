use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_materials_table::Migration),
            Box::new(m20250901_000002_create_stock_tables::Migration),
            Box::new(m20250901_000003_create_stock_movements_table::Migration),
            Box::new(m20250901_000004_create_sales_orders_tables::Migration),
            Box::new(m20250901_000005_create_collaborator_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20250901_000001_create_materials_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000001_create_materials_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Materials::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Materials::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Materials::Owner).string().not_null())
                        .col(ColumnDef::new(Materials::Category).string().not_null())
                        .col(ColumnDef::new(Materials::Company).string().not_null())
                        .col(ColumnDef::new(Materials::Name).string().not_null())
                        .col(ColumnDef::new(Materials::MaterialCode).string().not_null())
                        .col(
                            ColumnDef::new(Materials::Size)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Materials::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Materials::Image).string().null())
                        .col(ColumnDef::new(Materials::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Materials::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_materials_material_code")
                        .table(Materials::Table)
                        .col(Materials::MaterialCode)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_materials_category_company")
                        .table(Materials::Table)
                        .col(Materials::Category)
                        .col(Materials::Company)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Materials::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Materials {
        Table,
        Id,
        Owner,
        Category,
        Company,
        Name,
        MaterialCode,
        Size,
        UnitPrice,
        Image,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250901_000002_create_stock_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000002_create_stock_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TownStocks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TownStocks::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TownStocks::TownId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(TownStocks::TownName).string().not_null())
                        .col(ColumnDef::new(TownStocks::Towncode).string().not_null())
                        .col(ColumnDef::new(TownStocks::Region).string().not_null())
                        .col(ColumnDef::new(TownStocks::RegionId).uuid().null())
                        .col(ColumnDef::new(TownStocks::Area).string().not_null())
                        .col(ColumnDef::new(TownStocks::AreaId).uuid().null())
                        .col(ColumnDef::new(TownStocks::Territory).string().not_null())
                        .col(ColumnDef::new(TownStocks::TerritoryId).uuid().null())
                        .col(ColumnDef::new(TownStocks::Modifier).uuid().null())
                        .col(ColumnDef::new(TownStocks::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(TownStocks::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TownStockLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TownStockLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TownStockLines::TownStockId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TownStockLines::MaterialId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TownStockLines::Name).string().not_null())
                        .col(ColumnDef::new(TownStockLines::Company).string().not_null())
                        .col(ColumnDef::new(TownStockLines::Category).string().not_null())
                        .col(
                            ColumnDef::new(TownStockLines::Remaining)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(TownStockLines::Pending)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(TownStockLines::UpdatedAt).timestamp().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_town_stock_lines_town_stock")
                                .from(TownStockLines::Table, TownStockLines::TownStockId)
                                .to(TownStocks::Table, TownStocks::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_town_stock_lines_stock_material")
                        .table(TownStockLines::Table)
                        .col(TownStockLines::TownStockId)
                        .col(TownStockLines::MaterialId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserStocks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserStocks::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserStocks::UserId).uuid().not_null())
                        .col(ColumnDef::new(UserStocks::UserName).string().not_null())
                        .col(ColumnDef::new(UserStocks::Usercode).string().null())
                        .col(ColumnDef::new(UserStocks::UserRole).string().not_null())
                        .col(ColumnDef::new(UserStocks::TownId).uuid().not_null())
                        .col(ColumnDef::new(UserStocks::TownName).string().not_null())
                        .col(ColumnDef::new(UserStocks::Towncode).string().not_null())
                        .col(ColumnDef::new(UserStocks::Region).string().not_null())
                        .col(ColumnDef::new(UserStocks::Area).string().not_null())
                        .col(ColumnDef::new(UserStocks::Territory).string().not_null())
                        .col(ColumnDef::new(UserStocks::Modified).timestamp().not_null())
                        .col(ColumnDef::new(UserStocks::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(UserStocks::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_stocks_town_user")
                        .table(UserStocks::Table)
                        .col(UserStocks::TownId)
                        .col(UserStocks::UserId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserStockLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserStockLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserStockLines::UserStockId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserStockLines::MaterialId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserStockLines::Name).string().not_null())
                        .col(ColumnDef::new(UserStockLines::Company).string().null())
                        .col(ColumnDef::new(UserStockLines::Category).string().null())
                        .col(
                            ColumnDef::new(UserStockLines::Remaining)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(UserStockLines::Pending)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(UserStockLines::UpdatedAt).timestamp().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_user_stock_lines_user_stock")
                                .from(UserStockLines::Table, UserStockLines::UserStockId)
                                .to(UserStocks::Table, UserStocks::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_stock_lines_stock_material")
                        .table(UserStockLines::Table)
                        .col(UserStockLines::UserStockId)
                        .col(UserStockLines::MaterialId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserStockLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UserStocks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TownStockLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TownStocks::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum TownStocks {
        Table,
        Id,
        TownId,
        TownName,
        Towncode,
        Region,
        RegionId,
        Area,
        AreaId,
        Territory,
        TerritoryId,
        Modifier,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum TownStockLines {
        Table,
        Id,
        TownStockId,
        MaterialId,
        Name,
        Company,
        Category,
        Remaining,
        Pending,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum UserStocks {
        Table,
        Id,
        UserId,
        UserName,
        Usercode,
        UserRole,
        TownId,
        TownName,
        Towncode,
        Region,
        Area,
        Territory,
        Modified,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum UserStockLines {
        Table,
        Id,
        UserStockId,
        MaterialId,
        Name,
        Company,
        Category,
        Remaining,
        Pending,
        UpdatedAt,
    }
}

mod m20250901_000003_create_stock_movements_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000003_create_stock_movements_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::MaterialId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::MaterialName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::Kind).string().not_null())
                        .col(ColumnDef::new(StockMovements::Qty).integer().not_null())
                        .col(ColumnDef::new(StockMovements::FromKind).string().null())
                        .col(ColumnDef::new(StockMovements::FromId).uuid().null())
                        .col(ColumnDef::new(StockMovements::ToKind).string().null())
                        .col(ColumnDef::new(StockMovements::ToId).uuid().null())
                        .col(
                            ColumnDef::new(StockMovements::ReferenceType)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(StockMovements::ReferenceId).uuid().null())
                        .col(
                            ColumnDef::new(StockMovements::RecordedBy)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_movements_material_created")
                        .table(StockMovements::Table)
                        .col(StockMovements::MaterialId)
                        .col(StockMovements::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_movements_kind")
                        .table(StockMovements::Table)
                        .col(StockMovements::Kind)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockMovements::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum StockMovements {
        Table,
        Id,
        MaterialId,
        MaterialName,
        Kind,
        Qty,
        FromKind,
        FromId,
        ToKind,
        ToId,
        ReferenceType,
        ReferenceId,
        RecordedBy,
        CreatedAt,
    }
}

mod m20250901_000004_create_sales_orders_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000004_create_sales_orders_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrders::UserId).uuid().not_null())
                        .col(ColumnDef::new(SalesOrders::UserName).string().not_null())
                        .col(ColumnDef::new(SalesOrders::Usercode).string().null())
                        .col(ColumnDef::new(SalesOrders::UserRole).string().not_null())
                        .col(ColumnDef::new(SalesOrders::OutletId).uuid().not_null())
                        .col(ColumnDef::new(SalesOrders::OutletName).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::OutletChannel)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrders::OutletRoute).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::OutletRoutecode)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrders::Outletcode).string().not_null())
                        .col(ColumnDef::new(SalesOrders::OutletLat).double().not_null())
                        .col(ColumnDef::new(SalesOrders::OutletLon).double().not_null())
                        .col(ColumnDef::new(SalesOrders::TownId).uuid().not_null())
                        .col(ColumnDef::new(SalesOrders::TownName).string().not_null())
                        .col(ColumnDef::new(SalesOrders::Region).string().not_null())
                        .col(ColumnDef::new(SalesOrders::Area).string().not_null())
                        .col(ColumnDef::new(SalesOrders::Territory).string().not_null())
                        .col(ColumnDef::new(SalesOrders::Towncode).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::ExecutionStartAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::ExecutionEndAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrders::Duration).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::TotalOrderedAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::Discount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(SalesOrders::DeliveryType).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::DeliveryDate)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrders::PaymentMethod).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::Delivered)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::ExchangeRemarks)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(SalesOrders::ReturnRemarks).string().null())
                        .col(ColumnDef::new(SalesOrders::Lat).double().null())
                        .col(ColumnDef::new(SalesOrders::Lon).double().null())
                        .col(ColumnDef::new(SalesOrders::Distance).double().null())
                        .col(ColumnDef::new(SalesOrders::WithinRadius).boolean().null())
                        .col(
                            ColumnDef::new(SalesOrders::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_town_user_end")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::TownId)
                        .col(SalesOrders::UserId)
                        .col(SalesOrders::ExecutionEndAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderItems::OrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(SalesOrderItems::MaterialId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderItems::Name).string().not_null())
                        .col(ColumnDef::new(SalesOrderItems::Kind).string().not_null())
                        .col(ColumnDef::new(SalesOrderItems::Qty).integer().not_null())
                        .col(
                            ColumnDef::new(SalesOrderItems::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderItems::TotalPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderItems::Size)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_items_order")
                                .from(SalesOrderItems::Table, SalesOrderItems::OrderId)
                                .to(SalesOrders::Table, SalesOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_items_order")
                        .table(SalesOrderItems::Table)
                        .col(SalesOrderItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum SalesOrders {
        Table,
        Id,
        UserId,
        UserName,
        Usercode,
        UserRole,
        OutletId,
        OutletName,
        OutletChannel,
        OutletRoute,
        OutletRoutecode,
        Outletcode,
        OutletLat,
        OutletLon,
        TownId,
        TownName,
        Region,
        Area,
        Territory,
        Towncode,
        ExecutionStartAt,
        ExecutionEndAt,
        Duration,
        TotalOrderedAmount,
        Discount,
        DeliveryType,
        DeliveryDate,
        PaymentMethod,
        Delivered,
        ExchangeRemarks,
        ReturnRemarks,
        Lat,
        Lon,
        Distance,
        WithinRadius,
        CreatedAt,
    }

    #[derive(Iden)]
    enum SalesOrderItems {
        Table,
        Id,
        OrderId,
        MaterialId,
        Name,
        Kind,
        Qty,
        UnitPrice,
        TotalPrice,
        Size,
    }
}

mod m20250901_000005_create_collaborator_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250901_000005_create_collaborator_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Outlets::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Outlets::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Outlets::Name).string().not_null())
                        .col(ColumnDef::new(Outlets::Channel).string().not_null())
                        .col(ColumnDef::new(Outlets::Route).string().not_null())
                        .col(ColumnDef::new(Outlets::Routecode).string().null())
                        .col(ColumnDef::new(Outlets::Outletcode).string().not_null())
                        .col(ColumnDef::new(Outlets::ContactNo).string().null())
                        .col(ColumnDef::new(Outlets::Lat).double().not_null())
                        .col(ColumnDef::new(Outlets::Lon).double().not_null())
                        .col(ColumnDef::new(Outlets::LastVisitedAt).timestamp().null())
                        .col(ColumnDef::new(Outlets::LastOrderAmount).decimal().null())
                        .col(
                            ColumnDef::new(Outlets::LastOrderDelivered)
                                .boolean()
                                .null(),
                        )
                        .col(ColumnDef::new(Outlets::LastOrderId).uuid().null())
                        .col(ColumnDef::new(Outlets::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Outlets::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Attendances::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Attendances::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Attendances::UserId).uuid().not_null())
                        .col(ColumnDef::new(Attendances::UserName).string().not_null())
                        .col(ColumnDef::new(Attendances::TownId).uuid().not_null())
                        .col(
                            ColumnDef::new(Attendances::PunchInAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Attendances::PunchOutAt).timestamp().null())
                        .col(
                            ColumnDef::new(Attendances::HandOverAmount)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Attendances::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_attendances_town_user_punch_in")
                        .table(Attendances::Table)
                        .col(Attendances::TownId)
                        .col(Attendances::UserId)
                        .col(Attendances::PunchInAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Attendances::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Outlets::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Outlets {
        Table,
        Id,
        Name,
        Channel,
        Route,
        Routecode,
        Outletcode,
        ContactNo,
        Lat,
        Lon,
        LastVisitedAt,
        LastOrderAmount,
        LastOrderDelivered,
        LastOrderId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Attendances {
        Table,
        Id,
        UserId,
        UserName,
        TownId,
        PunchInAt,
        PunchOutAt,
        HandOverAmount,
        CreatedAt,
    }
}
