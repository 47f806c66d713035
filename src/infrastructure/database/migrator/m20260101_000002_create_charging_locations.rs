//! Create charging_locations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChargingLocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChargingLocations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChargingLocations::Name).string().not_null())
                    .col(ColumnDef::new(ChargingLocations::Street).string().not_null())
                    .col(ColumnDef::new(ChargingLocations::PostalCode).string().not_null())
                    .col(ColumnDef::new(ChargingLocations::City).string().not_null())
                    .col(
                        ColumnDef::new(ChargingLocations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChargingLocations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ChargingLocations {
    Table,
    Id,
    Name,
    Street,
    PostalCode,
    City,
    CreatedAt,
}
