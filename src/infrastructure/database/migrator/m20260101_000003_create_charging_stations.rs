//! Create charging_stations table

use sea_orm_migration::prelude::*;

use super::m20260101_000002_create_charging_locations::ChargingLocations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChargingStations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChargingStations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::LocationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChargingStations::Name).string().not_null())
                    .col(
                        ColumnDef::new(ChargingStations::HourlyRateCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ChargingStations::AvailableFromMinute).integer())
                    .col(ColumnDef::new(ChargingStations::AvailableToMinute).integer())
                    .col(
                        ColumnDef::new(ChargingStations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_charging_stations_location")
                            .from(ChargingStations::Table, ChargingStations::LocationId)
                            .to(ChargingLocations::Table, ChargingLocations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_charging_stations_location")
                    .table(ChargingStations::Table)
                    .col(ChargingStations::LocationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChargingStations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ChargingStations {
    Table,
    Id,
    LocationId,
    Name,
    HourlyRateCents,
    IsActive,
    AvailableFromMinute,
    AvailableToMinute,
    CreatedAt,
    UpdatedAt,
}
