//! Create reservations table
//!
//! No foreign key to stations: snapshot columns keep a reservation
//! self-describing after its station is gone.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::StationId).integer().not_null())
                    .col(ColumnDef::new(Reservations::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Reservations::TotalPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::StationNameSnapshot)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::StationAddressSnapshot)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::HourlyRateSnapshotCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_station_time")
                    .table(Reservations::Table)
                    .col(Reservations::StationId)
                    .col(Reservations::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    StationId,
    UserId,
    StartTime,
    EndTime,
    Status,
    TotalPriceCents,
    StationNameSnapshot,
    StationAddressSnapshot,
    HourlyRateSnapshotCents,
    CreatedAt,
    UpdatedAt,
}
