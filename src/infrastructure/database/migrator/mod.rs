//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_users;
mod m20260101_000002_create_charging_locations;
mod m20260101_000003_create_charging_stations;
mod m20260101_000004_create_reservations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_users::Migration),
            Box::new(m20260101_000002_create_charging_locations::Migration),
            Box::new(m20260101_000003_create_charging_stations::Migration),
            Box::new(m20260101_000004_create_reservations::Migration),
        ]
    }
}
