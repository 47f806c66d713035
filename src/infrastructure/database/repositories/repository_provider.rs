//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::station::StationRepository;
use crate::domain::user::UserRepository;

use super::reservation_repository::SeaOrmReservationRepository;
use super::station_repository::SeaOrmStationRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let station = repos.stations().find_with_billing_info(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    stations: SeaOrmStationRepository,
    users: SeaOrmUserRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            stations: SeaOrmStationRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}
