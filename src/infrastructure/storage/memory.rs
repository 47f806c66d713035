//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus, ACTIVE_STATUSES,
};
use crate::domain::scheduling::TimeRange;
use crate::domain::station::{Station, StationRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};

/// In-memory storage for development and testing
///
/// Implements every repository trait itself, so one `Arc<InMemoryStorage>`
/// serves as a complete `RepositoryProvider`.
pub struct InMemoryStorage {
    stations: DashMap<i64, Station>,
    users: DashMap<String, User>,
    reservations: DashMap<i64, Reservation>,
    reservation_counter: AtomicI64,
    /// Serialises the overlap check and the insert in `persist`
    write_guard: Mutex<()>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            stations: DashMap::new(),
            users: DashMap::new(),
            reservations: DashMap::new(),
            reservation_counter: AtomicI64::new(1),
            write_guard: Mutex::new(()),
        }
    }

    /// Insert or replace a station.
    pub fn upsert_station(&self, station: Station) {
        self.stations.insert(station.id, station);
    }

    pub fn remove_station(&self, id: i64) {
        self.stations.remove(&id);
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Store a reservation as-is, bypassing the overlap check. Used to
    /// load fixtures in any status.
    pub fn seed_reservation(&self, new: NewReservation) -> Reservation {
        let id = self.reservation_counter.fetch_add(1, Ordering::SeqCst);
        let reservation = new.into_reservation(id, Utc::now());
        self.reservations.insert(id, reservation.clone());
        reservation
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    fn collect<F>(&self, predicate: F) -> Vec<Reservation>
    where
        F: Fn(&Reservation) -> bool,
    {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|r| (r.start, r.id));
        found
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationRepository for InMemoryStorage {
    async fn find_with_billing_info(&self, id: i64) -> DomainResult<Option<Station>> {
        Ok(self.stations.get(&id).map(|s| s.value().clone()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStorage {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStorage {
    async fn exists_overlapping(
        &self,
        station_id: i64,
        range: &TimeRange,
        statuses: &[ReservationStatus],
    ) -> DomainResult<bool> {
        Ok(self.reservations.iter().any(|entry| {
            let r = entry.value();
            r.station_id == station_id && statuses.contains(&r.status) && r.range().overlaps(range)
        }))
    }

    async fn find_overlapping(
        &self,
        station_id: i64,
        range: &TimeRange,
        statuses: &[ReservationStatus],
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect(|r| {
            r.station_id == station_id && statuses.contains(&r.status) && r.range().overlaps(range)
        }))
    }

    async fn find_covering(
        &self,
        station_id: i64,
        instant: DateTime<Utc>,
        statuses: &[ReservationStatus],
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect(|r| {
            r.station_id == station_id && statuses.contains(&r.status) && r.range().contains(instant)
        }))
    }

    async fn persist(&self, new: NewReservation) -> DomainResult<Reservation> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let clash = self.reservations.iter().any(|entry| {
            let r = entry.value();
            r.station_id == new.station_id
                && ACTIVE_STATUSES.contains(&r.status)
                && r.range().overlaps(&new.range)
        });
        if clash {
            return Err(DomainError::Conflict(format!(
                "station {} already booked in [{}, {})",
                new.station_id, new.range.start, new.range.end
            )));
        }

        Ok(self.seed_reservation(new))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.value().clone()))
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>> {
        let mut mine = self.collect(|r| r.user_id == user_id);
        mine.reverse();
        Ok(mine)
    }

    async fn find_for_user_by_id(
        &self,
        id: i64,
        user_id: &str,
    ) -> DomainResult<Option<Reservation>> {
        Ok(self
            .reservations
            .get(&id)
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone()))
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn stations(&self) -> &dyn StationRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::StationSnapshot;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn range(h: u32, minutes: i64) -> TimeRange {
        let start = Utc.with_ymd_and_hms(2026, 4, 7, h, 0, 0).unwrap();
        TimeRange::new(start, start + Duration::minutes(minutes))
    }

    fn new_reservation(user: &str, range: TimeRange) -> NewReservation {
        NewReservation::pending(
            1,
            user,
            range,
            dec!(5.50),
            StationSnapshot {
                name: "S".into(),
                address: "1 rue, 75001 Paris".into(),
                hourly_rate: dec!(5.00),
            },
        )
    }

    #[tokio::test]
    async fn persist_assigns_increasing_ids() {
        let storage = InMemoryStorage::new();
        let a = storage.persist(new_reservation("u", range(8, 60))).await.unwrap();
        let b = storage.persist(new_reservation("u", range(9, 60))).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(storage.reservation_count(), 2);
    }

    #[tokio::test]
    async fn persist_rejects_active_overlap_only() {
        let storage = InMemoryStorage::new();
        let mut cancelled = new_reservation("u", range(8, 60));
        cancelled.status = ReservationStatus::Cancelled;
        storage.seed_reservation(cancelled);

        storage.persist(new_reservation("u", range(8, 60))).await.unwrap();
        let err = storage.persist(new_reservation("v", range(8, 30))).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn user_bookings_latest_first() {
        let storage = InMemoryStorage::new();
        storage.persist(new_reservation("u", range(8, 30))).await.unwrap();
        storage.persist(new_reservation("u", range(12, 30))).await.unwrap();
        storage.persist(new_reservation("v", range(14, 30))).await.unwrap();

        let mine = storage.find_for_user("u").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].start > mine[1].start);
    }
}
