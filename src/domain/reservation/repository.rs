//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{NewReservation, Reservation, ReservationStatus};
use crate::domain::scheduling::TimeRange;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Whether a reservation of `station_id` in one of `statuses` overlaps
    /// `range` (half-open).
    async fn exists_overlapping(
        &self,
        station_id: i64,
        range: &TimeRange,
        statuses: &[ReservationStatus],
    ) -> DomainResult<bool>;

    /// Reservations of `station_id` in one of `statuses` overlapping `range`.
    async fn find_overlapping(
        &self,
        station_id: i64,
        range: &TimeRange,
        statuses: &[ReservationStatus],
    ) -> DomainResult<Vec<Reservation>>;

    /// Reservations of `station_id` in one of `statuses` with
    /// `start <= instant < end`.
    async fn find_covering(
        &self,
        station_id: i64,
        instant: DateTime<Utc>,
        statuses: &[ReservationStatus],
    ) -> DomainResult<Vec<Reservation>>;

    /// Insert a reservation.
    ///
    /// Fails with `DomainError::Conflict` if an active reservation already
    /// overlaps the range; the check and the insert are atomic.
    async fn persist(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// A user's reservations, latest start first
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>>;

    /// A reservation only if it belongs to `user_id`
    async fn find_for_user_by_id(
        &self,
        id: i64,
        user_id: &str,
    ) -> DomainResult<Option<Reservation>>;
}
