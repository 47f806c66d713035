//! Booking orchestration
//!
//! Turns a slot selection into a priced, conflict-free reservation and
//! answers a user's questions about their own bookings.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::station_locks::StationLocks;
use crate::domain::reservation::{NewReservation, Reservation, ACTIVE_STATUSES};
use crate::domain::scheduling::{PriceBreakdown, PricingCalculator, SlotGrid, SlotRange};
use crate::domain::station::Station;
use crate::domain::{DomainError, RepositoryProvider};
use crate::shared::errors::{BookingError, BookingResult};

/// Request to book slots on a station.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub station_id: i64,
    pub date: NaiveDate,
    pub slots: Vec<i32>,
    pub user_id: String,
}

/// Priced preview of a slot selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub station_id: i64,
    pub date: NaiveDate,
    pub selection: SlotRange,
    pub price: PriceBreakdown,
}

/// Service for booking operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    grid: SlotGrid,
    locks: StationLocks,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, grid: SlotGrid) -> Self {
        Self {
            repos,
            grid,
            locks: StationLocks::new(),
        }
    }

    /// Create a `PENDING` reservation.
    ///
    /// Writes exactly one reservation on success and nothing on failure.
    /// The conflict check, pricing and insert run under the station's lock.
    pub async fn create_booking(&self, cmd: CreateBooking) -> BookingResult<Reservation> {
        let user = self
            .repos
            .users()
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| BookingError::UserNotFound(cmd.user_id.clone()))?;

        let station = self.load_station(cmd.station_id).await?;
        let selection = self.grid.compute_range(cmd.date, &cmd.slots)?;

        let _guard = self.locks.acquire(station.id).await;

        let taken = self
            .repos
            .reservations()
            .exists_overlapping(station.id, &selection.range, &ACTIVE_STATUSES)
            .await?;
        if taken {
            return Err(self.conflict(&cmd));
        }

        let total_price =
            PricingCalculator::compute_price(station.hourly_rate, selection.slot_count())?;

        let new = NewReservation::pending(
            station.id,
            user.id,
            selection.range,
            total_price,
            station.snapshot(),
        );

        let reservation = match self.repos.reservations().persist(new).await {
            Ok(r) => r,
            // Another writer (e.g. a second instance) got there first.
            Err(DomainError::Conflict(_)) => return Err(self.conflict(&cmd)),
            Err(e) => return Err(e.into()),
        };

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            reservation_id = reservation.id,
            station_id = reservation.station_id,
            user_id = %reservation.user_id,
            slots = ?selection.slots,
            total_price = %reservation.total_price,
            "Booking created"
        );

        Ok(reservation)
    }

    /// Price a selection without booking it.
    pub async fn quote_price(
        &self,
        station_id: i64,
        date: NaiveDate,
        slots: &[i32],
    ) -> BookingResult<PriceQuote> {
        let station = self.load_station(station_id).await?;
        let selection = self.grid.compute_range(date, slots)?;
        let price = PricingCalculator::breakdown(station.hourly_rate, selection.slot_count())?;

        Ok(PriceQuote {
            station_id,
            date,
            selection,
            price,
        })
    }

    /// The user's reservations, latest start first.
    pub async fn list_user_bookings(&self, user_id: &str) -> BookingResult<Vec<Reservation>> {
        Ok(self.repos.reservations().find_for_user(user_id).await?)
    }

    /// One of the user's reservations. Other users' ids read as not found.
    pub async fn get_user_booking(&self, id: i64, user_id: &str) -> BookingResult<Reservation> {
        self.repos
            .reservations()
            .find_for_user_by_id(id, user_id)
            .await?
            .ok_or(BookingError::BookingNotFound(id))
    }

    async fn load_station(&self, station_id: i64) -> BookingResult<Station> {
        self.repos
            .stations()
            .find_with_billing_info(station_id)
            .await?
            .ok_or(BookingError::StationNotFound(station_id))
    }

    fn conflict(&self, cmd: &CreateBooking) -> BookingError {
        metrics::counter!("booking_conflicts_total").increment(1);
        warn!(
            station_id = cmd.station_id,
            user_id = %cmd.user_id,
            slots = ?cmd.slots,
            "Booking rejected, slots already taken"
        );
        BookingError::SlotConflict {
            slots: cmd.slots.clone(),
        }
    }
}
