//! Read paths over a station's reservations

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

use crate::domain::reservation::ACTIVE_STATUSES;
use crate::domain::scheduling::{AvailabilityProjector, DayAvailability, SlotGrid, TimeRange};
use crate::domain::station::{Station, StationStatus, StationStatusResolver};
use crate::domain::RepositoryProvider;
use crate::shared::errors::{BookingError, BookingResult};

/// Service for station availability and live status
pub struct StationQueryService {
    repos: Arc<dyn RepositoryProvider>,
    grid: SlotGrid,
    projector: AvailabilityProjector,
}

impl StationQueryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, grid: SlotGrid) -> Self {
        Self {
            repos,
            grid,
            projector: AvailabilityProjector::new(grid),
        }
    }

    /// Bookable and taken slots of `date` within the station's operating
    /// window.
    pub async fn get_availability(
        &self,
        station_id: i64,
        date: NaiveDate,
    ) -> BookingResult<DayAvailability> {
        let station = self.load_station(station_id).await?;

        let taken: Vec<TimeRange> = self
            .repos
            .reservations()
            .find_overlapping(station.id, &self.grid.day(date), &ACTIVE_STATUSES)
            .await?
            .iter()
            .map(|r| r.range())
            .collect();

        debug!(
            "Availability for station {} on {}: {} active reservations",
            station.id,
            date,
            taken.len()
        );

        Ok(self
            .projector
            .project(date, station.operating_window.as_ref(), &taken))
    }

    /// Display status of the station at `now`.
    pub async fn get_station_status(
        &self,
        station_id: i64,
        now: DateTime<Utc>,
    ) -> BookingResult<StationStatus> {
        let station = self.load_station(station_id).await?;
        if !station.is_active {
            return Ok(StationStatus::Unavailable);
        }

        let covering = self
            .repos
            .reservations()
            .find_covering(station.id, now, &ACTIVE_STATUSES)
            .await?;

        Ok(StationStatusResolver::resolve(&station, &covering, now))
    }

    async fn load_station(&self, station_id: i64) -> BookingResult<Station> {
        self.repos
            .stations()
            .find_with_billing_info(station_id)
            .await?
            .ok_or(BookingError::StationNotFound(station_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{BookingService, CreateBooking};
    use crate::domain::scheduling::OperatingWindow;
    use crate::infrastructure::InMemoryStorage;
    use crate::shared::fixtures::{self, ALICE};
    use chrono::{NaiveTime, TimeZone};
    use rust_decimal_macros::dec;

    fn services(storage: &Arc<InMemoryStorage>) -> (BookingService, StationQueryService) {
        (
            BookingService::new(storage.clone(), fixtures::grid()),
            StationQueryService::new(storage.clone(), fixtures::grid()),
        )
    }

    async fn book(svc: &BookingService, slots: &[i32]) {
        svc.create_booking(CreateBooking {
            station_id: 1,
            date: fixtures::day(),
            slots: slots.to_vec(),
            user_id: ALICE.into(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn booked_slots_show_as_unavailable() {
        let storage = fixtures::storage();
        let (booking, query) = services(&storage);
        book(&booking, &[10, 11]).await;

        let day = query.get_availability(1, fixtures::day()).await.unwrap();
        assert_eq!(day.date, fixtures::day());
        assert_eq!(day.slots.len(), 48);
        for slot in &day.slots {
            assert_eq!(slot.available, slot.index != 10 && slot.index != 11);
        }

        let again = query.get_availability(1, fixtures::day()).await.unwrap();
        assert_eq!(day, again);
    }

    #[tokio::test]
    async fn availability_respects_operating_window() {
        let storage = fixtures::storage();
        let mut station = fixtures::station(1, dec!(10.00));
        station.operating_window = Some(OperatingWindow::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        ));
        storage.upsert_station(station);

        let day = StationQueryService::new(storage.clone(), fixtures::grid())
            .get_availability(1, fixtures::day())
            .await
            .unwrap();
        let indices: Vec<i32> = day.slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![18, 19, 20, 21]);
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let storage = fixtures::storage();
        let (_, query) = services(&storage);
        assert_eq!(
            query.get_availability(42, fixtures::day()).await.unwrap_err(),
            BookingError::StationNotFound(42)
        );
        assert_eq!(
            query.get_station_status(42, Utc::now()).await.unwrap_err(),
            BookingError::StationNotFound(42)
        );
    }

    #[tokio::test]
    async fn status_follows_reservations_and_active_flag() {
        let storage = fixtures::storage();
        let (booking, query) = services(&storage);
        book(&booking, &[10, 11]).await;

        // Slot 10 on 2026-01-15 is 04:00-04:30 UTC.
        let during = Utc.with_ymd_and_hms(2026, 1, 15, 4, 45, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 1, 15, 5, 0, 0).unwrap();
        assert_eq!(query.get_station_status(1, during).await.unwrap(), StationStatus::Occupied);
        assert_eq!(query.get_station_status(1, after).await.unwrap(), StationStatus::Available);

        let mut disabled = fixtures::station(1, dec!(10.00));
        disabled.is_active = false;
        storage.upsert_station(disabled);
        assert_eq!(
            query.get_station_status(1, during).await.unwrap(),
            StationStatus::Unavailable
        );
    }
}
