//! Live station status

use chrono::{DateTime, Utc};

use super::Station;
use crate::domain::reservation::Reservation;

/// Display status of a station at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStatus {
    Available,
    Occupied,
    Unavailable,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct StationStatusResolver;

impl StationStatusResolver {
    /// Inactive stations are unavailable regardless of bookings. Otherwise
    /// the station is occupied iff an active reservation covers `now`.
    pub fn resolve(
        station: &Station,
        reservations: &[Reservation],
        now: DateTime<Utc>,
    ) -> StationStatus {
        if !station.is_active {
            return StationStatus::Unavailable;
        }

        let occupied = reservations
            .iter()
            .any(|r| r.station_id == station.id && r.status.is_active() && r.range().contains(now));

        if occupied {
            StationStatus::Occupied
        } else {
            StationStatus::Available
        }
    }
}
