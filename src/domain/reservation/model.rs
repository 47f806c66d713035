//! Reservation domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::scheduling::TimeRange;
use crate::shared::errors::DomainError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    /// Requested, waiting for the owner's decision
    Pending,
    /// Confirmed by the owner
    Accepted,
    /// Declined by the owner
    Refused,
    /// Charging session done
    Completed,
    /// Withdrawn before use
    Cancelled,
}

/// Statuses that hold a station's time range.
pub const ACTIVE_STATUSES: [ReservationStatus; 2] =
    [ReservationStatus::Pending, ReservationStatus::Accepted];

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Refused => "REFUSED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether a reservation in this status blocks its range.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Refused | Self::Completed | Self::Cancelled)
    }

    /// Allowed owner/completion transitions. The engine itself only ever
    /// writes `Pending`.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Refused) | (Pending, Cancelled)
                | (Accepted, Completed) | (Accepted, Cancelled)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REFUSED" => Ok(Self::Refused),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown reservation status '{}'",
                other
            ))),
        }
    }
}

/// Station facts copied onto a reservation when it is created and never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSnapshot {
    pub name: String,
    /// "<street>, <postal code> <city>"
    pub address: String,
    pub hourly_rate: Decimal,
}

/// A persisted reservation
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    /// May no longer resolve if the station was deleted
    pub station_id: i64,
    pub user_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: ReservationStatus,
    /// Two decimal places, computed once at creation
    pub total_price: Decimal,
    pub snapshot: StationSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// A reservation about to be written. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub station_id: i64,
    pub user_id: String,
    pub range: TimeRange,
    pub status: ReservationStatus,
    pub total_price: Decimal,
    pub snapshot: StationSnapshot,
}

impl NewReservation {
    pub fn pending(
        station_id: i64,
        user_id: impl Into<String>,
        range: TimeRange,
        total_price: Decimal,
        snapshot: StationSnapshot,
    ) -> Self {
        Self {
            station_id,
            user_id: user_id.into(),
            range,
            status: ReservationStatus::Pending,
            total_price,
            snapshot,
        }
    }

    /// Materialise with a store-assigned id and timestamp.
    pub fn into_reservation(self, id: i64, now: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            station_id: self.station_id,
            user_id: self.user_id,
            start: self.range.start,
            end: self.range.end,
            status: self.status,
            total_price: self.total_price,
            snapshot: self.snapshot,
            created_at: now,
            updated_at: now,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
