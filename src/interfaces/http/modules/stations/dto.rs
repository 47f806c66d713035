//! Station availability and status DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::scheduling::{DayAvailability, TimeSlot};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Calendar date, `YYYY-MM-DD`
    #[param(value_type = String, format = Date, example = "2026-03-02")]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusQuery {
    /// Instant to evaluate (RFC 3339), defaults to now
    #[param(value_type = Option<String>, format = DateTime)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimeSlotDto {
    /// Absolute slot index, 0-47
    pub index: i32,
    /// Local start, "HH:MM"
    pub start: String,
    /// Local end, "HH:MM"
    pub end: String,
    pub available: bool,
}

impl From<TimeSlot> for TimeSlotDto {
    fn from(s: TimeSlot) -> Self {
        Self {
            index: s.index,
            start: s.start,
            end: s.end,
            available: s.available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub slots: Vec<TimeSlotDto>,
}

impl From<DayAvailability> for AvailabilityResponse {
    fn from(day: DayAvailability) -> Self {
        Self {
            date: day.date,
            slots: day.slots.into_iter().map(TimeSlotDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationStatusResponse {
    pub station_id: i64,
    /// AVAILABLE, OCCUPIED or UNAVAILABLE
    #[schema(example = "AVAILABLE")]
    pub status: String,
    pub at: DateTime<Utc>,
}
