//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::PriceQuote;
use crate::domain::Reservation;

/// Request to book consecutive half-hour slots
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(range(min = 1))]
    pub station_id: i64,
    /// Calendar date, `YYYY-MM-DD`, in the service time zone
    #[schema(value_type = String, format = Date, example = "2026-03-02")]
    pub date: NaiveDate,
    /// Slot indices in `[0, 48)`, slot 0 starting at local midnight
    #[schema(example = json!([10, 11]))]
    pub slots: Vec<i32>,
}

/// Request for a price quote; same shape as a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(range(min = 1))]
    pub station_id: i64,
    #[schema(value_type = String, format = Date, example = "2026-03-02")]
    pub date: NaiveDate,
    pub slots: Vec<i32>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i64,
    pub station_id: i64,
    pub user_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
    #[schema(value_type = String, example = "10.50")]
    pub total_price: Decimal,
    pub station_name: String,
    pub station_address: String,
    #[schema(value_type = String, example = "10.00")]
    pub hourly_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for BookingDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            station_id: r.station_id,
            user_id: r.user_id,
            start: r.start,
            end: r.end,
            status: r.status.as_str().to_string(),
            total_price: r.total_price,
            station_name: r.snapshot.name,
            station_address: r.snapshot.address,
            hourly_rate: r.snapshot.hourly_rate,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Priced preview of a selection
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub station_id: i64,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Sorted, deduplicated selection
    pub slots: Vec<i32>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[schema(value_type = String, example = "1.0")]
    pub duration_hours: Decimal,
    #[schema(value_type = String)]
    pub hourly_rate: Decimal,
    #[schema(value_type = String)]
    pub base_amount: Decimal,
    #[schema(value_type = String, example = "0.50")]
    pub service_fee: Decimal,
    #[schema(value_type = String, example = "10.50")]
    pub total: Decimal,
}

impl From<PriceQuote> for QuoteResponse {
    fn from(q: PriceQuote) -> Self {
        Self {
            station_id: q.station_id,
            date: q.date,
            start: q.selection.range.start,
            end: q.selection.range.end,
            slots: q.selection.slots,
            duration_hours: q.price.duration_hours,
            hourly_rate: q.price.hourly_rate,
            base_amount: q.price.base_amount,
            service_fee: q.price.service_fee,
            total: q.price.total,
        }
    }
}
