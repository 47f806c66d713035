//! Application services

mod booking;
mod station_locks;
mod station_query;

pub use booking::{BookingService, CreateBooking, PriceQuote};
pub use station_locks::StationLocks;
pub use station_query::StationQueryService;
