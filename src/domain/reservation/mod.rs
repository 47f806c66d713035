//! Reservation aggregate
//!
//! Contains the Reservation entity, its frozen station snapshot, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{NewReservation, Reservation, ReservationStatus, StationSnapshot, ACTIVE_STATUSES};
pub use repository::ReservationRepository;
