pub mod repositories;
pub mod reservation;
pub mod scheduling;
pub mod station;
pub mod user;

// Re-export commonly used types
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{NewReservation, Reservation, ReservationStatus, StationSnapshot};
pub use station::{PostalAddress, Station, StationStatus};
pub use user::User;

pub use crate::shared::errors::DomainError;
