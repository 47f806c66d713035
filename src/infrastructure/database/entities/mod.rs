//! Database entities module

pub mod charging_location;
pub mod charging_station;
pub mod reservation;
pub mod user;

pub use charging_location::Entity as ChargingLocation;
pub use charging_station::Entity as ChargingStation;
pub use reservation::Entity as Reservation;
pub use user::Entity as User;
