//! Station aggregate
//!
//! Stations are owned by the catalogue service and read-only here. The
//! booking engine reads their billing facts and derives a display status.

pub mod model;
pub mod repository;
pub mod status;

pub use model::{PostalAddress, Station};
pub use repository::StationRepository;
pub use status::{StationStatus, StationStatusResolver};
