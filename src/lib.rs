//! # PowerMe Booking
//!
//! Booking and slot-scheduling engine for PowerMe EV charging stations.
//! Users reserve contiguous 30-minute slots on a station for a given day;
//! the engine validates the selection, rejects double bookings, prices the
//! session and freezes the station's details on the reservation.
//!
//! ## Architecture
//!
//! - **domain**: Entities, slot/pricing/availability math and repository traits
//! - **application**: Booking and station query services
//! - **infrastructure**: SeaORM (SQLite) and in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Process bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
