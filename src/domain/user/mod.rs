//! User aggregate
//!
//! Users are managed by the identity service; the booking engine only needs
//! to know that the requester exists.

pub mod model;
pub mod repository;

pub use model::User;
pub use repository::UserRepository;
