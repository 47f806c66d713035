//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::reservation::ReservationRepository;
use super::station::StationRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let station = repos.stations().find_with_billing_info(7).await?;
///     let mine = repos.reservations().find_for_user("u-1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn stations(&self) -> &dyn StationRepository;
    fn users(&self) -> &dyn UserRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
