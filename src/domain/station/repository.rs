use async_trait::async_trait;

use super::Station;
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Load a station together with its rate and location address.
    async fn find_with_billing_info(&self, id: i64) -> DomainResult<Option<Station>>;
}
