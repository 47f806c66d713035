use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
}
