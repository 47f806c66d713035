//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        display_name: model.display_name,
        created_at: model.created_at,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }
}
