//! Charging station entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "charging_stations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub location_id: i64,
    pub name: String,

    /// Hourly rate in cents
    pub hourly_rate_cents: i64,

    pub is_active: bool,

    /// Operating window as minutes past local midnight; both or neither
    #[sea_orm(nullable)]
    pub available_from_minute: Option<i32>,
    #[sea_orm(nullable)]
    pub available_to_minute: Option<i32>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::charging_location::Entity",
        from = "Column::LocationId",
        to = "super::charging_location::Column::Id"
    )]
    Location,
}

impl Related<super::charging_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
