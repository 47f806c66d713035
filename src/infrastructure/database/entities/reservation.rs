//! Reservation entity
//!
//! `station_id` deliberately has no foreign key: a reservation stays
//! readable through its snapshot columns after the station is removed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub station_id: i64,
    pub user_id: String,

    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,

    /// PENDING, ACCEPTED, REFUSED, COMPLETED, CANCELLED
    pub status: String,

    pub total_price_cents: i64,

    pub station_name_snapshot: String,
    pub station_address_snapshot: String,
    pub hourly_rate_snapshot_cents: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
