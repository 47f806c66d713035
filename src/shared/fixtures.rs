//! Test fixtures shared by service and handler tests.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::scheduling::SlotGrid;
use crate::domain::station::{PostalAddress, Station};
use crate::domain::user::User;
use crate::infrastructure::InMemoryStorage;

pub const ALICE: &str = "user-alice";
pub const BOB: &str = "user-bob";

pub fn grid() -> SlotGrid {
    SlotGrid::new(chrono_tz::Europe::Paris)
}

/// A winter weekday, Paris is UTC+1.
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

pub fn station(id: i64, hourly_rate: Decimal) -> Station {
    Station {
        id,
        name: format!("Borne {}", id),
        hourly_rate,
        is_active: true,
        operating_window: None,
        location_id: 100,
        address: PostalAddress {
            street: "12 avenue Jean Jaurès".into(),
            postal_code: "69007".into(),
            city: "Lyon".into(),
        },
    }
}

/// Station 1 at 10.00/h, Alice and Bob registered.
pub fn storage() -> Arc<InMemoryStorage> {
    let storage = Arc::new(InMemoryStorage::new());
    storage.upsert_station(station(1, Decimal::new(1000, 2)));
    storage.insert_user(User::new(ALICE, "alice@example.com", "Alice"));
    storage.insert_user(User::new(BOB, "bob@example.com", "Bob"));
    storage
}
