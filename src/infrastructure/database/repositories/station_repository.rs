//! SeaORM implementation of StationRepository

use async_trait::async_trait;
use chrono::NaiveTime;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::scheduling::OperatingWindow;
use crate::domain::station::{PostalAddress, Station, StationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{charging_location, charging_station};
use crate::infrastructure::database::money::from_cents;

pub struct SeaOrmStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

/// Minutes past midnight to a time of day; 1440 wraps to 00:00, which the
/// window reads as end of day.
fn minute_to_time(minute: i32) -> DomainResult<NaiveTime> {
    if !(0..=1440).contains(&minute) {
        return Err(DomainError::Storage(format!(
            "operating window minute {} out of range",
            minute
        )));
    }
    let m = (minute % 1440) as u32;
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
        .ok_or_else(|| DomainError::Storage(format!("invalid operating window minute {}", minute)))
}

fn operating_window(from: Option<i32>, to: Option<i32>) -> DomainResult<Option<OperatingWindow>> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(OperatingWindow::new(
            minute_to_time(from)?,
            minute_to_time(to)?,
        ))),
        // A half-configured window is treated as unset.
        _ => Ok(None),
    }
}

fn models_to_domain(
    station: charging_station::Model,
    location: charging_location::Model,
) -> DomainResult<Station> {
    Ok(Station {
        id: station.id,
        name: station.name,
        hourly_rate: from_cents(station.hourly_rate_cents),
        is_active: station.is_active,
        operating_window: operating_window(
            station.available_from_minute,
            station.available_to_minute,
        )?,
        location_id: location.id,
        address: PostalAddress {
            street: location.street,
            postal_code: location.postal_code,
            city: location.city,
        },
    })
}

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn find_with_billing_info(&self, id: i64) -> DomainResult<Option<Station>> {
        let found = charging_station::Entity::find_by_id(id)
            .find_also_related(charging_location::Entity)
            .one(&self.db)
            .await?;

        match found {
            None => Ok(None),
            Some((station, Some(location))) => models_to_domain(station, location).map(Some),
            Some((station, None)) => Err(DomainError::Storage(format!(
                "station {} references missing location {}",
                station.id, station.location_id
            ))),
        }
    }
}
