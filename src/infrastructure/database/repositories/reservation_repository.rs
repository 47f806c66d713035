//! SeaORM implementation of ReservationRepository

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use log::{debug, warn};
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};

use crate::domain::reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus, StationSnapshot,
    ACTIVE_STATUSES,
};
use crate::domain::scheduling::TimeRange;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;
use crate::infrastructure::database::money::{from_cents, to_cents};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = ReservationStatus::from_str(&m.status).map_err(|e| {
        DomainError::Storage(format!("reservation {}: {}", m.id, e))
    })?;

    Ok(Reservation {
        id: m.id,
        station_id: m.station_id,
        user_id: m.user_id,
        start: m.start_time,
        end: m.end_time,
        status,
        total_price: from_cents(m.total_price_cents),
        snapshot: StationSnapshot {
            name: m.station_name_snapshot,
            address: m.station_address_snapshot,
            hourly_rate: from_cents(m.hourly_rate_snapshot_cents),
        },
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

fn status_names(statuses: &[ReservationStatus]) -> Vec<&'static str> {
    statuses.iter().map(|s| s.as_str()).collect()
}

/// `[start_time, end_time)` overlaps `range`, status in `statuses`.
fn overlapping(
    station_id: i64,
    range: &TimeRange,
    statuses: &[ReservationStatus],
) -> Select<reservation::Entity> {
    reservation::Entity::find().filter(
        Condition::all()
            .add(reservation::Column::StationId.eq(station_id))
            .add(reservation::Column::Status.is_in(status_names(statuses)))
            .add(reservation::Column::StartTime.lt(range.end))
            .add(reservation::Column::EndTime.gt(range.start)),
    )
}

/// SQLite transactions start deferred and a read-then-write one fails with
/// SQLITE_BUSY when another connection wrote in between. A no-op write up
/// front takes the write lock first, so concurrent writers wait on the busy
/// timeout and then see each other's rows in the overlap check.
async fn take_write_lock<C: ConnectionTrait>(conn: &C) -> DomainResult<()> {
    reservation::Entity::update_many()
        .col_expr(reservation::Column::Id, Expr::col(reservation::Column::Id).into())
        .filter(reservation::Column::Id.lt(0))
        .exec(conn)
        .await?;
    Ok(())
}

async fn has_overlap<C: ConnectionTrait>(
    conn: &C,
    station_id: i64,
    range: &TimeRange,
    statuses: &[ReservationStatus],
) -> DomainResult<bool> {
    let count = overlapping(station_id, range, statuses).count(conn).await?;
    Ok(count > 0)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn exists_overlapping(
        &self,
        station_id: i64,
        range: &TimeRange,
        statuses: &[ReservationStatus],
    ) -> DomainResult<bool> {
        has_overlap(&self.db, station_id, range, statuses).await
    }

    async fn find_overlapping(
        &self,
        station_id: i64,
        range: &TimeRange,
        statuses: &[ReservationStatus],
    ) -> DomainResult<Vec<Reservation>> {
        let models = overlapping(station_id, range, statuses)
            .order_by_asc(reservation::Column::StartTime)
            .all(&self.db)
            .await?;
        models_to_domain(models)
    }

    async fn find_covering(
        &self,
        station_id: i64,
        instant: DateTime<Utc>,
        statuses: &[ReservationStatus],
    ) -> DomainResult<Vec<Reservation>> {
        // Stored bounds are whole minutes; truncating keeps the text
        // comparison on SQLite exact.
        let instant = instant.with_nanosecond(0).unwrap_or(instant);
        let models = reservation::Entity::find()
            .filter(reservation::Column::StationId.eq(station_id))
            .filter(reservation::Column::Status.is_in(status_names(statuses)))
            .filter(reservation::Column::StartTime.lte(instant))
            .filter(reservation::Column::EndTime.gt(instant))
            .all(&self.db)
            .await?;
        models_to_domain(models)
    }

    async fn persist(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Persisting reservation: station={} user={} [{}, {})",
            r.station_id, r.user_id, r.range.start, r.range.end
        );

        let total_price_cents = to_cents(r.total_price)?;
        let hourly_rate_cents = to_cents(r.snapshot.hourly_rate)?;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        take_write_lock(&txn).await?;

        if has_overlap(&txn, r.station_id, &r.range, &ACTIVE_STATUSES).await? {
            txn.rollback().await?;
            warn!("Overlapping reservation on station {} rejected", r.station_id);
            return Err(DomainError::Conflict(format!(
                "station {} already booked in [{}, {})",
                r.station_id, r.range.start, r.range.end
            )));
        }

        let model = reservation::ActiveModel {
            station_id: Set(r.station_id),
            user_id: Set(r.user_id),
            start_time: Set(r.range.start),
            end_time: Set(r.range.end),
            status: Set(r.status.as_str().to_string()),
            total_price_cents: Set(total_price_cents),
            station_name_snapshot: Set(r.snapshot.name),
            station_address_snapshot: Set(r.snapshot.address),
            hourly_rate_snapshot_cents: Set(hourly_rate_cents),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await?;
        txn.commit().await?;

        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id).one(&self.db).await?;
        model.map(model_to_domain).transpose()
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::StartTime)
            .order_by_desc(reservation::Column::Id)
            .all(&self.db)
            .await?;
        models_to_domain(models)
    }

    async fn find_for_user_by_id(
        &self,
        id: i64,
        user_id: &str,
    ) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .filter(reservation::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        model.map(model_to_domain).transpose()
    }
}
