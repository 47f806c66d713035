//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    /// `None` when running on the in-memory store
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let database = match &state.db {
        None => ComponentHealth {
            status: "in-memory".to_string(),
            latency_ms: None,
        },
        Some(db) => {
            let db_start = Instant::now();
            let ping = db
                .execute(Statement::from_string(
                    db.get_database_backend(),
                    "SELECT 1".to_string(),
                ))
                .await;
            match ping {
                Ok(_) => ComponentHealth {
                    status: "ok".to_string(),
                    latency_ms: Some(db_start.elapsed().as_millis() as u64),
                },
                Err(_) => ComponentHealth {
                    status: "error".to_string(),
                    latency_ms: None,
                },
            }
        }
    };

    let healthy = database.status != "error";
    let http_status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            database,
        }),
    )
}
