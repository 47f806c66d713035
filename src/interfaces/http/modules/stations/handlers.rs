//! Station HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;

use crate::application::StationQueryService;
use crate::interfaces::http::common::{ApiError, ApiResponse};

use super::dto::*;

/// Application state for station handlers.
#[derive(Clone)]
pub struct StationAppState {
    pub stations: Arc<StationQueryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/charging-stations/{id}/availability",
    tag = "Charging Stations",
    params(("id" = i64, Path, description = "Station id"), AvailabilityQuery),
    responses(
        (status = 200, description = "Slots of the day", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Missing or malformed date"),
        (status = 404, description = "Unknown station")
    )
)]
pub async fn get_availability(
    State(state): State<StationAppState>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError> {
    let day = state.stations.get_availability(id, query.date).await?;
    Ok(Json(ApiResponse::success(AvailabilityResponse::from(day))))
}

#[utoipa::path(
    get,
    path = "/api/v1/charging-stations/{id}/status",
    tag = "Charging Stations",
    params(("id" = i64, Path, description = "Station id"), StatusQuery),
    responses(
        (status = 200, description = "Live status", body = ApiResponse<StationStatusResponse>),
        (status = 404, description = "Unknown station")
    )
)]
pub async fn get_status(
    State(state): State<StationAppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ApiResponse<StationStatusResponse>>, ApiError> {
    let at = query.at.unwrap_or_else(Utc::now);
    let status = state.stations.get_station_status(id, at).await?;
    Ok(Json(ApiResponse::success(StationStatusResponse {
        station_id: id,
        status: status.as_str().to_string(),
        at,
    })))
}
