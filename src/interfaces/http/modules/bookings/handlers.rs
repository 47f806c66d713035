//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{BookingService, CreateBooking};
use crate::interfaces::http::common::{ApiError, ApiResponse, CurrentUser, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(("X-User-Id" = String, Header, description = "Authenticated user id")),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Empty, out-of-range or non-contiguous selection"),
        (status = 401, description = "Missing X-User-Id"),
        (status = 404, description = "Unknown station or user"),
        (status = 409, description = "One or more slots already booked")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    CurrentUser(user_id): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let reservation = state
        .booking
        .create_booking(CreateBooking {
            station_id: request.station_id,
            date: request.date,
            slots: request.slots,
            user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(reservation))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(("X-User-Id" = String, Header, description = "Authenticated user id")),
    responses(
        (status = 200, description = "Caller's bookings, latest start first", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Missing X-User-Id")
    )
)]
pub async fn list_my_bookings(
    State(state): State<BookingAppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = state.booking.list_user_bookings(&user_id).await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i64, Path, description = "Booking id"),
        ("X-User-Id" = String, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "No such booking for this user")
    )
)]
pub async fn get_my_booking(
    State(state): State<BookingAppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let reservation = state.booking.get_user_booking(id, &user_id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(reservation))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/quote",
    tag = "Bookings",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Price breakdown", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Invalid selection"),
        (status = 404, description = "Unknown station")
    )
)]
pub async fn quote_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ApiError> {
    let quote = state
        .booking
        .quote_price(request.station_id, request.date, &request.slots)
        .await?;
    Ok(Json(ApiResponse::success(QuoteResponse::from(quote))))
}
