//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, StationQueryService};
use crate::domain::scheduling::SlotGrid;
use crate::domain::RepositoryProvider;

use super::common::ApiResponse;
use super::modules::bookings::{self, BookingAppState, BookingDto, CreateBookingRequest, QuoteRequest, QuoteResponse};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::stations::{
    self, AvailabilityResponse, StationAppState, StationStatusResponse, TimeSlotDto,
};

/// Unified state for all API routes.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub booking: Arc<BookingService>,
    pub stations: Arc<StationQueryService>,
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    /// Wire the services over one repository provider.
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        grid: SlotGrid,
        db: Option<DatabaseConnection>,
    ) -> Self {
        Self {
            booking: Arc::new(BookingService::new(repos.clone(), grid)),
            stations: Arc::new(StationQueryService::new(repos, grid)),
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<ApiState> for BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        BookingAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<ApiState> for StationAppState {
    fn from_ref(s: &ApiState) -> Self {
        StationAppState {
            stations: Arc::clone(&s.stations),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        bookings::create_booking,
        bookings::list_my_bookings,
        bookings::get_my_booking,
        bookings::quote_booking,
        stations::get_availability,
        stations::get_status,
    ),
    components(
        schemas(
            ApiResponse<String>,
            HealthResponse,
            ComponentHealth,
            CreateBookingRequest,
            QuoteRequest,
            BookingDto,
            QuoteResponse,
            AvailabilityResponse,
            TimeSlotDto,
            StationStatusResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Bookings", description = "Half-hour slot booking and the caller's reservations"),
        (name = "Charging Stations", description = "Day availability and live status of a station"),
    ),
    info(
        title = "PowerMe Booking API",
        version = "1.0.0",
        description = "Slot booking engine for PowerMe charging stations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus recorder handle is given.
pub fn create_api_router(state: ApiState, metrics: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_my_bookings).post(bookings::create_booking),
        )
        .route("/quote", post(bookings::quote_booking))
        .route("/{id}", get(bookings::get_my_booking));

    let station_routes = Router::new()
        .route("/{id}/availability", get(stations::get_availability))
        .route("/{id}/status", get(stations::get_status));

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/charging-stations", station_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::shared::fixtures::{self, ALICE, BOB};

    fn app() -> Router {
        let state = ApiState::new(fixtures::storage(), fixtures::grid(), None);
        create_api_router(state, None)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, user: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, user: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn booking(slots: &[i32]) -> Value {
        json!({ "stationId": 1, "date": "2026-01-15", "slots": slots })
    }

    #[tokio::test]
    async fn booking_is_created_then_conflicts() {
        let app = app();

        let (status, body) = send(&app, post("/api/v1/bookings", Some(ALICE), booking(&[10, 11]))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "PENDING");
        assert_eq!(body["data"]["totalPrice"], "10.50");
        assert_eq!(body["data"]["start"], "2026-01-15T04:00:00Z");
        assert_eq!(body["data"]["stationAddress"], "12 avenue Jean Jaurès, 69007 Lyon");

        let (status, body) = send(&app, post("/api/v1/bookings", Some(BOB), booking(&[11, 12]))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["details"]["code"], "SLOT_CONFLICT");
        assert_eq!(body["details"]["slots"], json!([11, 12]));
    }

    #[tokio::test]
    async fn missing_user_header_is_unauthorized() {
        let (status, body) = send(&app(), post("/api/v1/bookings", None, booking(&[3]))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn invalid_selection_is_bad_request() {
        let (status, body) = send(&app(), post("/api/v1/bookings", Some(ALICE), booking(&[2, 4]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "NON_CONTIGUOUS");
        assert_eq!(body["details"]["slots"], json!([2, 4]));
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let request = json!({ "stationId": 99, "date": "2026-01-15", "slots": [1] });
        let (status, body) = send(&app(), post("/api/v1/bookings", Some(ALICE), request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"]["code"], "STATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn bookings_are_scoped_to_the_caller() {
        let app = app();
        let (_, created) = send(&app, post("/api/v1/bookings", Some(ALICE), booking(&[20]))).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, body) = send(&app, get("/api/v1/bookings", Some(ALICE))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let uri = format!("/api/v1/bookings/{}", id);
        let (status, _) = send(&app, get(&uri, Some(ALICE))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, get(&uri, Some(BOB))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"]["code"], "BOOKING_NOT_FOUND");
    }

    #[tokio::test]
    async fn quote_prices_without_booking() {
        let app = app();
        let request = json!({ "stationId": 1, "date": "2026-01-15", "slots": [10, 11] });
        let (status, body) = send(&app, post("/api/v1/bookings/quote", None, request)).await;
        assert_eq!(status, StatusCode::OK);
        let base: Decimal = body["data"]["baseAmount"].as_str().unwrap().parse().unwrap();
        assert_eq!(base, Decimal::from(10));
        assert_eq!(body["data"]["serviceFee"], "0.50");
        assert_eq!(body["data"]["total"], "10.50");

        let (_, list) = send(&app, get("/api/v1/bookings", Some(ALICE))).await;
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn availability_reflects_bookings() {
        let app = app();
        send(&app, post("/api/v1/bookings", Some(ALICE), booking(&[10, 11]))).await;

        let (status, body) = send(
            &app,
            get("/api/v1/charging-stations/1/availability?date=2026-01-15", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let slots = body["data"]["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[10]["available"], false);
        assert_eq!(slots[11]["available"], false);
        assert_eq!(slots[12]["available"], true);
    }

    #[tokio::test]
    async fn availability_requires_a_date() {
        let (status, _) = send(&app(), get("/api/v1/charging-stations/1/availability", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_follows_active_booking() {
        let app = app();
        send(&app, post("/api/v1/bookings", Some(ALICE), booking(&[10, 11]))).await;

        let (status, body) = send(
            &app,
            get("/api/v1/charging-stations/1/status?at=2026-01-15T04:10:00Z", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "OCCUPIED");
        assert_eq!(body["data"]["stationId"], 1);

        let (_, body) = send(
            &app,
            get("/api/v1/charging-stations/1/status?at=2026-01-15T05:00:00Z", None),
        )
        .await;
        assert_eq!(body["data"]["status"], "AVAILABLE");
    }

    #[tokio::test]
    async fn health_reports_in_memory_storage() {
        let (status, body) = send(&app(), get("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "in-memory");
    }
}
