use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, calendar, health, reservation, slots};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Driver planning
        .route("/api/v1/spots/{spot_id}/slots", get(slots::get_slots))
        .route("/api/v1/reservations", post(reservation::create_reservation))
        .route("/api/v1/reservations/{reservation_id}", patch(reservation::update_reservation))

        // Manager calendars
        .route("/api/v1/calendar/reservations", get(calendar::reservation_calendar))
        .route("/api/v1/calendar/availabilities", get(calendar::availability_calendar))

        // Availability windows
        .route("/api/v1/availabilities", get(availability::list_availabilities).post(availability::create_availability))
        .route("/api/v1/availabilities/{availability_id}", patch(availability::update_availability).delete(availability::delete_availability))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
