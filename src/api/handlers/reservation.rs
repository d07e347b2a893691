use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use crate::api::dtos::requests::{CreateReservationRequest, UpdateReservationRequest};
use crate::api::handlers::{parse_date, slots::{find_spot, predict_slots}};
use crate::domain::models::{reservation::{NewReservation, ReservationPatch}, spot::Spot};
use crate::domain::services::planner::{end_options, fuse_label, start_options};
use crate::domain::services::time_grid::TimeSlot;
use crate::error::AppError;
use crate::state::AppState;

struct CheckedWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

// The backend has the final word; this only rejects windows that are
// already known to be unavailable.
async fn check_window(
    state: &AppState,
    spot: &Spot,
    date: NaiveDate,
    start_time: TimeSlot,
    end_time: TimeSlot,
    vehicle_type: Option<&str>,
    exclude_reservation: Option<&str>,
) -> Result<CheckedWindow, AppError> {
    if end_time <= start_time {
        return Err(AppError::Validation("End time must be after start time".into()));
    }

    let slots = predict_slots(state, spot, date, vehicle_type, exclude_reservation).await?;

    if !start_options(&slots).contains(&start_time) {
        warn!("Reservation rejected: start {} on {} not available. Valid slots: {:?}", start_time, date, slots);
        return Err(AppError::Conflict("Selected start time is not available".into()));
    }
    if !end_options(&slots, start_time).contains(&end_time) {
        warn!("Reservation rejected: end {} on {} not available", end_time, date);
        return Err(AppError::Conflict("Selected end time is not available".into()));
    }

    let tz = state.config.tz();
    let start = fuse_label(date, start_time, tz)
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))?;
    let end = fuse_label(date, end_time, tz)
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))?;

    Ok(CheckedWindow { start, end })
}

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_reservation: spot {} on {}", payload.spot_id, payload.date);

    if payload.origin.trim().is_empty() {
        return Err(AppError::Validation("Origin is required".into()));
    }
    let date = parse_date(&payload.date)?;
    let spot = find_spot(&state, &payload.spot_id).await?;

    let window = check_window(
        &state,
        &spot,
        date,
        payload.start_time,
        payload.end_time,
        payload.vehicle_type.as_deref(),
        None,
    ).await?;

    let created = state.reservation_repo.create(&NewReservation {
        spot_id: spot.id.clone(),
        driver_id: payload.driver_id,
        vehicle_id: payload.vehicle_id,
        origin: payload.origin,
        start: window.start,
        end: window.end,
    }).await?;

    info!("Reservation confirmed: {} on spot {}", created.id, spot.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<String>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.origin.trim().is_empty() {
        return Err(AppError::Validation("Origin is required".into()));
    }
    let date = parse_date(&payload.date)?;

    let existing = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;
    if payload.spot_id.as_deref().is_some_and(|id| id != existing.spot.id) {
        warn!("Reservation {} update names spot {:?}, booked on {}", reservation_id, payload.spot_id, existing.spot.id);
        return Err(AppError::Validation("Reservation cannot be moved to another spot".into()));
    }
    let spot = find_spot(&state, &existing.spot.id).await?;

    let window = check_window(
        &state,
        &spot,
        date,
        payload.start_time,
        payload.end_time,
        payload.vehicle_type.as_deref(),
        Some(&existing.id),
    ).await?;

    let updated = state.reservation_repo.update(&reservation_id, &ReservationPatch {
        vehicle_id: payload.vehicle_id,
        origin: payload.origin,
        start: window.start,
        end: window.end,
    }).await?;

    info!("Reservation updated: {}", updated.id);
    Ok(Json(updated))
}
