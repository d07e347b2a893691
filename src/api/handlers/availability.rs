use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::requests::{CreateAvailabilityRequest, UpdateAvailabilityRequest};
use crate::domain::models::availability::{AvailabilityPatch, NewAvailability};
use crate::error::AppError;
use crate::state::AppState;

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::Validation("End date must not be before start date".into()));
    }
    Ok(())
}

pub async fn list_availabilities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let availabilities = state.availability_repo.list().await?;
    Ok(Json(availabilities))
}

pub async fn create_availability(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.spot_ids.is_empty() {
        return Err(AppError::Validation("At least one spot is required".into()));
    }
    check_range(payload.start, payload.end)?;

    let created = state.availability_repo.create(&NewAvailability {
        spot_ids: payload.spot_ids,
        start: payload.start,
        end: payload.end,
    }).await?;

    info!("Availability window {}..{} created for {} spots", payload.start, payload.end, created.len());
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(availability_id): Path<String>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_range(payload.start, payload.end)?;

    let updated = state.availability_repo.update(&availability_id, &AvailabilityPatch {
        start: payload.start,
        end: payload.end,
    }).await?;

    info!("Availability updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    Path(availability_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.availability_repo.delete(&availability_id).await?;
    info!("Availability deleted: {}", availability_id);
    Ok(StatusCode::NO_CONTENT)
}
