use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::{requests::SlotsQuery, responses::SlotsResponse};
use crate::api::handlers::parse_date;
use crate::domain::models::spot::Spot;
use crate::domain::services::planner::{slots_for_day, start_options};
use crate::domain::services::time_grid::TimeSlot;
use crate::error::AppError;
use crate::state::AppState;

pub(crate) async fn find_spot(state: &AppState, spot_id: &str) -> Result<Spot, AppError> {
    state.spot_repo.find_by_id(spot_id).await?
        .ok_or(AppError::NotFound("Spot not found".into()))
}

/// Occupancy lookup plus planning for one spot and day, with `now` read
/// once from the clock.
pub(crate) async fn predict_slots(
    state: &AppState,
    spot: &Spot,
    date: NaiveDate,
    vehicle_type: Option<&str>,
    exclude_reservation: Option<&str>,
) -> Result<Vec<TimeSlot>, AppError> {
    let occupancy = state.reservation_repo.occupancy(&spot.id, date, vehicle_type).await?;
    let now = state.clock.now();
    Ok(slots_for_day(spot, date, &occupancy, exclude_reservation, now, state.config.tz()))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(spot_id): Path<String>,
    Query(params): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&params.date)?;
    let spot = find_spot(&state, &spot_id).await?;

    let slots = predict_slots(
        &state,
        &spot,
        date,
        params.vehicle_type.as_deref(),
        params.exclude_reservation.as_deref(),
    ).await?;
    let start_options = start_options(&slots);

    info!(spot_id = %spot.id, date = %date, count = slots.len(), "planned slots");

    Ok(Json(SlotsResponse {
        spot_id: spot.id,
        date: params.date,
        area: spot.area,
        bookable: !start_options.is_empty(),
        slots,
        start_options,
    }))
}
