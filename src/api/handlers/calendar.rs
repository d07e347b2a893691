use axum::{extract::{Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::debug;
use crate::api::dtos::requests::CalendarRangeQuery;
use crate::api::handlers::parse_date;
use crate::domain::services::calendar::{aggregate_availabilities, aggregate_reservations};
use crate::error::AppError;
use crate::state::AppState;

pub async fn reservation_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let from = parse_date(&params.from)?;
    let to = parse_date(&params.to)?;
    if to < from {
        return Err(AppError::Validation("'to' must not be before 'from'".into()));
    }

    let reservations = state.reservation_repo.list_by_range(from, to).await?;
    let groups = aggregate_reservations(&reservations, state.config.tz());

    debug!(records = reservations.len(), events = groups.len(), "aggregated reservation calendar");
    Ok(Json(groups))
}

pub async fn availability_calendar(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let availabilities = state.availability_repo.list().await?;
    let groups = aggregate_availabilities(&availabilities);

    debug!(records = availabilities.len(), events = groups.len(), "aggregated availability calendar");
    Ok(Json(groups))
}
