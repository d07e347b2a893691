use crate::domain::services::time_grid::TimeSlot;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: String,
    pub vehicle_type: Option<String>,
    pub exclude_reservation: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarRangeQuery {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub spot_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub vehicle_type: Option<String>,
    pub origin: String,
    pub date: String,
    pub start_time: TimeSlot,
    pub end_time: TimeSlot,
}

#[derive(Deserialize)]
pub struct UpdateReservationRequest {
    /// Optional echo of the reservation's spot; a different spot is rejected.
    #[serde(default)]
    pub spot_id: Option<String>,
    pub vehicle_id: String,
    pub vehicle_type: Option<String>,
    pub origin: String,
    pub date: String,
    pub start_time: TimeSlot,
    pub end_time: TimeSlot,
}

#[derive(Deserialize)]
pub struct CreateAvailabilityRequest {
    pub spot_ids: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
