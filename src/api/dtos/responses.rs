use crate::domain::models::spot::Area;
use crate::domain::services::time_grid::TimeSlot;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub spot_id: String,
    pub date: String,
    pub area: Area,
    pub bookable: bool,
    pub slots: Vec<TimeSlot>,
    pub start_options: Vec<TimeSlot>,
}
