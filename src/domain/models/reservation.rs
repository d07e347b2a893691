use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::models::{blockage::Blockage, spot::SpotSummary};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[serde(alias = "RESERVADA")]
    Reserved,
    #[serde(alias = "ATIVA")]
    Active,
    #[serde(alias = "CONCLUIDA")]
    Completed,
    #[serde(alias = "CANCELADA")]
    Canceled,
    #[serde(alias = "REMOVIDA")]
    Removed,
}

impl ReservationStatus {
    /// Only reserved and checked-in reservations hold the spot.
    pub fn occupies_time(self) -> bool {
        matches!(self, ReservationStatus::Reserved | ReservationStatus::Active)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reservation {
    pub id: String,
    pub spot: SpotSummary,
    pub driver_id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub origin: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: ReservationStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewReservation {
    pub spot_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub origin: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReservationPatch {
    pub vehicle_id: String,
    pub origin: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Backend answer to an occupancy lookup for one spot and day.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DayOccupancy {
    pub reservations: Vec<Reservation>,
    pub blockages: Vec<Blockage>,
}
