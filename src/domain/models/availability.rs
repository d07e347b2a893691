use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::models::spot::SpotSummary;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Availability {
    pub id: String,
    pub spot: SpotSummary,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Availability {
    /// Grouping key shared by every spot created in the same bulk window.
    pub fn interval_key(&self) -> String {
        format!("{}/{}", self.start, self.end)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewAvailability {
    pub spot_ids: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AvailabilityPatch {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
