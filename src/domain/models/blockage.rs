use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Maintenance or other blackout. The spot is unavailable during `[start, end)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Blockage {
    pub id: String,
    pub spot_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
}
