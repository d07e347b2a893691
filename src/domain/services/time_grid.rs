use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use crate::domain::models::spot::WeeklyOperation;
use crate::error::AppError;

pub const SLOT_MINUTES: u16 = 30;

/// A bookable time-of-day label on the half-hour grid, stored as minutes
/// from midnight. Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u16);

impl TimeSlot {
    /// Rounds down: minutes 0..=29 land on `:00`, 30..=59 on `:30`.
    pub fn floor(time: NaiveTime) -> Self {
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        TimeSlot(minutes - minutes % SLOT_MINUTES)
    }

    pub fn minute_of_day(self) -> u16 {
        self.0
    }

    pub fn as_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt((self.0 / 60) as u32, (self.0 % 60) as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| AppError::Validation(format!("Invalid time label '{}' (HH:MM)", s)))?;
        let slot = TimeSlot::floor(time);
        if slot.as_time() != time {
            return Err(AppError::Validation(format!(
                "Time label '{}' is not on the {}-minute grid", s, SLOT_MINUTES
            )));
        }
        Ok(slot)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: AppError| de::Error::custom(e.user_message()))
    }
}

/// Every grid label from the operation's start to its end, both inclusive.
/// An inverted window yields nothing.
pub fn generate_day_slots(operation: &WeeklyOperation) -> Vec<TimeSlot> {
    if operation.start > operation.end {
        return Vec::new();
    }

    let first = TimeSlot::floor(operation.start).0;
    let last = TimeSlot::floor(operation.end).0;

    (first..=last)
        .step_by(SLOT_MINUTES as usize)
        .map(TimeSlot)
        .collect()
}
