use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveTime};

/// Curbside classification. Each area caps how long a single reservation
/// may hold the spot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Area {
    #[serde(alias = "VERMELHA")]
    Red,
    #[serde(alias = "AMARELA")]
    Yellow,
    #[serde(alias = "AZUL")]
    Blue,
    #[serde(alias = "BRANCA")]
    White,
}

impl Area {
    pub fn max_duration(self) -> Duration {
        match self {
            Area::Red => Duration::hours(1),
            Area::Yellow => Duration::hours(2),
            Area::Blue => Duration::hours(4),
            Area::White => Duration::hours(6),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotType {
    #[serde(alias = "PARALELA")]
    Parallel,
    Perpendicular,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    #[serde(alias = "SEGUNDA")]
    Monday,
    #[serde(alias = "TERCA")]
    Tuesday,
    #[serde(alias = "QUARTA")]
    Wednesday,
    #[serde(alias = "QUINTA")]
    Thursday,
    #[serde(alias = "SEXTA")]
    Friday,
    #[serde(alias = "SABADO")]
    Saturday,
    #[serde(alias = "DOMINGO")]
    Sunday,
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// One bookable window on a given weekday. `start`/`end` are wall-clock
/// times in the service time zone.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeeklyOperation {
    pub day: DayOfWeek,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Spot {
    pub id: String,
    pub address: Address,
    pub spot_type: SpotType,
    pub area: Area,
    #[serde(default)]
    pub operations: Vec<WeeklyOperation>,
}

impl Spot {
    pub fn operations_on(&self, day: DayOfWeek) -> impl Iterator<Item = &WeeklyOperation> {
        self.operations.iter().filter(move |op| op.day == day)
    }
}

/// The slice of a spot embedded in reservation and availability records.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpotSummary {
    pub id: String,
    pub address: Address,
}
