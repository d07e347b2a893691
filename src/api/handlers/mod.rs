use chrono::NaiveDate;
use crate::error::AppError;

pub mod health;
pub mod slots;
pub mod reservation;
pub mod calendar;
pub mod availability;

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))
}
