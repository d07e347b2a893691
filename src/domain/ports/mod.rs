use crate::domain::models::{
    spot::Spot,
    reservation::{DayOccupancy, NewReservation, Reservation, ReservationPatch},
    availability::{Availability, AvailabilityPatch, NewAvailability},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait SpotRepository: Send + Sync {
    async fn find_by_id(&self, spot_id: &str) -> Result<Option<Spot>, AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn occupancy(&self, spot_id: &str, date: NaiveDate, vehicle_type: Option<&str>) -> Result<DayOccupancy, AppError>;
    async fn list_by_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Reservation>, AppError>;
    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, AppError>;
    async fn update(&self, id: &str, patch: &ReservationPatch) -> Result<Reservation, AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Availability>, AppError>;
    async fn create(&self, availability: &NewAvailability) -> Result<Vec<Availability>, AppError>;
    async fn update(&self, id: &str, patch: &AvailabilityPatch) -> Result<Availability, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
