use crate::domain::models::reservation::{DayOccupancy, NewReservation, Reservation, ReservationPatch};
use crate::domain::ports::ReservationRepository;
use crate::error::AppError;
use crate::infra::backend::client::BackendClient;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use std::sync::Arc;

pub struct HttpReservationRepo {
    client: Arc<BackendClient>,
}

impl HttpReservationRepo {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReservationRepository for HttpReservationRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        self.client.get_optional(&format!("/reservations/{}", id)).await
    }

    async fn occupancy(&self, spot_id: &str, date: NaiveDate, vehicle_type: Option<&str>) -> Result<DayOccupancy, AppError> {
        let mut query = vec![("date", date.to_string())];
        if let Some(vt) = vehicle_type {
            query.push(("vehicle_type", vt.to_string()));
        }
        self.client.get_json(&format!("/spots/{}/occupancy", spot_id), &query).await
    }

    async fn list_by_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        self.client
            .get_json("/reservations", &[("from", from.to_string()), ("to", to.to_string())])
            .await
    }

    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, AppError> {
        self.client.send_json(Method::POST, "/reservations", reservation).await
    }

    async fn update(&self, id: &str, patch: &ReservationPatch) -> Result<Reservation, AppError> {
        self.client.send_json(Method::PATCH, &format!("/reservations/{}", id), patch).await
    }
}
