use crate::domain::models::availability::{Availability, AvailabilityPatch, NewAvailability};
use crate::domain::ports::AvailabilityRepository;
use crate::error::AppError;
use crate::infra::backend::client::BackendClient;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

pub struct HttpAvailabilityRepo {
    client: Arc<BackendClient>,
}

impl HttpAvailabilityRepo {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AvailabilityRepository for HttpAvailabilityRepo {
    async fn list(&self) -> Result<Vec<Availability>, AppError> {
        self.client.get_json("/availabilities", &[]).await
    }

    async fn create(&self, availability: &NewAvailability) -> Result<Vec<Availability>, AppError> {
        self.client.send_json(Method::POST, "/availabilities", availability).await
    }

    async fn update(&self, id: &str, patch: &AvailabilityPatch) -> Result<Availability, AppError> {
        self.client.send_json(Method::PATCH, &format!("/availabilities/{}", id), patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client.delete(&format!("/availabilities/{}", id)).await
    }
}
