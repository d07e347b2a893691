use crate::domain::models::spot::Spot;
use crate::domain::ports::SpotRepository;
use crate::error::AppError;
use crate::infra::backend::client::BackendClient;
use async_trait::async_trait;
use std::sync::Arc;

pub struct HttpSpotRepo {
    client: Arc<BackendClient>,
}

impl HttpSpotRepo {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpotRepository for HttpSpotRepo {
    async fn find_by_id(&self, spot_id: &str) -> Result<Option<Spot>, AppError> {
        self.client.get_optional(&format!("/spots/{}", spot_id)).await
    }
}
