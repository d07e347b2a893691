use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::infra::clock::SystemClock;
use crate::infra::backend::{
    client::BackendClient, http_availability_repo::HttpAvailabilityRepo,
    http_reservation_repo::HttpReservationRepo, http_spot_repo::HttpSpotRepo,
};

pub fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    info!("Connecting to scheduling backend at {} (zone {})", config.backend_url, config.tz());

    let client = Arc::new(BackendClient::new(
        config.backend_url.clone(),
        config.backend_token.clone(),
        Duration::from_secs(config.backend_timeout_secs),
    )?);

    Ok(AppState {
        config: config.clone(),
        spot_repo: Arc::new(HttpSpotRepo::new(client.clone())),
        reservation_repo: Arc::new(HttpReservationRepo::new(client.clone())),
        availability_repo: Arc::new(HttpAvailabilityRepo::new(client)),
        clock: Arc::new(SystemClock),
    })
}
