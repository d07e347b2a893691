use std::sync::Arc;
use crate::domain::ports::{AvailabilityRepository, Clock, ReservationRepository, SpotRepository};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub spot_repo: Arc<dyn SpotRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub clock: Arc<dyn Clock>,
}
