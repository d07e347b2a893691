pub mod client;
pub mod http_spot_repo;
pub mod http_reservation_repo;
pub mod http_availability_repo;
