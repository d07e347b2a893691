pub mod availability;
pub mod blockage;
pub mod reservation;
pub mod spot;
pub mod vehicle;
